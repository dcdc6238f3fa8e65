//! Exponentiation proof: a Sigma-protocol proving knowledge of a single
//! exponent `x` consistently raising every base in a vector to `x`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::group::{GqElement, GqGroup, GroupVector, ZqElement, ZqGroup};
use crate::hash::{fiat_shamir_challenge, Hashable};
use crate::random::RandomSource;

use super::aux_hashable;

const TAG: &str = "ExponentiationProof";

/// The public statement: a vector of bases and the claimed exponentiations
/// `y_i = bases_i^x`.
pub struct Statement<'a> {
    pub bases: &'a GroupVector<GqElement>,
    pub y: &'a GroupVector<GqElement>,
}

/// The witness: the shared exponent.
pub struct Witness<'a> {
    pub x: &'a ZqElement,
}

/// `(e, z)` sharing one `Z_q`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    e: ZqElement,
    z: ZqElement,
}

impl Proof {
    pub fn e(&self) -> &ZqElement {
        &self.e
    }

    pub fn z(&self) -> &ZqElement {
        &self.z
    }
}

/// `phi_exp(x, bases) = (bases_0^x, .., bases_{n-1}^x)`.
fn phi_exp(x: &ZqElement, bases: &GroupVector<GqElement>) -> Result<GroupVector<GqElement>> {
    let mut out = Vec::with_capacity(bases.len());
    for base in bases.iter() {
        out.push(base.exponentiate(x)?);
    }
    GroupVector::new(out)
}

fn statement_f(group: &GqGroup, bases: &GroupVector<GqElement>) -> Hashable {
    Hashable::List(vec![
        Hashable::Int(group.p().clone()),
        Hashable::Int(group.q().clone()),
        Hashable::from(&group.generator()),
        Hashable::from(bases),
    ])
}

fn h_aux(y: &GroupVector<GqElement>, i_aux: &[&str]) -> Hashable {
    aux_hashable(TAG, vec![Hashable::from(y)], i_aux)
}

/// Generate an exponentiation proof. Requires `stmt.y == phi_exp(wit.x,
/// stmt.bases)`, failing with `ExponentiationInconsistent` otherwise.
pub fn prove(
    stmt: &Statement,
    wit: &Witness,
    i_aux: &[&str],
    rng: &mut impl RandomSource,
) -> Result<Proof> {
    debug!(proof = TAG, "generating proof");

    if stmt.bases.is_empty() {
        return Err(Error::invalid_argument(
            "exponentiation proof requires at least one base",
        ));
    }
    if stmt.y.len() != stmt.bases.len() {
        return Err(Error::size_mismatch(
            "y and bases must have equal length",
        ));
    }

    let expected = phi_exp(wit.x, stmt.bases)?;
    if &expected != stmt.y {
        return Err(Error::ExponentiationInconsistent);
    }

    let group = stmt.bases.group()?;
    let zq = ZqGroup::new(group.q().clone())?;
    let b = zq.element(rng.next_below(group.q()))?;
    let c = phi_exp(&b, stmt.bases)?;

    let f = statement_f(group, stmt.bases);
    let aux = h_aux(stmt.y, i_aux);
    let e = fiat_shamir_challenge(
        vec![f, Hashable::from(stmt.y), Hashable::from(&c), aux],
        group.q(),
    )?;
    let e = zq.element(e)?;

    let z = b.add(&e.multiply(wit.x)?)?;

    Ok(Proof { e, z })
}

/// Verify `proof` against `stmt`.
pub fn verify(stmt: &Statement, proof: &Proof, i_aux: &[&str]) -> bool {
    match verify_inner(stmt, proof, i_aux) {
        Ok(()) => true,
        Err(reason) => {
            warn!(proof = TAG, reason, "verify failed");
            false
        }
    }
}

fn verify_inner(
    stmt: &Statement,
    proof: &Proof,
    i_aux: &[&str],
) -> std::result::Result<(), &'static str> {
    if stmt.bases.is_empty() {
        return Err("exponentiation proof requires at least one base");
    }
    if stmt.y.len() != stmt.bases.len() {
        return Err("y and bases must have equal length");
    }

    let group = stmt.bases.group().map_err(|_| "bases vector is empty")?;
    let y_group = stmt.y.group().map_err(|_| "y vector is empty")?;
    if y_group != group {
        return Err("bases and y must share one group");
    }
    if proof.e.group().q() != group.q() {
        return Err("proof does not share the group's order");
    }

    let x = phi_exp(&proof.z, stmt.bases).map_err(|_| "phi_exp(z, bases) failed")?;
    let neg_e = proof.e.negate();
    let mut c_prime = Vec::with_capacity(stmt.bases.len());
    for i in 0..stmt.bases.len() {
        let y_i = stmt.y.get(i).expect("length checked");
        let x_i = x.get(i).expect("length checked");
        let y_inv_e = y_i.exponentiate(&neg_e).map_err(|_| "y^-e failed")?;
        c_prime.push(x_i.multiply(&y_inv_e).map_err(|_| "x * y^-e failed")?);
    }
    let c_prime = GroupVector::new(c_prime).map_err(|_| "c' is not group-uniform")?;

    let f = statement_f(group, stmt.bases);
    let aux = h_aux(stmt.y, i_aux);
    let e_prime = fiat_shamir_challenge(
        vec![f, Hashable::from(stmt.y), Hashable::from(&c_prime), aux],
        group.q(),
    )
    .map_err(|_| "challenge recomputation failed")?;

    if &e_prime == proof.e.value() {
        Ok(())
    } else {
        Err("recomputed challenge does not match proof")
    }
}
