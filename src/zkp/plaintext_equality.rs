//! Plaintext-equality proof: a Sigma-protocol proving that two ciphertexts,
//! encrypted under independent public keys, carry the same plaintext —
//! without revealing the plaintext or either encryption randomness.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::elgamal::Ciphertext;
use crate::error::{Error, Result};
use crate::group::{GqElement, GqGroup, GroupVector, ZqElement, ZqGroup};
use crate::hash::{fiat_shamir_challenge, Hashable};
use crate::random::RandomSource;

use super::aux_hashable;

const TAG: &str = "PlaintextEqualityProof";

/// The public statement: two single-recipient ciphertexts and the two
/// public keys they were independently encrypted under.
pub struct Statement<'a> {
    pub ciphertext: &'a Ciphertext,
    pub ciphertext_prime: &'a Ciphertext,
    pub h: &'a GqElement,
    pub h_prime: &'a GqElement,
}

/// The witness: the two encryption randomnesses used to produce
/// `Statement::ciphertext`/`ciphertext_prime` from the same plaintext.
pub struct Witness<'a> {
    pub r: &'a ZqElement,
    pub r_prime: &'a ZqElement,
}

/// `(e, z)` with `z` of length exactly 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    e: ZqElement,
    z: GroupVector<ZqElement>,
}

impl Proof {
    pub fn e(&self) -> &ZqElement {
        &self.e
    }

    pub fn z(&self) -> &GroupVector<ZqElement> {
        &self.z
    }
}

/// `phi_eq((x, x'), h, h') = (g^x, g^x', h^x . (h'^x')^-1)`.
fn phi_eq(
    x: &ZqElement,
    x_prime: &ZqElement,
    h: &GqElement,
    h_prime: &GqElement,
) -> Result<(GqElement, GqElement, GqElement)> {
    let generator = h.group().generator();
    let gx = generator.exponentiate(x)?;
    let gx_prime = generator.exponentiate(x_prime)?;
    let hx = h.exponentiate(x)?;
    let h_prime_x_prime = h_prime.exponentiate(x_prime)?;
    let third = hx.multiply(&h_prime_x_prime.invert())?;
    Ok((gx, gx_prime, third))
}

fn require_single_phi(label: &'static str, ciphertext: &Ciphertext) -> Result<&GqElement> {
    if ciphertext.size() != 1 {
        return Err(Error::size_mismatch(format!(
            "plaintext-equality proof requires a single-recipient {label} ciphertext"
        )));
    }
    Ok(ciphertext.phi().get(0).expect("size checked above"))
}

fn statement_f(group: &GqGroup, h: &GqElement, h_prime: &GqElement) -> Hashable {
    Hashable::List(vec![
        Hashable::Int(group.p().clone()),
        Hashable::Int(group.q().clone()),
        Hashable::from(&group.generator()),
        Hashable::from(h),
        Hashable::from(h_prime),
    ])
}

fn h_aux(phi: &GqElement, phi_prime: &GqElement, i_aux: &[&str]) -> Hashable {
    aux_hashable(TAG, vec![Hashable::from(phi), Hashable::from(phi_prime)], i_aux)
}

/// Generate a plaintext-equality proof for `stmt` under `wit`.
pub fn prove(
    stmt: &Statement,
    wit: &Witness,
    i_aux: &[&str],
    rng: &mut impl RandomSource,
) -> Result<Proof> {
    debug!(proof = TAG, "generating proof");

    let phi = require_single_phi("first", stmt.ciphertext)?;
    let phi_prime = require_single_phi("second", stmt.ciphertext_prime)?;

    let group = stmt.h.group();
    if stmt.ciphertext.group() != group
        || stmt.ciphertext_prime.group() != group
        || stmt.h_prime.group() != group
    {
        return Err(Error::group_mismatch(
            "ciphertexts and public keys must share one group",
        ));
    }

    let zq = ZqGroup::new(group.q().clone())?;
    let b = rng.random_zq_vector(&zq, 2);
    let b0 = b.get(0).expect("length 2");
    let b1 = b.get(1).expect("length 2");

    let (c0, c1, c2) = phi_eq(b0, b1, stmt.h, stmt.h_prime)?;
    let c = GroupVector::new(vec![c0, c1, c2])?;

    let y0 = stmt.ciphertext.gamma().clone();
    let y1 = stmt.ciphertext_prime.gamma().clone();
    let y2 = phi.multiply(&phi_prime.invert())?;
    let y = GroupVector::new(vec![y0, y1, y2])?;

    let f = statement_f(group, stmt.h, stmt.h_prime);
    let aux = h_aux(phi, phi_prime, i_aux);
    let e = fiat_shamir_challenge(vec![f, Hashable::from(&y), Hashable::from(&c), aux], group.q())?;
    let e = zq.element(e)?;

    let z0 = b0.add(&e.multiply(wit.r)?)?;
    let z1 = b1.add(&e.multiply(wit.r_prime)?)?;

    Ok(Proof {
        e,
        z: GroupVector::new(vec![z0, z1])?,
    })
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
    if stmt.ciphertext.size() != 1 || stmt.ciphertext_prime.size() != 1 {
        return Err("plaintext-equality proof requires single-recipient ciphertexts");
    }
    if proof.z.len() != 2 {
        return Err("response vector must have length 2");
    }

    let group = stmt.h.group();
    if stmt.ciphertext.group() != group
        || stmt.ciphertext_prime.group() != group
        || stmt.h_prime.group() != group
    {
        return Err("ciphertexts and public keys must share one group");
    }
    if proof.e.group().q() != group.q() {
        return Err("proof does not share the group's order");
    }

    let z0 = proof.z.get(0).expect("len checked");
    let z1 = proof.z.get(1).expect("len checked");
    let (x0, x1, x2) =
        phi_eq(z0, z1, stmt.h, stmt.h_prime).map_err(|_| "phi_eq(z, h, h') failed")?;

    let phi = stmt.ciphertext.phi().get(0).expect("size checked above");
    let phi_prime = stmt.ciphertext_prime.phi().get(0).expect("size checked above");
    let y0 = stmt.ciphertext.gamma().clone();
    let y1 = stmt.ciphertext_prime.gamma().clone();
    let y2 = phi.multiply(&phi_prime.invert()).map_err(|_| "y2 construction failed")?;

    let neg_e = proof.e.negate();
    let c0 = x0
        .multiply(&y0.exponentiate(&neg_e).map_err(|_| "y0^-e failed")?)
        .map_err(|_| "c0 construction failed")?;
    let c1 = x1
        .multiply(&y1.exponentiate(&neg_e).map_err(|_| "y1^-e failed")?)
        .map_err(|_| "c1 construction failed")?;
    let c2 = x2
        .multiply(&y2.exponentiate(&neg_e).map_err(|_| "y2^-e failed")?)
        .map_err(|_| "c2 construction failed")?;

    let y = GroupVector::new(vec![y0, y1, y2]).map_err(|_| "y is not group-uniform")?;
    let c_prime = GroupVector::new(vec![c0, c1, c2]).map_err(|_| "c' is not group-uniform")?;

    let f = statement_f(group, stmt.h, stmt.h_prime);
    let aux = h_aux(phi, phi_prime, i_aux);
    let e_prime = fiat_shamir_challenge(
        vec![f, Hashable::from(&y), Hashable::from(&c_prime), aux],
        group.q(),
    )
    .map_err(|_| "challenge recomputation failed")?;

    if &e_prime == proof.e.value() {
        Ok(())
    } else {
        Err("recomputed challenge does not match proof")
    }
}
