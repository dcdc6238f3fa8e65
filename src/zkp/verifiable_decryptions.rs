//! Batched verifiable decryptions: partial-decrypt `N` ciphertexts under one
//! key pair and produce one decryption proof per ciphertext.
//!
//! Partial decryption (`elgamal::partial_decrypt`) uses the secret key's raw
//! per-slot exponents without the tail-compression `elgamal::decrypt`
//! applies; the two coincide only when the key pair's length equals the
//! ciphertext element size, which this construction therefore requires (see
//! DESIGN.md).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::elgamal::{partial_decrypt, Ciphertext, PrivateKey, PublicKey};
use crate::error::{Error, Result};
use crate::group::GroupVector;
use crate::random::RandomSource;

use super::decryption;

const TAG: &str = "VerifiableDecryptions";

/// The public statement: the original ciphertexts and the public key they
/// were encrypted under.
pub struct Statement<'a> {
    pub ciphertexts: &'a GroupVector<Ciphertext>,
    pub pk: &'a PublicKey,
}

/// The witness: the matching private key.
pub struct Witness<'a> {
    pub sk: &'a PrivateKey,
}

/// The partial decryptions and their per-ciphertext decryption proofs,
/// `|ciphertexts| == |proofs| == N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableDecryptions {
    ciphertexts: GroupVector<Ciphertext>,
    proofs: GroupVector<decryption::Proof>,
}

impl VerifiableDecryptions {
    pub fn ciphertexts(&self) -> &GroupVector<Ciphertext> {
        &self.ciphertexts
    }

    pub fn proofs(&self) -> &GroupVector<decryption::Proof> {
        &self.proofs
    }

    pub fn len(&self) -> usize {
        self.ciphertexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphertexts.is_empty()
    }
}

fn uniform_element_size(ciphertexts: &GroupVector<Ciphertext>) -> Result<usize> {
    let l = ciphertexts
        .get(0)
        .ok_or_else(|| Error::invalid_argument("verifiable decryptions require at least one ciphertext"))?
        .size();
    if l == 0 {
        return Err(Error::size_mismatch("ciphertext element size must be >= 1"));
    }
    if ciphertexts.iter().any(|c| c.size() != l) {
        return Err(Error::size_mismatch(
            "all ciphertexts must share one element size",
        ));
    }
    Ok(l)
}

/// Generate a `VerifiableDecryptions` for every ciphertext in `stmt`.
pub fn generate(
    stmt: &Statement,
    wit: &Witness,
    i_aux: &[&str],
    rng: &mut impl RandomSource,
) -> Result<VerifiableDecryptions> {
    debug!(proof = TAG, "generating batched decryption proofs");

    let n = stmt.ciphertexts.len();
    if n == 0 {
        return Err(Error::invalid_argument(
            "verifiable decryptions require at least one ciphertext",
        ));
    }

    let group = stmt.ciphertexts.group()?;
    if stmt.pk.group() != group {
        return Err(Error::group_mismatch(
            "ciphertexts and public key must share one group",
        ));
    }

    let l = uniform_element_size(stmt.ciphertexts)?;
    if stmt.pk.len() != l || wit.sk.len() != l {
        return Err(Error::size_mismatch(
            "verifiable decryptions require a key pair whose length equals the ciphertext element size",
        ));
    }

    let mut partials = Vec::with_capacity(n);
    let mut proofs = Vec::with_capacity(n);
    for ciphertext in stmt.ciphertexts.iter() {
        let partial = partial_decrypt(ciphertext, wit.sk)?;
        let message = partial.phi().clone();
        let proof_stmt = decryption::Statement {
            ciphertext,
            pk: stmt.pk,
            message: &message,
        };
        let proof_wit = decryption::Witness { sk: wit.sk };
        let proof = decryption::prove(&proof_stmt, &proof_wit, i_aux, rng)?;
        partials.push(partial);
        proofs.push(proof);
    }

    Ok(VerifiableDecryptions {
        ciphertexts: GroupVector::new(partials)?,
        proofs: GroupVector::new(proofs)?,
    })
}

/// Verify every per-ciphertext decryption proof in `decryptions` against
/// `stmt`.
pub fn verify(stmt: &Statement, decryptions: &VerifiableDecryptions, i_aux: &[&str]) -> bool {
    match verify_inner(stmt, decryptions, i_aux) {
        Ok(()) => true,
        Err(reason) => {
            warn!(proof = TAG, reason, "verify failed");
            false
        }
    }
}

fn verify_inner(
    stmt: &Statement,
    decryptions: &VerifiableDecryptions,
    i_aux: &[&str],
) -> std::result::Result<(), &'static str> {
    let n = stmt.ciphertexts.len();
    if n == 0 {
        return Err("verifiable decryptions require at least one ciphertext");
    }
    if decryptions.ciphertexts.len() != n || decryptions.proofs.len() != n {
        return Err("partial decryptions and proofs must match the statement's ciphertext count");
    }

    let group = stmt.ciphertexts.group().map_err(|_| "ciphertexts vector is empty")?;
    if stmt.pk.group() != group {
        return Err("ciphertexts and public key must share one group");
    }

    let l = uniform_element_size(stmt.ciphertexts).map_err(|_| "ciphertext element sizes are not uniform")?;
    if stmt.pk.len() != l {
        return Err("public key length must equal the ciphertext element size");
    }

    for i in 0..n {
        let ciphertext = stmt.ciphertexts.get(i).expect("i < n");
        let partial = decryptions.ciphertexts.get(i).expect("i < n");
        let proof = decryptions.proofs.get(i).expect("i < n");
        let proof_stmt = decryption::Statement {
            ciphertext,
            pk: stmt.pk,
            message: partial.phi(),
        };
        if !decryption::verify(&proof_stmt, proof, i_aux) {
            return Err("per-ciphertext decryption proof failed to verify");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elgamal::{encrypt, Message};
    use crate::group::{GqGroup, ZqGroup};
    use crate::random::ChaChaRandomSource;
    use unknown_order::BigNumber;

    fn toy_group() -> GqGroup {
        GqGroup::new(BigNumber::from(23), BigNumber::from(11), BigNumber::from(2)).unwrap()
    }

    /// Pins scenario B: p=23, q=11, pk=(4,8), sk=(2,3),
    /// C=((4;9,1), (2;13,4)), i_aux=["test","messages"].
    fn scenario_b() -> (GroupVector<Ciphertext>, PublicKey, PrivateKey) {
        let group = toy_group();
        let pk = PublicKey::new(
            GroupVector::new(vec![
                group.element(BigNumber::from(4)).unwrap(),
                group.element(BigNumber::from(8)).unwrap(),
            ])
            .unwrap(),
        )
        .unwrap();
        let zq = ZqGroup::new(BigNumber::from(11)).unwrap();
        let sk = PrivateKey::new(
            GroupVector::new(vec![
                zq.element(BigNumber::from(2)).unwrap(),
                zq.element(BigNumber::from(3)).unwrap(),
            ])
            .unwrap(),
        )
        .unwrap();

        let c1 = Ciphertext::new(
            group.element(BigNumber::from(4)).unwrap(),
            GroupVector::new(vec![
                group.element(BigNumber::from(9)).unwrap(),
                group.element(BigNumber::from(1)).unwrap(),
            ])
            .unwrap(),
        )
        .unwrap();
        let c2 = Ciphertext::new(
            group.element(BigNumber::from(2)).unwrap(),
            GroupVector::new(vec![
                group.element(BigNumber::from(13)).unwrap(),
                group.element(BigNumber::from(4)).unwrap(),
            ])
            .unwrap(),
        )
        .unwrap();
        let ciphertexts = GroupVector::new(vec![c1, c2]).unwrap();

        (ciphertexts, pk, sk)
    }

    #[test]
    fn scenario_b_partial_decryptions_match_literal_values() {
        let (ciphertexts, pk, sk) = scenario_b();
        let stmt = Statement {
            ciphertexts: &ciphertexts,
            pk: &pk,
        };
        let wit = Witness { sk: &sk };
        let mut rng = ChaChaRandomSource::fixed(vec![
            BigNumber::from(3),
            BigNumber::from(8),
            BigNumber::from(2),
            BigNumber::from(4),
        ]);

        let decryptions = generate(&stmt, &wit, &["test", "messages"], &mut rng).unwrap();
        assert_eq!(decryptions.len(), 2);

        let partial0 = decryptions.ciphertexts().get(0).unwrap();
        assert_eq!(partial0.gamma().value(), &BigNumber::from(4));
        assert_eq!(
            partial0.phi().as_slice().iter().map(|e| e.value().clone()).collect::<Vec<_>>(),
            vec![BigNumber::from(2), BigNumber::from(9)]
        );

        let partial1 = decryptions.ciphertexts().get(1).unwrap();
        assert_eq!(partial1.gamma().value(), &BigNumber::from(2));
        assert_eq!(
            partial1.phi().as_slice().iter().map(|e| e.value().clone()).collect::<Vec<_>>(),
            vec![BigNumber::from(9), BigNumber::from(12)]
        );

        let proof0 = decryptions.proofs().get(0).unwrap();
        assert_eq!(proof0.e().value(), &BigNumber::from(5));
        assert_eq!(
            proof0.z().iter().map(|e| e.value().clone()).collect::<Vec<_>>(),
            vec![BigNumber::from(2), BigNumber::from(1)]
        );

        let proof1 = decryptions.proofs().get(1).unwrap();
        assert_eq!(proof1.e().value(), &BigNumber::from(2));
        assert_eq!(
            proof1.z().iter().map(|e| e.value().clone()).collect::<Vec<_>>(),
            vec![BigNumber::from(6), BigNumber::from(10)]
        );

        assert!(verify(&stmt, &decryptions, &["test", "messages"]));
    }

    #[test]
    fn end_to_end_round_trip_with_generated_keys() {
        let group = toy_group();
        let mut rng = ChaChaRandomSource::from_seed([31u8; 32]);
        let (pk, sk) = crate::elgamal::gen_key_pair(&group, 2, &mut rng).unwrap();
        let zq = ZqGroup::new(group.q().clone()).unwrap();

        let mut ciphertexts = Vec::new();
        for (m0, m1, r) in [(2u64, 3u64, 6u64), (5, 9, 4), (3, 3, 9)] {
            let message: Message = GroupVector::new(vec![
                group.element(BigNumber::from(m0)).unwrap(),
                group.element(BigNumber::from(m1)).unwrap(),
            ])
            .unwrap();
            let r = zq.element(BigNumber::from(r)).unwrap();
            ciphertexts.push(encrypt(&message, &r, &pk).unwrap());
        }
        let ciphertexts = GroupVector::new(ciphertexts).unwrap();

        let stmt = Statement {
            ciphertexts: &ciphertexts,
            pk: &pk,
        };
        let wit = Witness { sk: &sk };
        let decryptions = generate(&stmt, &wit, &["election-2026"], &mut rng).unwrap();
        assert!(verify(&stmt, &decryptions, &["election-2026"]));
        assert!(!verify(&stmt, &decryptions, &["different-aux"]));
    }

    #[test]
    fn empty_ciphertext_vector_is_rejected() {
        let group = toy_group();
        let mut rng = ChaChaRandomSource::from_seed([32u8; 32]);
        let (pk, sk) = crate::elgamal::gen_key_pair(&group, 2, &mut rng).unwrap();
        let empty: GroupVector<Ciphertext> = GroupVector::empty();
        let stmt = Statement {
            ciphertexts: &empty,
            pk: &pk,
        };
        let wit = Witness { sk: &sk };
        assert!(generate(&stmt, &wit, &[], &mut rng).is_err());
    }
}
