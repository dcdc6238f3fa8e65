//! The ZKP engine: three Fiat-Shamir non-interactive Sigma-protocol proofs
//! over the group kernel (decryption, plaintext-equality, exponentiation)
//! and the batched `VerifiableDecryptions` built from the decryption proof.
//!
//! Every proof follows the same shape: sample blinding randomness `b`,
//! compute a commitment `c = phi(b)`, derive the challenge `e` from a
//! structured hash of the statement and commitment, and respond with
//! `z = b + e*w` for witness `w`. Verification recomputes the commitment
//! from `(statement, z, e)` and accepts iff the challenge re-derives to `e`.

pub mod decryption;
pub mod exponentiation;
pub mod plaintext_equality;
pub mod verifiable_decryptions;

pub use decryption::Proof as DecryptionProof;
pub use exponentiation::Proof as ExponentiationProof;
pub use plaintext_equality::Proof as PlaintextEqualityProof;
pub use verifiable_decryptions::VerifiableDecryptions;

use crate::hash::Hashable;

/// Build the `h_aux` Hashable list shared by every proof in this module: a
/// proof-name tag, the proof-specific parts, and — when `i_aux` is
/// non-empty — the auxiliary context strings as a trailing nested list.
pub(crate) fn aux_hashable(tag: &'static str, mut parts: Vec<Hashable>, i_aux: &[&str]) -> Hashable {
    let mut items = vec![Hashable::Text(tag.to_string())];
    items.append(&mut parts);
    if !i_aux.is_empty() {
        items.push(Hashable::List(i_aux.iter().map(|s| Hashable::from(*s)).collect()));
    }
    Hashable::List(items)
}
