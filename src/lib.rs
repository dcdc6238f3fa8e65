//! A zero-knowledge proof engine for ElGamal verifiable decryption over
//! safe-prime quadratic-residue groups.
//!
//! Built on [`group`], the `G_q`/`Z_q` kernel; [`hash`], the recursive
//! structured hash that every Fiat-Shamir challenge is derived from; and
//! [`elgamal`], multi-recipient ElGamal encryption. [`zkp`] holds the three
//! Sigma-protocol proofs this is all for: decryption, plaintext-equality, and
//! exponentiation, plus the batched `VerifiableDecryptions` built from the
//! first.

pub mod big_int;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod hash;
pub mod random;
pub mod zkp;

pub use error::{Error, Result};
