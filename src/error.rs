//! Error taxonomy for the core.
//!
//! Every fallible public entry point returns `Result<T, Error>`. Verification
//! failures are *not* represented here: `verify*` functions return `bool`
//! (logging the reason via `tracing::warn!`), per the propagation policy that
//! a failed proof is data, not an exceptional condition.

use thiserror::Error;

/// A closed taxonomy of precondition failures, one variant per role in the
/// core's error design. `Clone + PartialEq` so tests can assert on the exact
/// kind of failure, not merely that *a* failure occurred.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid group: {0}")]
    InvalidGroup(String),

    #[error("group mismatch: {0}")]
    GroupMismatch(String),

    #[error("group order mismatch: {0}")]
    GroupOrderMismatch(String),

    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    #[error("domain error: {0}")]
    DomainError(String),

    #[error("empty list passed to recursive hash")]
    EmptyHashList,

    #[error("hash output bit length {digest_bits} is not smaller than |q| = {q_bits}")]
    HashBitLengthTooLarge { digest_bits: usize, q_bits: usize },

    #[error("decrypted message does not match the claimed plaintext")]
    DecryptionMismatch,

    #[error("provided exponentiations do not match phi_exp(x, bases)")]
    ExponentiationInconsistent,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn invalid_group(msg: impl Into<String>) -> Self {
        Error::InvalidGroup(msg.into())
    }

    pub(crate) fn group_mismatch(msg: impl Into<String>) -> Self {
        Error::GroupMismatch(msg.into())
    }

    pub(crate) fn group_order_mismatch(msg: impl Into<String>) -> Self {
        Error::GroupOrderMismatch(msg.into())
    }

    pub(crate) fn size_mismatch(msg: impl Into<String>) -> Self {
        Error::SizeMismatch(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Error::DomainError(msg.into())
    }
}
