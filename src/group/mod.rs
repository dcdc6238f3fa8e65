//! The modular-arithmetic group kernel: `GqGroup`/`GqElement`,
//! `ZqGroup`/`ZqElement`, and the `GroupVector`/`GroupMatrix` containers
//! generic over either.

mod element;
mod gq;
mod matrix;
mod vector;
mod zq;

pub use element::GroupElement;
pub use gq::{GqElement, GqGroup};
pub use matrix::GroupMatrix;
pub use vector::GroupVector;
pub use zq::{ZqElement, ZqGroup};
