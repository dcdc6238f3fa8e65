//! `GroupVector<E>`: a finite ordered sequence of elements sharing one
//! group, a newtype-over-`Vec` enforcing the group-uniformity invariant this
//! domain requires.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Error, Result};

use super::element::GroupElement;
use super::matrix::GroupMatrix;

/// An ordered, group-uniform sequence of elements. Empty vectors are legal;
/// `group()` on an empty vector is an error, since there is no element to
/// read a group from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupVector<E>(Vec<E>);

/// Zeroizes every element in place. Lets `PrivateKey`'s
/// `GroupVector<ZqElement>` derive `Zeroize`/`ZeroizeOnDrop` directly, since a
/// private key's backing storage must not linger in memory after drop.
impl<E: Zeroize> Zeroize for GroupVector<E> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<E: GroupElement> GroupVector<E> {
    /// Build from a sequence, rejecting group mismatches across elements.
    /// Order is preserved.
    pub fn new(elements: Vec<E>) -> Result<Self> {
        if let Some(first) = elements.first() {
            let group = first.group();
            if elements.iter().any(|e| e.group() != group) {
                return Err(Error::group_mismatch(
                    "all elements of a GroupVector must share one group",
                ));
            }
        }
        Ok(Self(elements))
    }

    /// The empty vector.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[E] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<E> {
        self.0
    }

    /// The shared group of every element. Errors on an empty vector.
    pub fn group(&self) -> Result<&E::Group> {
        self.0
            .first()
            .map(|e| e.group())
            .ok_or_else(|| Error::invalid_argument("cannot read the group of an empty GroupVector"))
    }

    /// Append `element`, rejecting a group mismatch against the existing
    /// elements (a no-op check on an empty vector).
    pub fn append(&mut self, element: E) -> Result<()> {
        if let Ok(group) = self.group() {
            if element.group() != group {
                return Err(Error::group_mismatch(
                    "appended element does not share this vector's group",
                ));
            }
        }
        self.0.push(element);
        Ok(())
    }

    /// Prepend `element`, with the same group-uniformity check as `append`.
    pub fn prepend(&mut self, element: E) -> Result<()> {
        if let Ok(group) = self.group() {
            if element.group() != group {
                return Err(Error::group_mismatch(
                    "prepended element does not share this vector's group",
                ));
            }
        }
        self.0.insert(0, element);
        Ok(())
    }

    /// Reshape into a `rows x cols` matrix, requiring `rows * cols == len`.
    /// The layout is **column-major**: the element at row `i`, column `j` is
    /// the `(i + rows*j)`-th vector entry. This is surprising but pinned for
    /// interop, per the component design.
    pub fn to_matrix(self, rows: usize, cols: usize) -> Result<GroupMatrix<E>> {
        if rows * cols != self.0.len() {
            return Err(Error::size_mismatch(format!(
                "rows * cols ({}) must equal vector length ({})",
                rows * cols,
                self.0.len()
            )));
        }
        GroupMatrix::from_column_major(self.0, rows, cols)
    }
}

impl<E> FromIterator<E> for GroupVector<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<E> IntoIterator for GroupVector<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
