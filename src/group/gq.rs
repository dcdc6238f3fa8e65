//! `GqGroup`: the safe-prime quadratic-residue group `(p, q, g)` with
//! `p = 2q + 1`, and `GqElement`, its members.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unknown_order::BigNumber;

use crate::big_int::{self, certainty_for_bit_length};
use crate::error::{Error, Result};

use super::zq::ZqElement;

#[derive(Debug, Serialize, Deserialize)]
struct GqGroupInner {
    p: BigNumber,
    q: BigNumber,
    g: BigNumber,
}

/// The quadratic-residue subgroup of `(Z/pZ)*` of order `q`, for a safe
/// prime `p = 2q + 1`. Cheaply `Clone`-able: the `(p, q, g)` triple is held
/// behind an `Arc` so every element referencing this group avoids copying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GqGroup(Arc<GqGroupInner>);

impl PartialEq for GqGroup {
    fn eq(&self, other: &Self) -> bool {
        self.0.p == other.0.p && self.0.q == other.0.q && self.0.g == other.0.g
    }
}
impl Eq for GqGroup {}

impl GqGroup {
    /// Construct a group, validating every invariant in the data model:
    /// `p`, `q` prime to the bit-length-appropriate certainty, `p = 2q + 1`,
    /// `1 < g < p`, and `g` a member of the group.
    pub fn new(p: BigNumber, q: BigNumber, g: BigNumber) -> Result<Self> {
        let certainty = certainty_for_bit_length(p.bit_length());

        if !big_int::is_probable_prime(&p, certainty) {
            return Err(Error::invalid_group("p is not prime"));
        }
        if !big_int::is_probable_prime(&q, certainty) {
            return Err(Error::invalid_group("q is not prime"));
        }
        if p != (&q * &BigNumber::from(2)) + BigNumber::one() {
            return Err(Error::invalid_group("p must equal 2q + 1"));
        }
        if g <= BigNumber::one() || g >= p {
            return Err(Error::invalid_group("g must satisfy 1 < g < p"));
        }

        let group = Self(Arc::new(GqGroupInner {
            p: p.clone(),
            q,
            g: g.clone(),
        }));

        if !group.is_member(&g) {
            return Err(Error::invalid_group("g is not a member of the group"));
        }

        Ok(group)
    }

    pub fn p(&self) -> &BigNumber {
        &self.0.p
    }

    pub fn q(&self) -> &BigNumber {
        &self.0.q
    }

    pub fn generator_value(&self) -> &BigNumber {
        &self.0.g
    }

    /// The identity element, `1`.
    pub fn identity(&self) -> GqElement {
        GqElement::new_unchecked(BigNumber::one(), self.clone())
    }

    /// The distinguished generator `g` as a member element.
    pub fn generator(&self) -> GqElement {
        GqElement::new_unchecked(self.0.g.clone(), self.clone())
    }

    /// `v` is a member iff `0 < v < p` and the Jacobi symbol `(v | p) = 1`.
    /// Uses the Jacobi symbol (fast path) rather than modular exponentiation.
    pub fn is_member(&self, v: &BigNumber) -> bool {
        if v <= &BigNumber::zero() || v >= &self.0.p {
            return false;
        }
        matches!(big_int::jacobi(v, &self.0.p), Ok(1))
    }

    /// Validate and wrap `v` as a member element.
    pub fn element(&self, v: BigNumber) -> Result<GqElement> {
        if !self.is_member(&v) {
            return Err(Error::invalid_argument(
                "value is not a member of the group",
            ));
        }
        Ok(GqElement::new_unchecked(v, self.clone()))
    }
}

/// A member of a `GqGroup`: `(value, group)` with `value` validated to be in
/// the quadratic-residue subgroup at construction. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GqElement {
    value: BigNumber,
    group: GqGroup,
}

impl PartialEq for GqElement {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.group == other.group
    }
}
impl Eq for GqElement {}

impl GqElement {
    /// Construct from a value already known to be group-closed (e.g. the
    /// result of `multiply`/`exponentiate`/`invert`), skipping the membership
    /// check. Private: only this module's own operations may bypass
    /// validation, per the "trusted construction path" in the data model.
    pub(crate) fn new_unchecked(value: BigNumber, group: GqGroup) -> Self {
        Self { value, group }
    }

    pub fn value(&self) -> &BigNumber {
        &self.value
    }

    pub fn group(&self) -> &GqGroup {
        &self.group
    }

    /// `self * other`, failing with `GroupMismatch` if the groups differ.
    pub fn multiply(&self, other: &GqElement) -> Result<GqElement> {
        if self.group != other.group {
            return Err(Error::group_mismatch(
                "cannot multiply GqElements from different groups",
            ));
        }
        let value = big_int::mod_mul(&self.value, &other.value, self.group.p())
            .expect("p > 1 is a group invariant");
        Ok(GqElement::new_unchecked(value, self.group.clone()))
    }

    /// `self^exp`, failing with `GroupOrderMismatch` if `exp`'s group does
    /// not share this element's `q`.
    pub fn exponentiate(&self, exp: &ZqElement) -> Result<GqElement> {
        if exp.group().q() != self.group.q() {
            return Err(Error::group_order_mismatch(
                "exponent's Z_q does not share this element's order q",
            ));
        }
        let value = big_int::mod_exp(&self.value, exp.value(), self.group.p())
            .expect("p > 1 odd and exponent non-negative are invariants here");
        Ok(GqElement::new_unchecked(value, self.group.clone()))
    }

    /// The modular inverse mod `p`.
    pub fn invert(&self) -> GqElement {
        let value =
            big_int::mod_inv(&self.value, self.group.p()).expect("group members are invertible");
        GqElement::new_unchecked(value, self.group.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_group() -> GqGroup {
        // p = 23, q = 11, g = 2 (scenario A/B's toy group)
        GqGroup::new(BigNumber::from(23), BigNumber::from(11), BigNumber::from(2)).unwrap()
    }

    #[test]
    fn rejects_invalid_safe_prime_relation() {
        // p = 23 but q = 7 does not satisfy p = 2q + 1
        assert!(GqGroup::new(BigNumber::from(23), BigNumber::from(7), BigNumber::from(2)).is_err());
    }

    #[test]
    fn rejects_generator_outside_range() {
        assert!(GqGroup::new(BigNumber::from(23), BigNumber::from(11), BigNumber::from(23)).is_err());
        assert!(GqGroup::new(BigNumber::from(23), BigNumber::from(11), BigNumber::from(1)).is_err());
    }

    #[test]
    fn membership_matches_quadratic_residues_mod_23() {
        let group = toy_group();
        // quadratic residues mod 23: 1,2,3,4,6,8,9,12,13,16,18
        let residues = [1, 2, 3, 4, 6, 8, 9, 12, 13, 16, 18];
        for v in 1..23u64 {
            let is_qr = residues.contains(&v);
            assert_eq!(group.is_member(&BigNumber::from(v)), is_qr, "v = {v}");
        }
    }

    #[test]
    fn group_law_closure_and_inverse() {
        let group = toy_group();
        let a = group.element(BigNumber::from(4)).unwrap();
        let b = group.element(BigNumber::from(9)).unwrap();
        let product = a.multiply(&b).unwrap();
        assert!(group.is_member(product.value()));

        let inv = a.invert();
        let identity = a.multiply(&inv).unwrap();
        assert_eq!(identity, group.identity());
    }

    #[test]
    fn multiply_rejects_group_mismatch() {
        let g1 = toy_group();
        let g2 = GqGroup::new(BigNumber::from(59), BigNumber::from(29), BigNumber::from(3)).unwrap();
        let a = g1.element(BigNumber::from(4)).unwrap();
        let b = g2.element(BigNumber::from(9)).unwrap();
        assert!(a.multiply(&b).is_err());
    }
}
