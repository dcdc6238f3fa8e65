//! `ZqGroup`: the exponent group `Z_q` of integers modulo `q`, and its
//! elements `ZqElement`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use unknown_order::BigNumber;
use zeroize::Zeroize;

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
struct ZqGroupInner {
    q: BigNumber,
}

/// Integers modulo `q`, viewed as the exponent group of a `GqGroup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZqGroup(Arc<ZqGroupInner>);

impl PartialEq for ZqGroup {
    fn eq(&self, other: &Self) -> bool {
        self.0.q == other.0.q
    }
}
impl Eq for ZqGroup {}

impl ZqGroup {
    /// Construct from `q >= 2`.
    pub fn new(q: BigNumber) -> Result<Self> {
        if q < BigNumber::from(2) {
            return Err(Error::invalid_group("q must be >= 2"));
        }
        Ok(Self(Arc::new(ZqGroupInner { q })))
    }

    pub fn q(&self) -> &BigNumber {
        &self.0.q
    }

    pub fn identity(&self) -> ZqElement {
        ZqElement::new_unchecked(BigNumber::zero(), self.clone())
    }

    /// `0 <= v < q`.
    pub fn is_member(&self, v: &BigNumber) -> bool {
        v >= &BigNumber::zero() && v < &self.0.q
    }

    pub fn element(&self, v: BigNumber) -> Result<ZqElement> {
        if !self.is_member(&v) {
            return Err(Error::invalid_argument("value is not in [0, q)"));
        }
        Ok(ZqElement::new_unchecked(v, self.clone()))
    }
}

/// A member of `Z_q`. Implements `Zeroize` since `ZqElement`s back proof
/// witnesses and blinding exponents that must not linger in memory.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize)]
pub struct ZqElement {
    #[zeroize(skip)]
    group: ZqGroup,
    value: BigNumber,
}

impl PartialEq for ZqElement {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.group == other.group
    }
}
impl Eq for ZqElement {}

impl ZqElement {
    pub(crate) fn new_unchecked(value: BigNumber, group: ZqGroup) -> Self {
        Self { value, group }
    }

    pub fn value(&self) -> &BigNumber {
        &self.value
    }

    pub fn group(&self) -> &ZqGroup {
        &self.group
    }

    fn reduced(&self, v: BigNumber) -> ZqElement {
        let q = self.group.q();
        let r = &v % q;
        let r = if r < BigNumber::zero() { r + q } else { r };
        ZqElement::new_unchecked(r, self.group.clone())
    }

    pub fn add(&self, other: &ZqElement) -> Result<ZqElement> {
        self.require_same_group(other)?;
        Ok(self.reduced(&self.value + &other.value))
    }

    pub fn subtract(&self, other: &ZqElement) -> Result<ZqElement> {
        self.require_same_group(other)?;
        Ok(self.reduced(&self.value - &other.value))
    }

    pub fn negate(&self) -> ZqElement {
        self.reduced(-&self.value)
    }

    pub fn multiply(&self, other: &ZqElement) -> Result<ZqElement> {
        self.require_same_group(other)?;
        Ok(self.reduced(&self.value * &other.value))
    }

    /// `self^e mod q`. Requires `e >= 0`.
    pub fn exponentiate(&self, e: &BigNumber) -> Result<ZqElement> {
        if e < &BigNumber::zero() {
            return Err(Error::domain("ZqElement exponent must be non-negative"));
        }
        Ok(self.reduced(pow_mod_any(&self.value, e, self.group.q())))
    }

    fn require_same_group(&self, other: &ZqElement) -> Result<()> {
        if self.group != other.group {
            return Err(Error::group_mismatch(
                "cannot combine ZqElements from different Z_q groups",
            ));
        }
        Ok(())
    }
}

/// Modular exponentiation for a (possibly even) modulus and a non-negative
/// exponent — square-and-multiply directly, since `big_int::mod_exp`
/// requires an odd modulus (true for `GqGroup::p` but not for `ZqGroup::q`,
/// which is itself prime and odd in every group this crate constructs, but
/// `ZqElement::exponentiate` must not rely on that to stay correct generically).
fn pow_mod_any(base: &BigNumber, exp: &BigNumber, m: &BigNumber) -> BigNumber {
    let mut result = BigNumber::one() % m;
    let mut base = base % m;
    let mut exp = exp.clone();
    let two = BigNumber::from(2);
    let zero = BigNumber::zero();

    while exp > zero {
        if &(&exp % &two) == &BigNumber::one() {
            result = (&result * &base) % m;
        }
        base = (&base * &base) % m;
        exp = &exp / &two;
    }

    if result < BigNumber::zero() {
        result + m
    } else {
        result
    }
}
