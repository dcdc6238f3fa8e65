//! Multi-recipient ElGamal public/private key pairs.

use serde::{Deserialize, Serialize};
use unknown_order::BigNumber;
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::group::{GqElement, GqGroup, GroupVector, ZqElement, ZqGroup};
use crate::random::RandomSource;

/// `PublicKey` = a length-`k` vector of `GqElement`s, `pk_i = g^{sk_i}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKey(GroupVector<GqElement>);

/// `PrivateKey` = a length-`k` vector of `ZqElement`s sharing the public
/// key's `q`. Zeroized on drop since it is the secret witness every
/// decryption proof is built from.
#[derive(Debug, Clone, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct PrivateKey(GroupVector<ZqElement>);

impl PublicKey {
    pub fn new(elements: GroupVector<GqElement>) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::invalid_argument("public key must have length >= 1"));
        }
        Ok(Self(elements))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn group(&self) -> &GqGroup {
        self.0.group().expect("public key is never empty")
    }

    pub fn elements(&self) -> &GroupVector<GqElement> {
        &self.0
    }

    /// Compress to length `l`: the first `l-1` entries unchanged, the
    /// `l`-th entry the product of the tail `pk_{l-1} .. pk_{k-1}`. This
    /// lets a short message be encrypted under a long key.
    pub fn compress(&self, l: usize) -> Result<GroupVector<GqElement>> {
        compress_gq(&self.0, l)
    }
}

impl PrivateKey {
    pub fn new(elements: GroupVector<ZqElement>) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::invalid_argument("private key must have length >= 1"));
        }
        Ok(Self(elements))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn group(&self) -> &ZqGroup {
        self.0.group().expect("private key is never empty")
    }

    pub fn elements(&self) -> &GroupVector<ZqElement> {
        &self.0
    }

    /// Compress to length `l`: the first `l-1` entries unchanged, the
    /// `l`-th entry the sum (mod q) of the tail `sk_{l-1} .. sk_{k-1}`.
    pub fn compress(&self, l: usize) -> Result<GroupVector<ZqElement>> {
        compress_zq(&self.0, l)
    }
}

/// Sample `sk_i` uniformly from `[2, q)` for `i in [0, k)`; set
/// `pk_i = g^{sk_i}`.
pub fn gen_key_pair(
    group: &GqGroup,
    k: usize,
    rng: &mut impl RandomSource,
) -> Result<(PublicKey, PrivateKey)> {
    if k == 0 {
        return Err(Error::invalid_argument("key length k must be >= 1"));
    }
    let zq = ZqGroup::new(group.q().clone())?;
    let generator = group.generator();

    let mut sk_elements = Vec::with_capacity(k);
    let mut pk_elements = Vec::with_capacity(k);
    for _ in 0..k {
        let sk_i = zq.element(rng.next_in_range(&BigNumber::from(2), group.q()))?;
        let pk_i = generator.exponentiate(&sk_i)?;
        sk_elements.push(sk_i);
        pk_elements.push(pk_i);
    }

    Ok((
        PublicKey::new(GroupVector::new(pk_elements)?)?,
        PrivateKey::new(GroupVector::new(sk_elements)?)?,
    ))
}

fn compress_gq(elements: &GroupVector<GqElement>, l: usize) -> Result<GroupVector<GqElement>> {
    let k = elements.len();
    if l == 0 || l > k {
        return Err(Error::size_mismatch(format!(
            "cannot compress a length-{k} vector down to length {l}"
        )));
    }
    if l == k {
        return Ok(elements.clone());
    }

    let mut compressed: Vec<GqElement> = elements.as_slice()[..l - 1].to_vec();
    let mut tail = elements.get(l - 1).unwrap().clone();
    for e in &elements.as_slice()[l..] {
        tail = tail.multiply(e)?;
    }
    compressed.push(tail);
    GroupVector::new(compressed)
}

fn compress_zq(elements: &GroupVector<ZqElement>, l: usize) -> Result<GroupVector<ZqElement>> {
    let k = elements.len();
    if l == 0 || l > k {
        return Err(Error::size_mismatch(format!(
            "cannot compress a length-{k} vector down to length {l}"
        )));
    }
    if l == k {
        return Ok(elements.clone());
    }

    let mut compressed: Vec<ZqElement> = elements.as_slice()[..l - 1].to_vec();
    let mut tail = elements.get(l - 1).unwrap().clone();
    for e in &elements.as_slice()[l..] {
        tail = tail.add(e)?;
    }
    compressed.push(tail);
    GroupVector::new(compressed)
}
