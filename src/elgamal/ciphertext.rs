//! Multi-recipient ElGamal messages and ciphertexts: encryption, decryption,
//! and partial decryption.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::group::{GqElement, GqGroup, GroupElement, GroupVector, ZqElement};

use super::keys::{PrivateKey, PublicKey};

/// A plaintext of length `l <= k`, one `GqElement` per recipient slot.
pub type Message = GroupVector<GqElement>;

/// `(gamma, phi)`: the ElGamal ciphertext of a length-`l` message. `size()`
/// is `l`, i.e. the length of `phi` (excluding `gamma`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ciphertext {
    gamma: GqElement,
    phi: GroupVector<GqElement>,
}

impl Ciphertext {
    pub fn new(gamma: GqElement, phi: GroupVector<GqElement>) -> Result<Self> {
        if !phi.is_empty() && phi.group()? != gamma.group() {
            return Err(Error::group_mismatch(
                "gamma and phi must share one GqGroup",
            ));
        }
        Ok(Self { gamma, phi })
    }

    pub fn gamma(&self) -> &GqElement {
        &self.gamma
    }

    pub fn phi(&self) -> &GroupVector<GqElement> {
        &self.phi
    }

    /// `size()` is the length of `phi`, i.e. the number of recipient slots
    /// this ciphertext covers.
    pub fn size(&self) -> usize {
        self.phi.len()
    }

    pub fn group(&self) -> &GqGroup {
        self.gamma.group()
    }
}

/// Lets `GroupVector<Ciphertext>` enforce that every ciphertext of a batch
/// shares one `GqGroup`, as `VerifiableDecryptions` requires.
impl GroupElement for Ciphertext {
    type Group = GqGroup;

    fn group(&self) -> &GqGroup {
        Ciphertext::group(self)
    }
}

/// Encrypt `message` (length `l`) under `pk` (length `k >= l`) with exponent
/// `r`. Compresses `pk` to length `l` first (see `PublicKey::compress`).
pub fn encrypt(message: &Message, r: &ZqElement, pk: &PublicKey) -> Result<Ciphertext> {
    let l = message.len();
    if l == 0 {
        return Err(Error::invalid_argument("message must have length >= 1"));
    }
    if l > pk.len() {
        return Err(Error::size_mismatch(format!(
            "message length {l} exceeds public key length {}",
            pk.len()
        )));
    }
    if message.group()? != pk.group() {
        return Err(Error::group_mismatch(
            "message and public key must share one GqGroup",
        ));
    }

    let compressed_pk = pk.compress(l)?;
    let gamma = pk.group().generator().exponentiate(r)?;

    let mut phi = Vec::with_capacity(l);
    for i in 0..l {
        let pk_i_r = compressed_pk.get(i).unwrap().exponentiate(r)?;
        phi.push(message.get(i).unwrap().multiply(&pk_i_r)?);
    }

    Ciphertext::new(gamma, GroupVector::new(phi)?)
}

/// Decrypt `ciphertext` (length `l`) with `sk` (length `k >= l`). Compresses
/// `sk` to length `l` first (see `PrivateKey::compress`).
pub fn decrypt(ciphertext: &Ciphertext, sk: &PrivateKey) -> Result<Message> {
    let l = ciphertext.size();
    if l > sk.len() {
        return Err(Error::size_mismatch(format!(
            "ciphertext size {l} exceeds private key length {}",
            sk.len()
        )));
    }

    let compressed_sk = sk.compress(l)?;
    let mut message = Vec::with_capacity(l);
    for i in 0..l {
        let sk_i = compressed_sk.get(i).unwrap();
        let blinding = ciphertext.gamma().exponentiate(sk_i)?.invert();
        message.push(ciphertext.phi().get(i).unwrap().multiply(&blinding)?);
    }
    GroupVector::new(message)
}

/// Partial decryption used by batched verifiable decryptions: `gamma`
/// unchanged, `phi'_i = phi_i . gamma^{-sk_i}` using `sk`'s first `l`
/// entries directly (no tail compression — contrast with `decrypt`).
pub fn partial_decrypt(ciphertext: &Ciphertext, sk: &PrivateKey) -> Result<Ciphertext> {
    let l = ciphertext.size();
    if l > sk.len() {
        return Err(Error::size_mismatch(format!(
            "ciphertext size {l} exceeds private key length {}",
            sk.len()
        )));
    }

    let mut phi = Vec::with_capacity(l);
    for i in 0..l {
        let sk_i = sk.elements().get(i).unwrap();
        let blinding = ciphertext.gamma().exponentiate(sk_i)?.invert();
        phi.push(ciphertext.phi().get(i).unwrap().multiply(&blinding)?);
    }
    Ciphertext::new(ciphertext.gamma().clone(), GroupVector::new(phi)?)
}
