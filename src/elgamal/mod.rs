//! Multi-recipient ElGamal: public/private keys, messages, ciphertexts,
//! encryption, decryption, and partial decryption.

mod ciphertext;
mod keys;

pub use ciphertext::{decrypt, encrypt, partial_decrypt, Ciphertext, Message};
pub use keys::{gen_key_pair, PrivateKey, PublicKey};
