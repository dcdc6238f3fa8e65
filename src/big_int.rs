//! Arbitrary-precision modular arithmetic.
//!
//! Centralizes the third-party big-integer dependency behind a thin module of
//! free functions, to provide an ergonomic API and to keep the choice of
//! backend (GMP vs. pure Rust, selected by Cargo feature on `unknown_order`)
//! an implementation detail nobody above this module sees.
//!
//! `unknown_order::BigNumber` is signed, arbitrary precision, and already
//! implements the arithmetic operators, `gcd`, `invert`, `modpow` and a
//! uniform-below-bound sampler that the rest of this crate is built on.

use crate::error::{Error, Result};
use unknown_order::BigNumber;

/// `a * b mod m`. Requires `m > 1`.
pub fn mod_mul(a: &BigNumber, b: &BigNumber, m: &BigNumber) -> Result<BigNumber> {
    require_modulus_gt_one(m)?;
    Ok(canonicalize(&(a * b), m))
}

/// `b^e mod m`. Requires `m > 1` and odd. If `e < 0`, requires `gcd(b, m) = 1`
/// and returns `(b^-1)^|e| mod m`.
pub fn mod_exp(b: &BigNumber, e: &BigNumber, m: &BigNumber) -> Result<BigNumber> {
    require_modulus_gt_one(m)?;
    if &(m % &BigNumber::from(2)) == &BigNumber::zero() {
        return Err(Error::domain("modulus must be odd"));
    }

    if e < &BigNumber::zero() {
        let inv = mod_inv(b, m)?;
        let pos_e = -e;
        return Ok(canonicalize(&inv.modpow(&pos_e, m), m));
    }

    Ok(canonicalize(&b.modpow(e, m), m))
}

/// `n^-1 mod m`. Requires `gcd(n, m) = 1` and `m > 1`.
pub fn mod_inv(n: &BigNumber, m: &BigNumber) -> Result<BigNumber> {
    require_modulus_gt_one(m)?;
    n.invert(m)
        .map(|inv| canonicalize(&inv, m))
        .ok_or_else(|| Error::domain("n has no inverse modulo m: gcd(n, m) != 1"))
}

/// The Jacobi symbol `(a | n)`, returning -1, 0, or 1. Requires `a > 0` and
/// `n` odd and positive.
pub fn jacobi(a: &BigNumber, n: &BigNumber) -> Result<i32> {
    if a <= &BigNumber::zero() {
        return Err(Error::domain("jacobi: a must be positive"));
    }
    if n <= &BigNumber::zero() || &(n % &BigNumber::from(2)) == &BigNumber::zero() {
        return Err(Error::domain("jacobi: n must be positive and odd"));
    }

    let mut a = a % n;
    let mut n = n.clone();
    let mut result = 1i32;

    let two = BigNumber::from(2);
    let three = BigNumber::from(3);
    let four = BigNumber::from(4);
    let eight = BigNumber::from(8);

    while a != BigNumber::zero() {
        while &(&a % &two) == &BigNumber::zero() {
            a = &a / &two;
            let r = &n % &eight;
            if r == three || r == BigNumber::from(5) {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if &(&a % &four) == &three && &(&n % &four) == &three {
            result = -result;
        }
        a = &a % &n;
    }

    if n == BigNumber::one() {
        Ok(result)
    } else {
        Ok(0)
    }
}

/// Certainty (in bits) to request from Miller-Rabin for a modulus of the
/// given bit length, per the schedule in the component design.
pub fn certainty_for_bit_length(bit_length: usize) -> usize {
    if bit_length >= 3072 {
        128
    } else if bit_length >= 2048 {
        112
    } else {
        80
    }
}

/// Probabilistic Miller-Rabin primality test. `certainty_bits` bounds the
/// false-positive probability by `2^-certainty_bits`; since each round halves
/// the error, this requires `ceil(certainty_bits / 2)` rounds.
pub fn is_probable_prime(n: &BigNumber, certainty_bits: usize) -> bool {
    let zero = BigNumber::zero();
    let one = BigNumber::one();
    let two = BigNumber::from(2);
    let three = BigNumber::from(3);

    if n <= &one {
        return false;
    }
    if n == &two || n == &three {
        return true;
    }
    if &(n % &two) == &zero {
        return false;
    }

    // n - 1 = 2^s * d, d odd
    let n_minus_one = n - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while &(&d % &two) == &zero {
        d = &d / &two;
        s += 1;
    }

    let rounds = ((certainty_bits + 1) / 2).max(1);
    let mut rng = rand::thread_rng();

    'witness_loop: for _ in 0..rounds {
        // witness uniformly in [2, n-2]
        let span = n - &BigNumber::from(3);
        let witness = BigNumber::from_rng(&span, &mut rng) + &two;

        let mut x = witness.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 0..s.saturating_sub(1) {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness_loop;
            }
        }

        return false;
    }

    true
}

/// Canonical minimal big-endian encoding: `0 -> [0x00]`, otherwise the
/// shortest big-endian representation with no leading `0x00` byte. Negative
/// values are rejected.
pub fn int_to_bytes(n: &BigNumber) -> Result<Vec<u8>> {
    if n < &BigNumber::zero() {
        return Err(Error::domain("int_to_bytes: negative input"));
    }
    let bytes = n.to_bytes();
    if bytes.is_empty() {
        Ok(vec![0u8])
    } else {
        Ok(bytes)
    }
}

/// Inverse of [`int_to_bytes`]. Rejects empty input.
pub fn bytes_to_int(bytes: &[u8]) -> Result<BigNumber> {
    if bytes.is_empty() {
        return Err(Error::domain("bytes_to_int: empty input"));
    }
    Ok(BigNumber::from_slice(bytes))
}

fn require_modulus_gt_one(m: &BigNumber) -> Result<()> {
    if m <= &BigNumber::one() {
        return Err(Error::domain("modulus must be > 1"));
    }
    Ok(())
}

/// Reduce `v` into the canonical `[0, m)` representative. `unknown_order`
/// backends agree on sign conventions for `%`, but we pin the non-negative
/// representative explicitly since `mod_mul`/`mod_exp`/`mod_inv` are defined
/// over non-negative residues throughout this crate.
fn canonicalize(v: &BigNumber, m: &BigNumber) -> BigNumber {
    let r = v % m;
    if r < BigNumber::zero() {
        r + m
    } else {
        r
    }
}
