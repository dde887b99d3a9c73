// RSA Big Integer Operations
// Wrapper around num-bigint for the arithmetic the RSA core needs

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{RsaError, RsaResult};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Minimal big-endian encoding. Zero encodes to an empty vector.
pub fn to_bytes_minimal(n: &RsaBigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Big-endian encoding left-padded with zeros to exactly `width` bytes.
///
/// Returns `None` when `n` does not fit in `width` bytes.
pub fn to_bytes_padded(n: &RsaBigInt, width: usize) -> Option<Vec<u8>> {
    let bytes = to_bytes_minimal(n);
    if bytes.len() > width {
        return None;
    }

    let mut result = vec![0u8; width];
    result[width - bytes.len()..].copy_from_slice(&bytes);
    Some(result)
}

/// Modular exponentiation: base^exp mod modulus
/// num-bigint does square-and-multiply (Montgomery form for odd moduli)
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    base.modpow(exp, modulus)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m, normalized into [0, m)
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> RsaResult<RsaBigInt> {
    if m.is_zero() {
        return Err(RsaError::NoInverse);
    }

    let m = BigInt::from(m.clone());
    let (gcd, x, _) = extended_gcd(&BigInt::from(a.clone()), &m);
    if !gcd.is_one() {
        return Err(RsaError::NoInverse);
    }

    x.mod_floor(&m).to_biguint().ok_or(RsaError::NoInverse)
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Number of significant bits, zero for zero
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}
