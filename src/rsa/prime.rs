// Prime Generation
// Miller-Rabin primality testing and random prime sampling

use log::trace;
use num_bigint::RandBigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};

use super::bigint::{mod_pow, RsaBigInt};
use super::error::{RsaError, RsaResult};

/// Primes used for trial division before any Miller-Rabin round
pub const SMALL_PRIMES: [u32; 16] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Default Miller-Rabin round count, false positive rate at most 4^-16
pub const DEFAULT_MR_ROUNDS: u32 = 16;

/// Miller-Rabin primality test using the thread-local CSPRNG
/// Returns true if n is probably prime
pub fn is_probable_prime(n: &RsaBigInt, rounds: u32) -> bool {
    is_probable_prime_with_rng(n, rounds, &mut rand::thread_rng())
}

/// Miller-Rabin primality test drawing witnesses from `rng`
pub fn is_probable_prime_with_rng<R>(n: &RsaBigInt, rounds: u32, rng: &mut R) -> bool
where
    R: RngCore + CryptoRng,
{
    if n < &RsaBigInt::from(2u8) {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^r with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    let two = RsaBigInt::from(2u8);

    'witness: for _ in 0..rounds {
        // Upper bound is exclusive, so a lands in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = mod_pow(&a, &d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..r {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a random prime of exactly `bits` bits
pub fn random_prime(bits: u64) -> RsaResult<RsaBigInt> {
    random_prime_with_rng(bits, DEFAULT_MR_ROUNDS, None, &mut rand::thread_rng())
}

/// Generate a random prime of exactly `bits` bits.
///
/// Each candidate has its top bit set (fixes the bit length) and its low bit
/// set (forces it odd). With `max_attempts` set, the search stops with
/// [`RsaError::GenerationFailed`] once that many candidates were rejected.
/// A `rounds` of zero is refused with [`RsaError::InvalidRounds`].
pub fn random_prime_with_rng<R>(
    bits: u64,
    rounds: u32,
    max_attempts: Option<u32>,
    rng: &mut R,
) -> RsaResult<RsaBigInt>
where
    R: RngCore + CryptoRng,
{
    if bits < 2 {
        return Err(RsaError::InvalidKeySize { bits, min: 2 });
    }
    if rounds == 0 {
        return Err(RsaError::InvalidRounds);
    }

    let top_bit = RsaBigInt::one() << (bits - 1);
    let mut attempts = 0u32;

    loop {
        if max_attempts.is_some_and(|cap| attempts >= cap) {
            return Err(RsaError::GenerationFailed { attempts });
        }
        attempts = attempts.saturating_add(1);

        let mut candidate = rng.gen_biguint(bits);
        candidate |= &top_bit;
        candidate |= RsaBigInt::one();

        if is_probable_prime_with_rng(&candidate, rounds, rng) {
            trace!("found {bits}-bit prime after {attempts} candidates");
            return Ok(candidate);
        }
    }
}
