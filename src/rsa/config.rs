// Key Generation Configuration
// Tunables for modulus size, public exponent and search limits

use super::bigint::{from_u64, RsaBigInt};
use super::prime::DEFAULT_MR_ROUNDS;

/// Default modulus size in bits
pub const DEFAULT_BITS: u64 = 1024;

/// Default public exponent (F4)
pub const DEFAULT_EXPONENT: u64 = 65537;

/// Smallest modulus size accepted by the generator
pub const MIN_MODULUS_BITS: u64 = 16;

/// Configuration for key pair generation
#[derive(Clone, Debug)]
pub struct KeyGenConfig {
    /// Total modulus bit length; each prime gets half
    pub bits: u64,
    pub exponent: RsaBigInt,
    /// Miller-Rabin rounds per candidate
    pub rounds: u32,
    /// Cap on prime candidates per prime and on pair restarts.
    /// `None` searches until it succeeds.
    pub max_attempts: Option<u32>,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            exponent: from_u64(DEFAULT_EXPONENT),
            rounds: DEFAULT_MR_ROUNDS,
            max_attempts: None,
        }
    }
}

impl KeyGenConfig {
    pub fn new(bits: u64, exponent: u64) -> Self {
        Self::default().with_bits(bits).with_exponent(exponent)
    }

    pub fn with_bits(mut self, bits: u64) -> Self {
        self.bits = bits;
        self
    }

    pub fn with_exponent(mut self, exponent: u64) -> Self {
        self.exponent = from_u64(exponent);
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}
