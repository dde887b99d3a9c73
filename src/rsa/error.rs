// RSA Error Types
// Every failure the key generator and block codec can report

use thiserror::Error;

/// Errors returned by key generation and the block codec
#[derive(Debug, Error)]
pub enum RsaError {
    /// `gcd(a, m) != 1`, so `a` has no inverse modulo `m`
    #[error("no modular inverse exists")]
    NoInverse,

    /// A plaintext chunk interpreted as an integer is not below the modulus
    #[error("plaintext block is not smaller than the modulus")]
    BlockTooLarge,

    /// Ciphertext is not a whole number of modulus-sized blocks
    #[error("ciphertext length {len} is not a multiple of the block size {block}")]
    InvalidCiphertextLength { len: usize, block: usize },

    /// Raw integer message is not in `[0, n)`
    #[error("message out of range")]
    MessageOutOfRange,

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The configured attempt cap ran out during key generation.
    ///
    /// From the prime search `attempts` counts rejected prime candidates;
    /// from the key pair loop it counts discarded `(p, q)` pairs.
    #[error("key generation gave up after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    #[error("invalid key size: {bits} bits (minimum {min})")]
    InvalidKeySize { bits: u64, min: u64 },

    /// Public exponent must be odd and at least 3
    #[error("invalid public exponent")]
    InvalidExponent,

    /// Zero Miller-Rabin rounds would accept any odd composite past trial division
    #[error("Miller-Rabin round count must be at least 1")]
    InvalidRounds,

    /// Equal primes, or a modulus too small to hold a single plaintext byte
    #[error("degenerate key parameters")]
    DegenerateKey,
}

/// Failures of the text adapter when turning ciphertext back into a string
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<base64::DecodeError> for RsaError {
    fn from(e: base64::DecodeError) -> Self {
        RsaError::Decode(DecodeError::Base64(e))
    }
}

impl From<std::string::FromUtf8Error> for RsaError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        RsaError::Decode(DecodeError::Utf8(e))
    }
}

/// Result type for RSA operations
pub type RsaResult<T> = Result<T, RsaError>;
