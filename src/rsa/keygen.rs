// RSA Key Generation
// Implements RSA key pair generation and the immutable KeyPair value

use std::fmt;

use log::{debug, info};
use num_integer::Integer;
use num_traits::One;
use rand::{CryptoRng, RngCore};

use super::bigint::{bit_length, from_u64, gcd, mod_inverse, RsaBigInt};
use super::config::{KeyGenConfig, MIN_MODULUS_BITS};
use super::error::{RsaError, RsaResult};
use super::prime::random_prime_with_rng;

/// RSA key pair with its block sizes derived once at construction.
///
/// The value never changes after it is built, so it can be shared between
/// threads freely. This is textbook RSA: no padding is applied anywhere, so
/// encryption is deterministic and malleable.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    n: RsaBigInt,
    e: RsaBigInt,
    d: RsaBigInt,
    p: RsaBigInt,
    q: RsaBigInt,
    modulus_len: usize,
    plain_block_len: usize,
}

impl KeyPair {
    /// Build a key pair from two primes and a public exponent.
    ///
    /// Primality of `p` and `q` is not checked. Fails with
    /// [`RsaError::NoInverse`] when `e` is not coprime to φ(n), and with
    /// [`RsaError::DegenerateKey`] when `p == q` or the modulus is too small to
    /// carry a single plaintext byte.
    pub fn from_primes(p: RsaBigInt, q: RsaBigInt, e: RsaBigInt) -> RsaResult<Self> {
        let two = from_u64(2);
        if p == q || p < two || q < two {
            return Err(RsaError::DegenerateKey);
        }

        let n = &p * &q;
        let phi = (&p - 1u8) * (&q - 1u8);
        let d = mod_inverse(&e, &phi)?;

        let bits = bit_length(&n);
        let modulus_len = bits.div_ceil(8) as usize;
        let plain_block_len = ((bits - 1) / 8) as usize;
        if plain_block_len == 0 {
            return Err(RsaError::DegenerateKey);
        }

        Ok(Self {
            n,
            e,
            d,
            p,
            q,
            modulus_len,
            plain_block_len,
        })
    }

    /// Modulus
    pub fn n(&self) -> &RsaBigInt {
        &self.n
    }

    /// Public exponent
    pub fn e(&self) -> &RsaBigInt {
        &self.e
    }

    /// Private exponent
    pub fn d(&self) -> &RsaBigInt {
        &self.d
    }

    pub fn p(&self) -> &RsaBigInt {
        &self.p
    }

    pub fn q(&self) -> &RsaBigInt {
        &self.q
    }

    /// Width of every ciphertext block in bytes
    pub fn modulus_len(&self) -> usize {
        self.modulus_len
    }

    /// Largest plaintext chunk whose integer value is guaranteed below n
    pub fn plain_block_len(&self) -> usize {
        self.plain_block_len
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        bit_length(&self.n)
    }

    /// Encrypt bytes with this key
    pub fn encrypt(&self, plaintext: &[u8]) -> RsaResult<Vec<u8>> {
        super::encrypt::encrypt_bytes(self, plaintext)
    }

    /// Decrypt bytes with this key
    pub fn decrypt(&self, ciphertext: &[u8]) -> RsaResult<Vec<u8>> {
        super::decrypt::decrypt_bytes(self, ciphertext)
    }

    /// Encrypt a string and return the ciphertext as Base64
    pub fn encrypt_text(&self, text: &str) -> RsaResult<String> {
        super::text::encrypt_text_to_base64(self, text)
    }

    /// Decrypt Base64 ciphertext back into a string
    pub fn decrypt_text(&self, b64: &str) -> RsaResult<String> {
        super::text::decrypt_base64_to_text(self, b64)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("n", &hex::encode(self.n.to_bytes_be()))
            .field("e", &self.e)
            .field("d", &"<redacted>")
            .field("modulus_len", &self.modulus_len)
            .field("plain_block_len", &self.plain_block_len)
            .finish_non_exhaustive()
    }
}

/// Generate an RSA key pair with a `bits`-bit modulus and public exponent `e`
pub fn generate(bits: u64, e: u64) -> RsaResult<KeyPair> {
    generate_with_config(&KeyGenConfig::new(bits, e))
}

/// Generate an RSA key pair using the thread-local CSPRNG
pub fn generate_with_config(config: &KeyGenConfig) -> RsaResult<KeyPair> {
    generate_with_rng(config, &mut rand::thread_rng())
}

/// Generate an RSA key pair drawing all randomness from `rng`.
///
/// Both primes are thrown away and redrawn when they are equal or when φ(n)
/// shares a factor with `e`.
pub fn generate_with_rng<R>(config: &KeyGenConfig, rng: &mut R) -> RsaResult<KeyPair>
where
    R: RngCore + CryptoRng,
{
    if config.bits < MIN_MODULUS_BITS {
        return Err(RsaError::InvalidKeySize {
            bits: config.bits,
            min: MIN_MODULUS_BITS,
        });
    }

    let e = &config.exponent;
    if e < &from_u64(3) || e.is_even() {
        return Err(RsaError::InvalidExponent);
    }

    if config.rounds == 0 {
        return Err(RsaError::InvalidRounds);
    }

    let half_bits = config.bits / 2;
    let mut attempts = 0u32;

    loop {
        if config.max_attempts.is_some_and(|cap| attempts >= cap) {
            return Err(RsaError::GenerationFailed { attempts });
        }
        attempts = attempts.saturating_add(1);

        let p = random_prime_with_rng(half_bits, config.rounds, config.max_attempts, rng)?;
        let q = random_prime_with_rng(half_bits, config.rounds, config.max_attempts, rng)?;

        if p == q {
            debug!("drew the same {half_bits}-bit prime twice, retrying");
            continue;
        }

        let phi = (&p - 1u8) * (&q - 1u8);
        if !gcd(e, &phi).is_one() {
            debug!("e = {e} is not coprime with φ(n), discarding both primes");
            continue;
        }

        let keypair = KeyPair::from_primes(p, q, e.clone())?;
        info!(
            "generated {}-bit RSA modulus after {attempts} attempt(s)",
            keypair.bit_length()
        );
        return Ok(keypair);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn textbook_key() -> KeyPair {
        KeyPair::from_primes(from_u64(61), from_u64(53), from_u64(17)).unwrap()
    }

    #[test]
    fn test_from_primes_textbook() {
        let key = textbook_key();
        assert_eq!(key.n(), &from_u64(3233));
        assert_eq!(key.d(), &from_u64(2753));
        assert_eq!(key.bit_length(), 12);
        assert_eq!(key.modulus_len(), 2);
        assert_eq!(key.plain_block_len(), 1);
    }

    #[test]
    fn test_from_primes_rejects_equal_primes() {
        let result = KeyPair::from_primes(from_u64(61), from_u64(61), from_u64(17));
        assert!(matches!(result, Err(RsaError::DegenerateKey)));
    }

    #[test]
    fn test_from_primes_rejects_tiny_modulus() {
        // n = 6 has three bits, too few for a one-byte plaintext block
        let result = KeyPair::from_primes(from_u64(2), from_u64(3), from_u64(5));
        assert!(matches!(result, Err(RsaError::DegenerateKey)));
    }

    #[test]
    fn test_from_primes_not_coprime() {
        // φ = 6 * 10 = 60 shares the factor 3 with e
        let result = KeyPair::from_primes(from_u64(7), from_u64(11), from_u64(3));
        assert!(matches!(result, Err(RsaError::NoInverse)));
    }

    #[test]
    fn test_key_generation() {
        let keypair = generate(512, 65537).unwrap();

        assert!(keypair.bit_length() == 511 || keypair.bit_length() == 512);
        assert_eq!(keypair.e(), &from_u64(65537));
        assert!(keypair.plain_block_len() > 0);
        assert!(keypair.plain_block_len() < keypair.modulus_len());
    }

    #[test]
    fn test_key_properties() {
        let mut rng = StdRng::seed_from_u64(42);
        let keypair = generate_with_rng(&KeyGenConfig::new(256, 17), &mut rng).unwrap();

        // n = p * q with p != q
        assert_ne!(keypair.p(), keypair.q());
        assert_eq!(keypair.n(), &(keypair.p() * keypair.q()));

        // e * d ≡ 1 (mod φ(n))
        let phi_n = (keypair.p() - 1u8) * (keypair.q() - 1u8);
        assert!(gcd(keypair.e(), &phi_n).is_one());
        assert!(((keypair.e() * keypair.d()) % &phi_n).is_one());

        // plaintext blocks always fit below n
        assert!(keypair.plain_block_len() as u64 * 8 <= keypair.bit_length() - 1);
        assert_eq!(keypair.modulus_len() as u64, keypair.bit_length().div_ceil(8));
    }

    #[test]
    fn test_small_exponent_retries() {
        // e = 3 divides φ(n) for roughly half of all prime pairs
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5 {
            let keypair = generate_with_rng(&KeyGenConfig::new(64, 3), &mut rng).unwrap();
            let phi_n = (keypair.p() - 1u8) * (keypair.q() - 1u8);
            assert!(gcd(keypair.e(), &phi_n).is_one());
        }
    }

    #[test]
    fn test_minimum_size_key() {
        let keypair = generate(MIN_MODULUS_BITS, 65537).unwrap();
        assert_eq!(keypair.plain_block_len(), 1);
        assert_eq!(keypair.modulus_len(), 2);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            generate(8, 65537),
            Err(RsaError::InvalidKeySize { bits: 8, min: 16 })
        ));
        assert!(matches!(generate(64, 4), Err(RsaError::InvalidExponent)));
        assert!(matches!(generate(64, 1), Err(RsaError::InvalidExponent)));
    }

    #[test]
    fn test_attempt_cap() {
        let config = KeyGenConfig::new(128, 65537).with_max_attempts(0);
        assert!(matches!(
            generate_with_config(&config),
            Err(RsaError::GenerationFailed { attempts: 0 })
        ));
    }

    #[test]
    fn test_attempt_cap_exhausted_by_real_candidates() {
        // one candidate per 256-bit prime is almost never enough
        let mut rng = StdRng::seed_from_u64(5);
        let config = KeyGenConfig::new(512, 65537).with_max_attempts(1);
        assert!(matches!(
            generate_with_rng(&config, &mut rng),
            Err(RsaError::GenerationFailed { attempts: 1 })
        ));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = KeyGenConfig::new(128, 65537).with_rounds(0);
        for _ in 0..20 {
            assert!(matches!(
                generate_with_rng(&config, &mut rng),
                Err(RsaError::InvalidRounds)
            ));
        }
    }

    #[test]
    fn test_generated_keys_roundtrip_with_one_round() {
        // the smallest accepted round count still has to produce working keys
        let mut rng = StdRng::seed_from_u64(5);
        let config = KeyGenConfig::new(128, 65537).with_rounds(1);
        let keypair = generate_with_rng(&config, &mut rng).unwrap();
        let ciphertext = keypair.encrypt(b"hello world!").unwrap();
        assert_eq!(keypair.decrypt(&ciphertext).unwrap(), b"hello world!");
    }

    #[test]
    fn test_debug_redacts_private_exponent() {
        let key = textbook_key();
        let shown = format!("{key:?}");
        assert!(shown.contains("0ca1")); // 3233 in hex
        assert!(!shown.contains("2753"));
    }
}
