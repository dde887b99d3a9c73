// RSA Encryption Implementation
// Textbook (unpadded) RSA over fixed-size plaintext chunks

use super::bigint::{from_bytes, mod_pow, to_bytes_padded, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::keygen::KeyPair;

/// Encrypt a single integer: c = m^e mod n
///
/// Fails with [`RsaError::MessageOutOfRange`] unless `0 <= m < n`.
pub fn encrypt_int(keypair: &KeyPair, m: &RsaBigInt) -> RsaResult<RsaBigInt> {
    if m >= keypair.n() {
        return Err(RsaError::MessageOutOfRange);
    }
    Ok(mod_pow(m, keypair.e(), keypair.n()))
}

/// Encrypt bytes using the key pair.
///
/// The input is cut into chunks of `plain_block_len` bytes (the last one may
/// be shorter). Every chunk becomes exactly `modulus_len` ciphertext bytes,
/// left-padded with zeros. Empty input gives empty output.
pub fn encrypt_bytes(keypair: &KeyPair, plaintext: &[u8]) -> RsaResult<Vec<u8>> {
    let block = keypair.modulus_len();
    let chunks = plaintext.chunks(keypair.plain_block_len());
    let mut ciphertext = Vec::with_capacity(chunks.len() * block);

    for chunk in chunks {
        let m = from_bytes(chunk);
        if &m >= keypair.n() {
            return Err(RsaError::BlockTooLarge);
        }

        let c = mod_pow(&m, keypair.e(), keypair.n());
        let encoded = to_bytes_padded(&c, block).ok_or(RsaError::BlockTooLarge)?;
        ciphertext.extend_from_slice(&encoded);
    }

    Ok(ciphertext)
}
