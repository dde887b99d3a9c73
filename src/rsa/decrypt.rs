// RSA Decryption Implementation
// Inverse of the block encryption: m = c^d mod n per fixed-width block

use super::bigint::{from_bytes, mod_pow, to_bytes_minimal, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::keygen::KeyPair;

/// Decrypt a single integer: m = c^d mod n
pub fn decrypt_int(keypair: &KeyPair, c: &RsaBigInt) -> RsaBigInt {
    mod_pow(c, keypair.d(), keypair.n())
}

/// Decrypt ciphertext bytes using the key pair.
///
/// Each decrypted block is emitted with the fewest bytes that represent it.
/// Leading zero bytes of a plaintext chunk therefore do not survive a round
/// trip: `[0x00, 0x01]` comes back as `[0x01]`, and an all-zero chunk comes
/// back empty. The ciphertext carries no length information to recover them.
pub fn decrypt_bytes(keypair: &KeyPair, ciphertext: &[u8]) -> RsaResult<Vec<u8>> {
    let block = keypair.modulus_len();
    if ciphertext.len() % block != 0 {
        return Err(RsaError::InvalidCiphertextLength {
            len: ciphertext.len(),
            block,
        });
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len() / block * keypair.plain_block_len());
    for chunk in ciphertext.chunks_exact(block) {
        let c = from_bytes(chunk);
        let m = decrypt_int(keypair, &c);
        plaintext.extend_from_slice(&to_bytes_minimal(&m));
    }

    Ok(plaintext)
}
