// Text Helpers
// UTF-8 and Base64 wrapping around the block codec

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use super::decrypt::decrypt_bytes;
use super::encrypt::encrypt_bytes;
use super::error::RsaResult;
use super::keygen::KeyPair;

/// Encrypt a string and encode the ciphertext as padded standard Base64
pub fn encrypt_text_to_base64(keypair: &KeyPair, text: &str) -> RsaResult<String> {
    let ciphertext = encrypt_bytes(keypair, text.as_bytes())?;
    Ok(BASE64.encode(ciphertext))
}

/// Decode Base64 ciphertext, decrypt it and read the result as UTF-8.
///
/// Decoding is strict: the input must be padded standard Base64 with no
/// whitespace or line breaks, otherwise [`RsaError::Decode`] is returned.
///
/// [`RsaError::Decode`]: super::error::RsaError::Decode
pub fn decrypt_base64_to_text(keypair: &KeyPair, b64: &str) -> RsaResult<String> {
    let ciphertext = BASE64.decode(b64)?;
    let plaintext = decrypt_bytes(keypair, &ciphertext)?;
    Ok(String::from_utf8(plaintext)?)
}
