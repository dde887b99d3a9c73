//! Textbook RSA.
//!
//! Miller-Rabin prime generation, key pair derivation and fixed-width block
//! encryption of arbitrary byte streams, plus a UTF-8/Base64 text layer.
//!
//! No padding (OAEP, PKCS#1) is applied, there is no message authentication and
//! no side-channel hardening. Encryption is deterministic and malleable. Use it
//! to learn how RSA works, never to protect data.
//!
//! ```no_run
//! let keypair = rsa_edu::generate(1024, 65537)?;
//! let b64 = keypair.encrypt_text("Привіт, RSA!")?;
//! assert_eq!(keypair.decrypt_text(&b64)?, "Привіт, RSA!");
//! # Ok::<(), rsa_edu::RsaError>(())
//! ```

pub mod rsa;

pub use rsa::*;
