// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod config;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod prime;
pub mod text;

pub use bigint::{mod_inverse, RsaBigInt};
pub use config::KeyGenConfig;
pub use decrypt::{decrypt_bytes, decrypt_int};
pub use encrypt::{encrypt_bytes, encrypt_int};
pub use error::{DecodeError, RsaError, RsaResult};
pub use keygen::{generate, generate_with_config, generate_with_rng, KeyPair};
pub use prime::{is_probable_prime, random_prime};
pub use text::{decrypt_base64_to_text, encrypt_text_to_base64};
