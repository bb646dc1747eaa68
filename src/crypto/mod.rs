//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - The zeroize-on-drop master key wrapper (`keys`)
//! - The constrained random password generator (`generator`)

pub mod encryption;
pub mod generator;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_master_key, ...};
pub use encryption::{decrypt, encrypt};
pub use generator::{generate, GeneratedPassword, GeneratorOptions};
pub use kdf::{derive_master_key, generate_salt, Argon2Params, SALT_LEN};
pub use keys::MasterKey;
