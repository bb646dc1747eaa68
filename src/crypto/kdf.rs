//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects against brute-force and
//! GPU-based attacks.  Parameters are configurable via `Argon2Params`
//! (loaded from `.passvault.toml` or sensible defaults).

use std::time::Instant;

use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use zeroize::Zeroize;

use super::keys::{MasterKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Upper bounds.  Params are read back from the vault file, and a
/// doctored header must not be able to demand gigabytes of RAM.
pub const MAX_MEMORY_KIB: u32 = 1_048_576;
pub const MAX_ITERATIONS: u32 = 64;
pub const MAX_PARALLELISM: u32 = 64;

/// OWASP's minimum recommendation for Argon2id: 19 MiB with 2 passes.
pub const RECOMMENDED_MEMORY_KIB: u32 = 19_456;
pub const RECOMMENDED_ITERATIONS: u32 = 2;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.passvault.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl Argon2Params {
    /// Reject parameters that would make the KDF dangerously cheap, or
    /// absurdly expensive.
    pub fn validate(&self) -> Result<()> {
        if self.memory_kib < MIN_MEMORY_KIB {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.memory_kib
            )));
        }
        if self.iterations < 1 {
            return Err(PassVaultError::KeyDerivationFailed(
                "Argon2 iterations must be at least 1".into(),
            ));
        }
        if self.parallelism < 1 {
            return Err(PassVaultError::KeyDerivationFailed(
                "Argon2 parallelism must be at least 1".into(),
            ));
        }
        if self.memory_kib > MAX_MEMORY_KIB
            || self.iterations > MAX_ITERATIONS
            || self.parallelism > MAX_PARALLELISM
        {
            return Err(PassVaultError::KeyDerivationFailed(format!(
                "Argon2 params exceed the supported maximum \
                 ({MAX_MEMORY_KIB} KiB, {MAX_ITERATIONS} iterations, {MAX_PARALLELISM} lanes)"
            )));
        }
        Ok(())
    }

    /// Whether these params fall short of the OWASP Argon2id minimum.
    /// Still accepted, but worth a warning when a new vault is created.
    pub fn is_below_recommended(&self) -> bool {
        self.memory_kib < RECOMMENDED_MEMORY_KIB || self.iterations < RECOMMENDED_ITERATIONS
    }
}

/// Derive a 32-byte master key from a password and salt using Argon2id.
///
/// The same password + salt + params will always produce the same key,
/// which is what lets a vault written by one process be opened by the next.
pub fn derive_master_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    argon2_params: &Argon2Params,
) -> Result<MasterKey> {
    argon2_params.validate()?;

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let started = Instant::now();
    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut key)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}")))?;

    let master_key = MasterKey::new(key);
    key.zeroize();

    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        memory_kib = argon2_params.memory_kib,
        iterations = argon2_params.iterations,
        "derived master key"
    );

    Ok(master_key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}
