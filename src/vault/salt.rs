//! The persisted KDF salt.
//!
//! The salt lives in its own file (`salt.dat`, 16 raw bytes, no header).
//! It is created once, when the vault is initialized, and only read after
//! that.  Losing or regenerating it makes the existing vault blob
//! permanently undecryptable, so only `get_or_create` may ever write it.

use std::fs;
use std::path::{Path, PathBuf};

use super::store::write_atomic;
use crate::crypto::kdf::{generate_salt, SALT_LEN};
use crate::errors::{PassVaultError, Result};

/// Handle on the salt file.
#[derive(Debug, Clone)]
pub struct SaltStore {
    path: PathBuf,
}

impl SaltStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the persisted salt, or `None` if the file does not exist.
    pub fn load(&self) -> Result<Option<[u8; SALT_LEN]>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let salt: [u8; SALT_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| PassVaultError::InvalidSalt(self.path.clone()))?;
        Ok(Some(salt))
    }

    /// Return the persisted salt, generating and writing a new one if
    /// none exists yet.
    pub fn get_or_create(&self) -> Result<[u8; SALT_LEN]> {
        if let Some(salt) = self.load()? {
            tracing::debug!(path = %self.path.display(), "loaded existing salt");
            return Ok(salt);
        }

        let salt = generate_salt();
        write_atomic(&self.path, &salt)?;
        tracing::info!(path = %self.path.display(), "created new salt");
        Ok(salt)
    }
}
