//! The on-disk vault blob file.
//!
//! `VaultStore` owns one path (`passwords.enc` by default) and moves
//! whole vaults in and out of it through the codec.  Every save
//! rewrites the file completely; there are no incremental updates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::codec::{self, BlobInfo};
use super::model::Vault;
use crate::crypto::kdf::Argon2Params;
use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Handle on the encrypted vault file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the blob file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a vault file is present at all.  An empty vault still exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and decrypt the vault.
    ///
    /// A missing file is `NotInitialized`; any decode failure is
    /// `WrongPasswordOrCorrupt`.
    pub fn load(&self, key: &MasterKey) -> Result<Vault> {
        self.load_with_info(key).map(|(vault, _)| vault)
    }

    /// Like `load`, also returning the blob's authenticated metadata.
    pub fn load_with_info(&self, key: &MasterKey) -> Result<(Vault, BlobInfo)> {
        let blob = self.read_blob()?;
        self.open(&blob, key)
    }

    /// The raw blob, still encrypted.  A missing file is `NotInitialized`.
    pub fn read_blob(&self) -> Result<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(blob) => Ok(blob),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PassVaultError::NotInitialized(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Decrypt a blob previously returned by `read_blob`.
    pub fn open(&self, blob: &[u8], key: &MasterKey) -> Result<(Vault, BlobInfo)> {
        match codec::decode_with_info(blob, key) {
            Ok((vault, info)) => {
                tracing::debug!(
                    services = vault.service_count(),
                    "vault decrypted"
                );
                Ok((vault, info))
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "vault failed to authenticate");
                Err(e.into())
            }
        }
    }

    /// Encrypt `vault` and replace the file atomically.  `kdf` is
    /// recorded in the blob and must be what `key` was derived with.
    pub fn save(&self, vault: &Vault, key: &MasterKey, kdf: &Argon2Params) -> Result<()> {
        let blob = codec::encode(vault, key, kdf)?;
        write_atomic(&self.path, &blob)?;
        tracing::debug!(
            services = vault.service_count(),
            bytes = blob.len(),
            "vault written"
        );
        Ok(())
    }
}

/// Write `bytes` to `path` **atomically**.
///
/// 1. Write to a uniquely named temp file in the same directory.
/// 2. Flush it to disk.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file, and the
/// unique name keeps concurrent writers out of each other's temp files.
/// A temp file that never gets persisted is removed when dropped.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return Err(PassVaultError::ConfigError(format!(
            "{} is not a file path",
            path.display()
        )));
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| PassVaultError::Storage(e.error))?;
    Ok(())
}
