//! The public entry point to the credential vault.
//!
//! `VaultManager` holds no unlocked state between calls.  Every operation
//! derives the key from the master password, decrypts the whole vault,
//! does its work and (for mutations) re-encrypts and rewrites it.  The
//! key and the plaintext are dropped, and wiped, before the call returns.
//!
//! Two processes mutating the same vault concurrently race: the last
//! writer wins and the other change is lost.  There is no file locking.

use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

use super::codec::{self, BlobInfo};
use super::model::{Lookup, Vault};
use super::salt::SaltStore;
use super::store::VaultStore;
use crate::config::VaultConfig;
use crate::crypto::generator::{self, GeneratorOptions};
use crate::crypto::kdf::{derive_master_key, Argon2Params};
use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Minimum master password length, in characters.
pub const MIN_MASTER_PASSWORD_LEN: usize = 8;

/// What `add_credential` did.
pub struct AddedCredential {
    /// The password that was stored (generated or caller-supplied).
    pub password: String,
    /// `true` if an existing password for the same pair was overwritten.
    pub replaced: bool,
    /// Set when a generated password's requested length was raised.
    pub clamped_from: Option<usize>,
}

/// Summary returned by `status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStatus {
    pub written_at: DateTime<Utc>,
    pub services: usize,
    pub credentials: usize,
    /// The Argon2 params recorded in the vault file.
    pub kdf: Argon2Params,
}

/// Orchestrates salt, key derivation, codec and file for one vault.
///
/// The configured KDF params only apply to `initialize`.  An existing
/// vault is always opened, and rewritten, with the params stored in it.
#[derive(Debug, Clone)]
pub struct VaultManager {
    salts: SaltStore,
    store: VaultStore,
    kdf: Argon2Params,
}

/// A decrypted vault plus everything needed to write it back.
struct Unlocked {
    vault: Vault,
    key: MasterKey,
    info: BlobInfo,
}

impl VaultManager {
    pub fn new(config: VaultConfig) -> Self {
        Self {
            salts: SaltStore::new(config.salt_path),
            store: VaultStore::new(config.vault_path),
            kdf: config.kdf,
        }
    }

    pub fn salt_store(&self) -> &SaltStore {
        &self.salts
    }

    pub fn vault_store(&self) -> &VaultStore {
        &self.store
    }

    /// Whether a vault blob exists on disk.
    pub fn is_initialized(&self) -> bool {
        self.store.exists()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Create an empty vault protected by `master_password`.
    ///
    /// Fails with `AlreadyInitialized` if a vault exists; the existing file
    /// is left untouched.  Policy checks run before any key derivation.
    pub fn initialize(&self, master_password: &str, confirmation: &str) -> Result<()> {
        if self.store.exists() {
            return Err(PassVaultError::AlreadyInitialized(
                self.store.path().to_path_buf(),
            ));
        }

        validate_new_master_password(master_password, confirmation)?;
        self.kdf.validate()?;
        if self.kdf.is_below_recommended() {
            tracing::warn!(
                memory_kib = self.kdf.memory_kib,
                iterations = self.kdf.iterations,
                "Argon2 params are below the OWASP minimum (19456 KiB, 2 iterations)"
            );
        }

        let salt = self.salts.get_or_create()?;
        let key = derive_master_key(master_password.as_bytes(), &salt, &self.kdf)?;
        self.store.save(&Vault::new(), &key, &self.kdf)?;

        tracing::info!(path = %self.store.path().display(), "vault initialized");
        Ok(())
    }

    /// Store a credential, generating the password when `password` is `None`.
    ///
    /// An existing password for the same `(service, username)` is
    /// overwritten without complaint; `AddedCredential::replaced` says
    /// whether that happened.
    pub fn add_credential(
        &self,
        master_password: &str,
        service: &str,
        username: &str,
        password: Option<&str>,
        options: &GeneratorOptions,
    ) -> Result<AddedCredential> {
        validate_name("service", service)?;
        validate_name("username", username)?;

        let mut unlocked = self.unlock(master_password)?;

        let (password, clamped_from) = match password {
            Some(p) => (p.to_string(), None),
            None => {
                let generated = generator::generate(options);
                (generated.password, generated.clamped_from)
            }
        };

        let replaced = unlocked.vault.upsert(service, username, &password);
        self.write_back(&unlocked)?;

        tracing::info!(replaced, "credential stored");
        Ok(AddedCredential {
            password,
            replaced,
            clamped_from,
        })
    }

    /// Look up credentials.
    ///
    /// With a service, returns that service's username -> password map,
    /// all usernames included.  Without one, returns every service.
    pub fn get_credential(&self, master_password: &str, service: Option<&str>) -> Result<Lookup> {
        let Unlocked { vault, .. } = self.unlock(master_password)?;

        if vault.is_empty() {
            return Err(PassVaultError::VaultEmpty);
        }

        match service {
            None => Ok(Lookup::Services(vault.services().clone())),
            Some(name) => vault
                .credentials(name)
                .cloned()
                .map(Lookup::Credentials)
                .ok_or_else(|| PassVaultError::ServiceNotFound(name.to_string())),
        }
    }

    /// Delete one credential.  A service with no usernames left disappears.
    pub fn remove_credential(
        &self,
        master_password: &str,
        service: &str,
        username: &str,
    ) -> Result<()> {
        let mut unlocked = self.unlock(master_password)?;

        match unlocked.vault.remove(service, username) {
            None => return Err(PassVaultError::ServiceNotFound(service.to_string())),
            Some(false) => {
                return Err(PassVaultError::UsernameNotFound {
                    service: service.to_string(),
                    username: username.to_string(),
                })
            }
            Some(true) => {}
        }

        self.write_back(&unlocked)?;
        tracing::info!("credential removed");
        Ok(())
    }

    /// Unlock the vault and report its size and last write time.
    pub fn status(&self, master_password: &str) -> Result<VaultStatus> {
        let Unlocked { vault, info, .. } = self.unlock(master_password)?;

        Ok(VaultStatus {
            written_at: info.written_at,
            services: vault.service_count(),
            credentials: vault.credential_count(),
            kdf: info.kdf,
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Open an existing vault.  Never creates a salt.
    ///
    /// The key is derived with the Argon2 params read from the blob, so
    /// the same password keeps working whatever the config says now.
    fn unlock(&self, master_password: &str) -> Result<Unlocked> {
        if master_password.is_empty() {
            return Err(PassVaultError::EmptyMasterPassword);
        }
        if !self.store.exists() {
            return Err(PassVaultError::NotInitialized(
                self.store.path().to_path_buf(),
            ));
        }

        let salt = self
            .salts
            .load()?
            .ok_or_else(|| PassVaultError::SaltMissing(self.salts.path().to_path_buf()))?;

        let blob = self.store.read_blob()?;
        let kdf = codec::kdf_params(&blob).map_err(|e| {
            tracing::warn!(path = %self.store.path().display(), "vault header rejected");
            PassVaultError::from(e)
        })?;
        if kdf != self.kdf {
            tracing::debug!(
                memory_kib = kdf.memory_kib,
                iterations = kdf.iterations,
                parallelism = kdf.parallelism,
                "opening vault with its stored Argon2 params"
            );
        }

        let key = derive_master_key(master_password.as_bytes(), &salt, &kdf)?;
        let (vault, info) = self.store.open(&blob, &key)?;
        Ok(Unlocked { vault, key, info })
    }

    fn write_back(&self, unlocked: &Unlocked) -> Result<()> {
        self.store
            .save(&unlocked.vault, &unlocked.key, &unlocked.info.kdf)
    }
}

/// Check a new master password against policy: non-empty, at least
/// `MIN_MASTER_PASSWORD_LEN` characters, and equal to its confirmation.
pub fn validate_new_master_password(password: &str, confirmation: &str) -> Result<()> {
    if password.is_empty() {
        return Err(PassVaultError::EmptyMasterPassword);
    }
    if password.chars().count() < MIN_MASTER_PASSWORD_LEN {
        return Err(PassVaultError::PasswordTooShort(MIN_MASTER_PASSWORD_LEN));
    }
    if !bool::from(password.as_bytes().ct_eq(confirmation.as_bytes())) {
        return Err(PassVaultError::PasswordMismatch);
    }
    Ok(())
}

fn validate_name(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PassVaultError::InvalidName(format!("{kind} cannot be empty")));
    }
    Ok(())
}
