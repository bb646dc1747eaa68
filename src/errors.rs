use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Vault lifecycle errors ---
    #[error("No vault found at {0} — run `passvault init` first")]
    NotInitialized(PathBuf),

    #[error("Vault already exists at {0}")]
    AlreadyInitialized(PathBuf),

    /// Deliberately covers both a wrong master password and a damaged or
    /// tampered vault file.
    #[error("Could not unlock vault — wrong master password or corrupted vault file")]
    WrongPasswordOrCorrupt,

    #[error("Salt file {0} is missing but a vault exists — the vault cannot be decrypted without it")]
    SaltMissing(PathBuf),

    #[error("Salt file {0} is malformed (expected exactly 16 bytes)")]
    InvalidSalt(PathBuf),

    // --- Lookup errors ---
    #[error("No credentials stored for service '{0}'")]
    ServiceNotFound(String),

    #[error("No credential for user '{username}' under service '{service}'")]
    UsernameNotFound { service: String, username: String },

    #[error("The vault is empty — no credentials stored yet")]
    VaultEmpty,

    // --- Master password policy ---
    #[error("Master password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Password mismatch — passwords do not match")]
    PasswordMismatch,

    #[error("Master password cannot be empty")]
    EmptyMasterPassword,

    #[error("Invalid name: {0}")]
    InvalidName(String),

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The user backed out of a prompt (declined a confirmation or left
    /// a selection menu).
    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
