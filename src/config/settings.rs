use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::generator::DEFAULT_LENGTH;
use crate::crypto::kdf::Argon2Params;
use crate::errors::{PassVaultError, Result};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the vault files.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the raw salt.
    #[serde(default = "default_salt_file")]
    pub salt_file: String,

    /// File name of the encrypted vault blob.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Length of generated passwords when none is given (default: 16).
    #[serde(default = "default_password_length")]
    pub default_password_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".".to_string()
}

fn default_salt_file() -> String {
    "salt.dat".to_string()
}

fn default_vault_file() -> String {
    "passwords.enc".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_password_length() -> usize {
    DEFAULT_LENGTH
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            salt_file: default_salt_file(),
            vault_file: default_vault_file(),
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            default_password_length: default_password_length(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    pub const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the salt file.
    ///
    /// Example: `project_dir/./salt.dat`
    pub fn salt_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir).join(&self.salt_file)
    }

    /// Full path to the vault blob.
    pub fn vault_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.vault_dir).join(&self.vault_file)
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> Argon2Params {
        Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }

    /// Build the explicit configuration a `VaultManager` is constructed from.
    pub fn vault_config(&self, project_dir: &Path) -> VaultConfig {
        VaultConfig {
            salt_path: self.salt_path(project_dir),
            vault_path: self.vault_path(project_dir),
            kdf: self.argon2_params(),
        }
    }
}

/// Where a vault lives and how its key is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub salt_path: PathBuf,
    pub vault_path: PathBuf,
    pub kdf: Argon2Params,
}

impl VaultConfig {
    /// `salt.dat` and `passwords.enc` inside `dir`, default KDF cost.
    pub fn in_dir(dir: &Path) -> Self {
        Settings::default().vault_config(dir)
    }

    /// Replace the KDF parameters.
    pub fn with_kdf(mut self, kdf: Argon2Params) -> Self {
        self.kdf = kdf;
        self
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.vault_dir, ".");
        assert_eq!(s.salt_file, "salt.dat");
        assert_eq!(s.vault_file, "passwords.enc");
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
        assert_eq!(s.default_password_length, 16);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_file, "passwords.enc");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
vault_dir = "secrets"
salt_file = "vault.salt"
vault_file = "vault.enc"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
default_password_length = 24
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.vault_dir, "secrets");
        assert_eq!(settings.salt_file, "vault.salt");
        assert_eq!(settings.vault_file, "vault.enc");
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
        assert_eq!(settings.default_password_length, 24);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "argon2_iterations = 7\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.argon2_iterations, 7);
        assert_eq!(settings.salt_file, "salt.dat");
        assert_eq!(settings.argon2_memory_kib, 65_536);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PassVaultError::ConfigError(_))));
    }

    #[test]
    fn vault_config_builds_both_paths() {
        let s = Settings {
            vault_dir: "secrets".to_string(),
            ..Settings::default()
        };
        let project = Path::new("/home/user/project");
        let config = s.vault_config(project);
        assert_eq!(
            config.salt_path,
            PathBuf::from("/home/user/project/secrets/salt.dat")
        );
        assert_eq!(
            config.vault_path,
            PathBuf::from("/home/user/project/secrets/passwords.enc")
        );
        assert_eq!(config.kdf, Argon2Params::default());
    }
}
