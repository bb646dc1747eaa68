//! CLI module — Clap argument parser, output helpers, and command implementations.
//!
//! This is the only layer that talks to a terminal.  Prompting for the
//! master password, choosing between several services or usernames, and
//! printing credentials all happen here; the vault core only returns data.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::generator::GeneratorOptions;
use crate::errors::{PassVaultError, Result};
use crate::vault::{validate_new_master_password, VaultManager};

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "PASSVAULT_PASSWORD";

/// PassVault CLI: local encrypted credential vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding .passvault.toml and the vault files (default: .)
    #[arg(short, long, default_value = ".", global = true)]
    pub dir: PathBuf,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault protected by a master password
    Init,

    /// Store a credential (add or overwrite)
    Add {
        /// Service name (e.g. github)
        service: String,
        /// Username for the service
        username: String,
        /// Password to store (omit for piped stdin or an interactive prompt)
        #[arg(short, long, conflicts_with = "generate")]
        password: Option<String>,
        /// Generate a random password instead of entering one
        #[arg(short, long)]
        generate: bool,
        #[command(flatten)]
        options: GenerateArgs,
    },

    /// Show stored credentials (prompts for a choice when ambiguous)
    Get {
        /// Service name (omit to choose from all services)
        service: Option<String>,
        /// Print every username for the service instead of prompting
        #[arg(short, long)]
        all: bool,
    },

    /// List stored services and usernames (no passwords)
    List,

    /// Remove a credential
    Remove {
        /// Service name
        service: String,
        /// Username to remove
        username: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password without storing it
    Generate {
        #[command(flatten)]
        options: GenerateArgs,
    },

    /// Show whether a vault exists and when it was last written
    Status,
}

/// Password generator flags shared by `add --generate` and `generate`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Password length (minimum 8; default from config, normally 16)
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Leave out uppercase letters
    #[arg(long)]
    pub no_uppercase: bool,
    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,
    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,
}

impl GenerateArgs {
    /// Turn the flags into generator options, filling the length from settings.
    pub fn to_options(&self, settings: &Settings) -> GeneratorOptions {
        GeneratorOptions {
            length: self.length.unwrap_or(settings.default_password_length),
            uppercase: !self.no_uppercase,
            digits: !self.no_digits,
            symbols: !self.no_symbols,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `--dir` and build the manager for that vault.
pub fn open_manager(cli: &Cli) -> Result<(VaultManager, Settings)> {
    let settings = Settings::load(&cli.dir)?;
    let manager = VaultManager::new(settings.vault_config(&cli.dir));
    Ok((manager, settings))
}

/// Get the master password, trying in order:
/// 1. `PASSVAULT_PASSWORD` env var (scripts and tests)
/// 2. Interactive prompt without echo
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password and its confirmation (used during `init`).
///
/// Also respects `PASSVAULT_PASSWORD` for scripted usage, in which case the
/// confirmation is the same value.  Interactive entry repeats until the
/// pair passes the master password policy.
pub fn prompt_new_password() -> Result<(Zeroizing<String>, Zeroizing<String>)> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            let confirm = Zeroizing::new(pw.clone());
            return Ok((Zeroizing::new(pw), confirm));
        }
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Create master password")
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );
        let confirm = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Confirm master password")
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        match validate_new_master_password(&password, &confirm) {
            Ok(()) => return Ok((password, confirm)),
            Err(
                e @ (PassVaultError::PasswordTooShort(_)
                | PassVaultError::PasswordMismatch
                | PassVaultError::EmptyMasterPassword),
            ) => {
                output::warning(&format!("{e}. Try again."));
            }
            Err(e) => return Err(e),
        }
    }
}
