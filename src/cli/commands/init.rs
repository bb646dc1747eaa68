//! `passvault init` — create a new, empty vault.

use crate::cli::output;
use crate::cli::{open_manager, prompt_new_password, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, _settings) = open_manager(cli)?;

    // Check before prompting so the user doesn't type a password for nothing.
    if manager.is_initialized() {
        output::tip("Use `passvault add` to store credentials in the existing vault.");
        return Err(PassVaultError::AlreadyInitialized(
            manager.vault_store().path().to_path_buf(),
        ));
    }

    output::info("Create a master password to secure your credentials.");
    output::warning("If you forget this password, the stored credentials cannot be recovered.");

    let (password, confirm) = prompt_new_password()?;
    manager.initialize(&password, &confirm)?;

    output::success(&format!(
        "Vault created at {}",
        manager.vault_store().path().display()
    ));
    output::tip(&format!(
        "Keep {} next to the vault — without it the vault cannot be opened.",
        manager.salt_store().path().display()
    ));
    output::tip("Run `passvault add <SERVICE> <USERNAME>` to store a credential.");

    Ok(())
}
