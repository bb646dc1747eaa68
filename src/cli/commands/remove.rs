//! `passvault remove` — delete a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_manager, prompt_password, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `remove` command.
pub fn execute(cli: &Cli, service: &str, username: &str, force: bool) -> Result<()> {
    let (manager, _settings) = open_manager(cli)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove password for {service} ({username})?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        ensure_confirmed(confirmed)?;
    }

    let master = prompt_password()?;
    manager.remove_credential(&master, service, username)?;

    output::success(&format!("Removed password for {service} ({username})"));

    Ok(())
}

fn ensure_confirmed(confirmed: bool) -> Result<()> {
    if confirmed {
        Ok(())
    } else {
        Err(PassVaultError::UserCancelled)
    }
}
