//! `passvault list` — show services and usernames without passwords.

use crate::cli::output;
use crate::cli::{open_manager, prompt_password, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::Lookup;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, _settings) = open_manager(cli)?;
    let master = prompt_password()?;

    let lookup = match manager.get_credential(&master, None) {
        Ok(lookup) => lookup,
        Err(PassVaultError::VaultEmpty) => {
            output::info("No credentials stored yet.");
            output::tip("Run `passvault add <SERVICE> <USERNAME>` to store one.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let Lookup::Services(services) = lookup else {
        return Err(PassVaultError::CommandFailed(
            "expected the full service list".into(),
        ));
    };

    output::info(&format!("{} service(s) stored", services.len()));
    output::print_services_table(&services);

    Ok(())
}
