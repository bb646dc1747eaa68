//! `passvault status` — report whether a vault exists and how big it is.

use crate::cli::output;
use crate::cli::{open_manager, prompt_password, Cli};
use crate::errors::Result;

/// Execute the `status` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let (manager, _settings) = open_manager(cli)?;

    if !manager.is_initialized() {
        output::info(&format!(
            "No vault at {}",
            manager.vault_store().path().display()
        ));
        output::tip("Run `passvault init` to create one.");
        return Ok(());
    }

    let master = prompt_password()?;
    let status = manager.status(&master)?;

    output::success(&format!(
        "Vault unlocked: {} service(s), {} credential(s)",
        status.services, status.credentials
    ));
    output::info(&format!(
        "Last written {}",
        status.written_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output::info(&format!(
        "Argon2id: {} KiB, {} iteration(s), {} lane(s)",
        status.kdf.memory_kib, status.kdf.iterations, status.kdf.parallelism
    ));

    Ok(())
}
