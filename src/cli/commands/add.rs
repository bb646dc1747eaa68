//! `passvault add` — store a credential, typed in or generated.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_manager, prompt_password, Cli, GenerateArgs};
use crate::errors::{PassVaultError, Result};

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    service: &str,
    username: &str,
    password: Option<&str>,
    generate: bool,
    options: &GenerateArgs,
) -> Result<()> {
    let (manager, settings) = open_manager(cli)?;

    // Determine the password from one of four sources.
    let supplied: Option<Zeroizing<String>> = if let Some(p) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        Some(Zeroizing::new(p.to_string()))
    } else if generate {
        // Source 2: Generated by the vault.
        None
    } else if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(PassVaultError::CommandFailed(
                "no password on stdin — pass --generate to create one".into(),
            ));
        }
        Some(Zeroizing::new(trimmed.to_string()))
    } else {
        // Source 4: Interactive secure prompt.
        let entered = dialoguer::Password::new()
            .with_prompt(format!("Password for {username} @ {service}"))
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?;
        Some(Zeroizing::new(entered))
    };

    let master = prompt_password()?;
    let added = manager.add_credential(
        &master,
        service,
        username,
        supplied.as_deref().map(String::as_str),
        &options.to_options(&settings),
    )?;

    if let Some(requested) = added.clamped_from {
        output::warning(&format!(
            "Password length {requested} is below the minimum; generated {} characters.",
            added.password.len()
        ));
    }
    if supplied.is_none() {
        output::info(&format!("Generated password: {}", added.password));
    }

    if added.replaced {
        output::success(&format!(
            "Password for {service} ({username}) updated — the previous one was overwritten."
        ));
    } else {
        output::success(&format!("Password for {service} ({username}) saved."));
    }

    Ok(())
}
