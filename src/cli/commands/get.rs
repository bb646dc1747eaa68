//! `passvault get` — show a stored credential.
//!
//! The vault returns every candidate; picking one (service, then
//! username) is done here with a numbered menu.

use crate::cli::output;
use crate::cli::{open_manager, prompt_password, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::{Credentials, Lookup};

/// Execute the `get` command.
pub fn execute(cli: &Cli, service: Option<&str>, all: bool) -> Result<()> {
    let (manager, _settings) = open_manager(cli)?;
    let master = prompt_password()?;

    match (service, manager.get_credential(&master, service)?) {
        (Some(name), Lookup::Credentials(credentials)) => show_service(name, &credentials, all),
        (_, Lookup::Services(services)) => {
            let names: Vec<&String> = services.keys().collect();
            let chosen = if names.len() == 1 {
                names[0]
            } else {
                names[choose("Select a service", &names)?]
            };
            show_service(chosen, &services[chosen], all)
        }
        (None, Lookup::Credentials(_)) => Err(PassVaultError::CommandFailed(
            "unexpected lookup result".into(),
        )),
    }
}

/// Print one credential for `service`, asking which username when there
/// are several.  With `all`, print every username in a table instead.
fn show_service(service: &str, credentials: &Credentials, all: bool) -> Result<()> {
    if all {
        output::print_credentials_table(service, credentials);
        return Ok(());
    }

    let usernames: Vec<&String> = credentials.keys().collect();
    let index = if usernames.len() == 1 {
        0
    } else {
        output::info(&format!("{} usernames stored for {service}", usernames.len()));
        choose("Select a username", &usernames)?
    };

    let username = usernames[index];
    output::print_credential(service, username, &credentials[username]);
    Ok(())
}

/// Numbered selection.  Backing out with Esc or q is `UserCancelled`.
fn choose(prompt: &str, items: &[&String]) -> Result<usize> {
    let choice = dialoguer::Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| PassVaultError::CommandFailed(format!("selection prompt: {e}")))?;
    selected(choice)
}

fn selected(choice: Option<usize>) -> Result<usize> {
    choice.ok_or(PassVaultError::UserCancelled)
}
