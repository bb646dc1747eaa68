//! `passvault generate` — print a random password without storing it.

use crate::cli::output;
use crate::cli::{Cli, GenerateArgs};
use crate::config::Settings;
use crate::crypto::generator;
use crate::errors::Result;

/// Execute the `generate` command.
pub fn execute(cli: &Cli, options: &GenerateArgs) -> Result<()> {
    let settings = Settings::load(&cli.dir)?;
    let generated = generator::generate(&options.to_options(&settings));

    if let Some(requested) = generated.clamped_from {
        output::warning(&format!(
            "Password length should be at least {}. Using {} instead of {requested}.",
            generator::MIN_LENGTH,
            generator::MIN_LENGTH
        ));
    }

    // Bare value on stdout so it can be piped.
    println!("{}", generated.password);
    Ok(())
}
