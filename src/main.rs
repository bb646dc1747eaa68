use clap::Parser;
use passvault::cli::{Cli, Commands};
use passvault::errors::PassVaultError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `passvault=debug`).
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    // Logs go to stderr so stdout stays clean for `generate` and `get`.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref service,
            ref username,
            ref password,
            generate,
            ref options,
        } => passvault::cli::commands::add::execute(
            &cli,
            service,
            username,
            password.as_deref(),
            generate,
            options,
        ),
        Commands::Get { ref service, all } => {
            passvault::cli::commands::get::execute(&cli, service.as_deref(), all)
        }
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Remove {
            ref service,
            ref username,
            force,
        } => passvault::cli::commands::remove::execute(&cli, service, username, force),
        Commands::Generate { ref options } => {
            passvault::cli::commands::generate::execute(&cli, options)
        }
        Commands::Status => passvault::cli::commands::status::execute(&cli),
    };

    match result {
        Ok(()) => {}
        Err(PassVaultError::UserCancelled) => {
            passvault::cli::output::info("Cancelled.");
            std::process::exit(1);
        }
        Err(e) => {
            passvault::cli::output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
