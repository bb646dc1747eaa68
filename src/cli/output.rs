//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::ServiceMap;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print one credential.
pub fn print_credential(service: &str, username: &str, password: &str) {
    println!("{} {}", style("Service: ").bold(), service);
    println!("{} {}", style("Username:").bold(), username);
    println!("{} {}", style("Password:").bold(), password);
}

/// Print a table of every username for a service, passwords included.
pub fn print_credentials_table<'a>(
    service: &str,
    credentials: impl IntoIterator<Item = (&'a String, &'a String)>,
) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Username", "Password"]);

    for (username, password) in credentials {
        table.add_row(vec![service, username.as_str(), password.as_str()]);
    }

    println!("{table}");
}

/// Print a table of services and their usernames (no passwords).
pub fn print_services_table(services: &ServiceMap) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Service", "Usernames"]);

    for (service, credentials) in services {
        let usernames: Vec<&str> = credentials.keys().map(String::as_str).collect();
        table.add_row(vec![service.clone(), usernames.join(", ")]);
    }

    println!("{table}");
}
