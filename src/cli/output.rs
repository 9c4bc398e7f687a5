//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Credential;

/// What a hidden password looks like in the table.
const MASK: &str = "••••••••";

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

/// Print a table of credentials (Id, Service, Username, Password, Created, Updated).
pub fn print_credentials_table(credentials: &[&Credential], show_secrets: bool) {
    if credentials.is_empty() {
        info("No credentials in this vault yet.");
        tip("Run `passvault add <SERVICE> <USERNAME>` to add your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id", "Service", "Username", "Password", "Created", "Updated",
    ]);

    for c in credentials {
        let secret = if show_secrets {
            c.secret().to_string()
        } else {
            MASK.to_string()
        };
        table.add_row(vec![
            c.id.clone(),
            c.service.clone(),
            c.username.clone(),
            secret,
            c.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            c.updated_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ]);
    }

    println!("{table}");
}
