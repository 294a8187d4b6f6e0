//! Terminal output formatting.

use backoffice_core::notification::{Severity, Toast};
use backoffice_core::routing::Navigation;
use backoffice_core::session::UserProfile;
use colored::Colorize;
use serde_json::Value;

/// Print toasts emitted during the command.
pub fn print_toasts(toasts: &[Toast]) {
    for toast in toasts {
        let summary = match toast.severity {
            Severity::Info => toast.summary.cyan().bold(),
            Severity::Success => toast.summary.green().bold(),
            Severity::Error => toast.summary.red().bold(),
        };
        println!("{} {}", summary, toast.detail);
    }
}

pub fn print_navigation(navigation: &Navigation) {
    if navigation.redirected {
        println!(
            "{} {} {} {}",
            navigation.requested.dimmed(),
            "→".dimmed(),
            navigation.path.yellow(),
            format!("({})", navigation.name).dimmed()
        );
    } else {
        println!(
            "{} {}",
            navigation.path.green(),
            format!("({})", navigation.name).dimmed()
        );
    }
}

pub fn print_user(user: &UserProfile) {
    println!("{}", user.display_name().cyan().bold());
    let rows = [
        ("PK", &user.pk),
        ("Employee", &user.emp_id),
        ("Organization", &user.org_nm),
        ("Role", &user.role_nm),
        ("Language", &user.user_language),
        ("Sysadmin", &user.sysadmin_yn),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("  {:<14} {}", format!("{}:", label).bold(), value);
        }
    }
}

/// Print a key/value line.
pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("{:<16} {}", format!("{}:", label).bold(), value);
}

/// Pretty-print a JSON value.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

pub fn print_empty(message: &str) {
    println!("{}", message.dimmed());
}
