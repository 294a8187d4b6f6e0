use anyhow::Result;
use backoffice_application::AppContext;
use clap::Subcommand;
use colored::Colorize;

use crate::output;

#[derive(Subcommand)]
pub enum LocaleAction {
    /// Print the active locale
    Show,
    /// List available locales
    List,
    /// Switch to a locale
    Set { code: String },
    /// Cycle to the next locale
    Toggle,
    /// Translate a message key in every locale that has it
    Translate { key: String },
}

pub fn run(ctx: &AppContext, action: LocaleAction) -> Result<()> {
    let locale = &ctx.locale;

    match action {
        LocaleAction::Show => {
            match locale.current_locale_info() {
                Some(info) => output::print_field(
                    "Locale",
                    format!("{} {} ({})", info.flag, info.name, info.code),
                ),
                None => output::print_field("Locale", locale.locale()),
            }
            output::print_field("Direction", locale.locale_direction());
            output::print_field("Fallback", locale.fallback_locale());
            output::print_field(
                "Today",
                locale.format_date(chrono::Local::now().date_naive()),
            );
            output::print_field("Number", locale.format_number(1234567.89));
        }
        LocaleAction::List => {
            let current = locale.locale();
            for info in locale.available_locales() {
                let line = format!("{} {} ({})", info.flag, info.name, info.code);
                if info.code == current {
                    println!("{} {}", "*".green(), line.green());
                } else {
                    println!("  {}", line);
                }
            }
        }
        LocaleAction::Set { code } => {
            if locale.set_locale(&code) {
                output::print_field("Locale", locale.locale());
            } else {
                ctx.messages.show_error(&format!("Locale \"{}\" is not available", code));
            }
        }
        LocaleAction::Toggle => {
            output::print_field("Locale", locale.toggle_locale());
        }
        LocaleAction::Translate { key } => {
            let translations = locale.get_translations(&key);
            if translations.is_empty() {
                output::print_empty(&format!("No translation for '{}'", key));
            }
            for (code, text) in translations {
                output::print_field(&code, text);
            }
        }
    }

    Ok(())
}
