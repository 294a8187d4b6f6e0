use anyhow::{Result, bail};
use backoffice_application::AppContext;
use backoffice_core::settings::color::hex_to_rgb;
use clap::Subcommand;

use crate::output;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Set the interface language
    Language { code: String },
    /// Set the date format, e.g. DD/MM/YYYY
    DateFormat { format: String },
    /// Turn dark mode on or off
    DarkMode {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Set the primary color as #rrggbb
    PrimaryColor { color: String },
    /// Print the theme as CSS custom properties
    Css,
}

pub fn run(ctx: &AppContext, action: SettingsAction) -> Result<()> {
    let service = &ctx.settings;

    match action {
        SettingsAction::Show => {
            let settings = service.settings();
            output::print_field("Language", &settings.language);
            output::print_field("Date format", &settings.date_format);
            output::print_field("Dark mode", settings.dark_mode);
            output::print_field("Primary color", &settings.primary_color);
            output::print_field(
                "Today",
                service.format_date(chrono::Local::now().date_naive()),
            );
            return Ok(());
        }
        SettingsAction::Language { code } => {
            if !service.set_language(&code) {
                bail!("Language '{}' is not an available locale", code);
            }
        }
        SettingsAction::DateFormat { format } => service.set_date_format(&format),
        SettingsAction::DarkMode { enabled } => service.set_dark_mode(enabled),
        SettingsAction::PrimaryColor { color } => {
            if hex_to_rgb(&color).is_none() {
                bail!("Invalid color '{}', expected #rrggbb", color);
            }
            service.set_primary_color(&color);
        }
        SettingsAction::Css => {
            print!("{}", ctx.theme.to_css());
            return Ok(());
        }
    }

    ctx.messages.show_success("settings.saved");
    Ok(())
}
