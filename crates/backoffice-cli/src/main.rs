use std::path::PathBuf;

use anyhow::Result;
use backoffice_application::AppContext;
use backoffice_core::routing::HOME_PATH;
use backoffice_infrastructure::{BackofficePaths, ConfigService};
use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod output;

/// Viewport width the CLI lays the shell out for.
const CLI_VIEWPORT_WIDTH: u32 = 1280;

#[derive(Parser)]
#[command(name = "backoffice")]
#[command(about = "Backoffice CLI - drive the admin console client from a terminal", long_about = None)]
struct Cli {
    /// Directory holding config.toml, storage.json and logs
    #[arg(long, global = true, env = "BACKOFFICE_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Backend base URL (overrides config.toml and BACKOFFICE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Fetch the profile from the backend first
        #[arg(long)]
        refresh: bool,
    },
    /// Call a named backend procedure
    Call {
        /// Procedure name, e.g. SYS_SEL_LANGUAGE
        proc_name: String,
        /// Parameters as a JSON object
        #[arg(default_value = "{}")]
        params: String,
    },
    /// Navigate to a route through the authentication guard
    Navigate { path: String },
    /// Show or change display settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Show or change the active locale
    Locale {
        #[command(subcommand)]
        action: commands::locale::LocaleAction,
    },
    /// Load the backend language lists
    Languages {
        /// Language code to save as the user's choice
        #[arg(long)]
        save: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BackofficePaths::new(cli.config_dir.as_deref());
    let _log_guard = logging::init(&paths);

    let mut config = ConfigService::new(paths.clone()).get_config();
    if let Some(api_url) = cli.api_url {
        config.api.base_url = api_url;
    }

    let ctx = AppContext::open(&paths, config)?;
    ctx.bootstrap(CLI_VIEWPORT_WIDTH, HOME_PATH)?;

    let result = match cli.command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami { refresh } => commands::auth::whoami(&ctx, refresh).await,
        Commands::Call { proc_name, params } => commands::call::run(&ctx, &proc_name, &params).await,
        Commands::Navigate { path } => commands::navigate::run(&ctx, &path),
        Commands::Settings { action } => commands::settings::run(&ctx, action),
        Commands::Locale { action } => commands::locale::run(&ctx, action),
        Commands::Languages { save } => commands::languages::run(&ctx, save.as_deref()).await,
    };

    output::print_toasts(&ctx.toasts.drain());
    result
}
