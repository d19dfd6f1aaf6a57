//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use userhive_core::config::{self, Theme};
use userhive_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "userhive")]
#[command(version)]
#[command(about = "Manage the users of a remote directory from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Color theme for this run (styled, plain); defaults to the config value
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (read from stdin when omitted)
        #[arg(long, env = "USERHIVE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Work with directory users
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum UsersCommands {
    /// List one page of users and refresh the local mirror
    List {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Update a user's name and email
    Update {
        /// The ID of the user to update
        #[arg(value_name = "USER_ID")]
        id: u64,
        /// New first name (defaults to the mirrored value)
        #[arg(long)]
        first_name: Option<String>,
        /// New last name (defaults to the mirrored value)
        #[arg(long)]
        last_name: Option<String>,
        /// New email (defaults to the mirrored value)
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user
    Delete {
        /// The ID of the user to delete
        #[arg(value_name = "USER_ID")]
        id: u64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    Theme::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Theme::all().iter().map(Theme::name).collect();
        format!("unknown theme '{value}' (expected one of: {})", names.join(", "))
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init(&config::paths::logs_dir()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive directory
    let Some(command) = cli.command else {
        return commands::tui::run(&config, cli.theme);
    };

    match command {
        Commands::Login { email, password } => {
            commands::auth::login(&config, &email, password).await
        }
        Commands::Logout => commands::auth::logout(),

        Commands::Users { command } => match command {
            UsersCommands::List { page } => commands::users::list(&config, page).await,
            UsersCommands::Update {
                id,
                first_name,
                last_name,
                email,
            } => {
                let fields = commands::users::UpdateFields {
                    first_name,
                    last_name,
                    email,
                };
                commands::users::update(&config, id, fields).await
            }
            UsersCommands::Delete { id } => commands::users::delete(&config, id).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
