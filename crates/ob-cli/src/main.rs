//! obsbind CLI
//!
//! Single binary for observer bind management:
//! - Roster display (who is on the server, which key they have)
//! - Applying binds to one or more servers
//! - Halftime key swap
//! - Exporting binds as a `.cfg` file
//! - State file management

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use obsbind::commands;
use obsbind::context::AppContext;

#[derive(Parser)]
#[command(name = "obsbind")]
#[command(author, version, about = "Observer key binds for game server consoles")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the state file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Servers to talk to, separated by commas, semicolons or spaces
    /// (overrides the state file)
    #[arg(long, global = true)]
    hosts: Option<String>,

    /// Console port (overrides the state file)
    #[arg(short, long, global = true)]
    port: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the players on the first server and their keys
    /// Alias: ls
    #[command(alias = "ls")]
    Roster {
        /// Print the roster as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign keys and push the binds to every server
    Apply {
        /// Assign a key to a player (repeatable)
        /// Example: --bind "Alice=1"
        #[arg(short, long, value_name = "NAME=KEY")]
        bind: Vec<String>,
        /// Remove a player's key (repeatable)
        #[arg(short, long, value_name = "NAME")]
        unbind: Vec<String>,
    },

    /// Halftime swap: rotate 1-5 with 6-0 and push
    Swap,

    /// Write the binds to a .cfg file instead of pushing them
    Export {
        /// Output file
        #[arg(short, long, default_value = "binds.cfg")]
        output: PathBuf,
        /// Assign a key to a player (repeatable)
        #[arg(short, long, value_name = "NAME=KEY")]
        bind: Vec<String>,
        /// Remove a player's key (repeatable)
        #[arg(short, long, value_name = "NAME")]
        unbind: Vec<String>,
    },

    /// Manage the state file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the current state file
    Show,
    /// Get a value (e.g. console.idle_timeout_ms)
    Get { key: String },
    /// Set a value
    Set { key: String, value: String },
    /// Write a default state file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show the state file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli.config.as_deref();
    // Hosts and port are validated here, before any network attempt
    let load_context = || AppContext::load(config_path, cli.hosts.as_deref(), cli.port.as_deref());

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(config_path)?,
            ConfigAction::Get { key } => commands::config_get(config_path, &key)?,
            ConfigAction::Set { key, value } => commands::config_set(config_path, &key, &value)?,
            ConfigAction::Init { force } => commands::config_init(config_path, force)?,
            ConfigAction::Path => commands::config_path(config_path)?,
        },

        Commands::Roster { json } => {
            commands::roster_command(&load_context()?, json).await?
        }
        Commands::Apply { bind, unbind } => {
            commands::apply_command(&load_context()?, &bind, &unbind).await?
        }
        Commands::Swap => commands::swap_command(&load_context()?).await?,
        Commands::Export {
            output,
            bind,
            unbind,
        } => {
            commands::export_command(&load_context()?, &output, &bind, &unbind)
                .await?
        }
    }

    Ok(())
}
