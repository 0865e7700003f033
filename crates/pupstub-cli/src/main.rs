use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pupstub_core::Config;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "pupstub")]
#[command(about = "Interactive stub responder for the puppeteer add-on", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ./.pupstub.toml, then ~/.config/pupstub/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Append every request and reply to this file
    #[arg(short, long, global = true)]
    pub transcript: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the add-on under test pointed at a fresh reply socket
    Launch {
        /// Client identifier handed to the add-on
        client_id: Option<String>,

        /// Ask the add-on to print watchdog ticks
        #[arg(long)]
        watchdog: bool,

        /// Client log path (default: ./puppeteer-client-log.txt)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Command to launch instead of the configured one
        #[arg(last = true)]
        command: Vec<String>,
    },

    /// Bind a reply socket and print its port as PUPPETEER_SOCKET=<port>
    Serve,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the port announcement
    let filter = if cli.verbose || std::env::var("PUPSTUB_DEBUG").is_ok() {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    if cli.transcript.is_some() {
        config.transcript.path = cli.transcript;
    }
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Launch { client_id, watchdog, log, command } => {
            if watchdog {
                config.launcher.watchdog = true;
            }
            if let Some(log) = log {
                config.launcher.log_file = log;
            }
            if !command.is_empty() {
                config.launcher.command = command;
            }
            commands::launch::run(config, client_id.unwrap_or_default()).await?;
        }
        Commands::Serve => {
            commands::serve::run(config).await?;
        }
    }

    Ok(())
}
