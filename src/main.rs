use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use time_tracker::api::{AppState, create_router};
use time_tracker::cli::Menu;
use time_tracker::config::{AppConfig, ConfigLoader};
use time_tracker::storage::Store;

#[derive(Parser, Debug)]
#[command(name = "time-tracker", version, long_about = None)]
#[command(about = "Employee time tracking with target-hours reports")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    #[arg(long, help = "Path to a YAML configuration file")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Serve the JSON API (default)")]
    Serve,
    #[command(about = "Run the interactive menu on this terminal")]
    Menu,
}

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn serve(config: AppConfig) -> Result<()> {
    let store = Store::open(&config.database.path).context("opening database")?;
    let state = AppState::new(store, config.reporting.hours_per_day);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("binding {}", config.server.bind))?;
    info!(bind = %config.server.bind, "Listening");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

fn menu(config: AppConfig) -> Result<()> {
    let store = Store::open(&config.database.path).context("opening database")?;
    let stdin = io::stdin();
    Menu::new(&store, stdin.lock(), io::stdout()).run()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => ConfigLoader::load(path)?.into_config(),
        None => ConfigLoader::default().into_config(),
    };
    init_logging(&config);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Menu => menu(config),
    }
}
