//! Bistro CLI - browse restaurants and reviews, online or off
//!
//! A thin consumer over the sync core: reads serve the best-known
//! reconciled state, mutations queue for replay when the API is down.

mod cli;
mod commands;
mod error;

use std::env;
use std::path::PathBuf;

use bistro_core::AppConfig;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::open_app;
use crate::commands::{list, mutate, show, sync, taxonomy};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bistro=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_api_url(cli.api_url.clone());
    let db_path = resolve_db_path(cli.db_path.clone());
    let app = open_app(&db_path, &config.api_url)?;

    match cli.command {
        Commands::List {
            cuisine,
            neighborhood,
            json,
        } => list::run_list(&app, &cuisine, &neighborhood, json).await?,
        Commands::Show { id, json } => show::run_show(&app, id, json).await?,
        Commands::Neighborhoods { json } => taxonomy::run_neighborhoods(&app, json).await?,
        Commands::Cuisines { json } => taxonomy::run_cuisines(&app, json).await?,
        Commands::Favorite { id, favorite } => mutate::run_favorite(&app, id, favorite).await?,
        Commands::Review {
            id,
            name,
            rating,
            comments,
        } => mutate::run_review(&app, id, name, rating, comments).await?,
        Commands::Outbox { json } => sync::run_outbox(&app, json).await?,
        Commands::Sync => sync::run_sync(&app).await?,
    }

    Ok(())
}

fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("BISTRO_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bistro")
        .join("bistro.db")
}
