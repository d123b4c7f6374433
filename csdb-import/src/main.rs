//! csdb-import - Course Sales Importer - Main entry point
//!
//! Connects to the catalog database, asserts the schema, and runs the
//! configured imports in order: course name mappings, marketplace
//! statements, subscription-platform exports.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use csdb_common::config::ImportConfig;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for csdb-import
#[derive(Parser, Debug)]
#[command(name = "csdb-import")]
#[command(about = "Course sales importer for the CSDB catalog")]
#[command(version)]
struct Args {
    /// SQLite database file for the sales catalog
    #[arg(short, long, default_value = "sales.db", env = "CSDB_DATABASE")]
    database: PathBuf,

    /// Directory of course name mapping files (skipped when unset)
    #[arg(short, long, env = "CSDB_MAPPINGS_DIRECTORY")]
    mappings_directory: Option<PathBuf>,

    /// Directory of subscription-platform sales exports
    #[arg(short, long, default_value = "teachable", env = "CSDB_TEACHABLE_DIRECTORY")]
    teachable_directory: PathBuf,

    /// Directory of marketplace statement files
    #[arg(short, long, default_value = "udemy", env = "CSDB_UDEMY_DIRECTORY")]
    udemy_directory: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "csdb_import=info,csdb_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments
    let args = Args::parse();

    info!("Starting CSDB importer v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", args.database.display());

    let config = ImportConfig {
        database_path: args.database,
        mappings_directory: args.mappings_directory,
        teachable_directory: args.teachable_directory,
        udemy_directory: args.udemy_directory,
    };

    let pool = csdb_common::db::init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let result = csdb_import::run(&pool, &config).await;

    // Release the store connection before reporting the outcome.
    pool.close().await;

    if let Err(e) = result {
        error!("Import aborted: {}", e);
        std::process::exit(1);
    }

    info!("Import complete");
    Ok(())
}
