//! csdb-import - Course Sales Importer
//!
//! Ingests sales records from two incompatible export formats (a
//! subscription-platform export and a marketplace statement export),
//! reconciles them against a single course catalog in which the same course
//! may carry a different name per source, and persists normalized rows into
//! the catalog database.

pub mod classify;
pub mod coerce;
pub mod db;
pub mod gate;
pub mod services;

pub use csdb_common::{Error, Result};

use csdb_common::config::ImportConfig;
use sqlx::SqlitePool;

/// Run every configured import against an initialized store.
///
/// Sources are processed strictly one at a time, and within each source the
/// files are processed strictly one at a time. Any I/O or store error aborts
/// the remainder of the run.
pub async fn run(pool: &SqlitePool, config: &ImportConfig) -> Result<()> {
    if let Some(mappings_directory) = &config.mappings_directory {
        services::course_mappings::import_course_mappings(pool, mappings_directory).await?;
    }

    services::udemy::import_udemy_directory(pool, &config.udemy_directory).await?;
    services::teachable::import_teachable_directory(pool, &config.teachable_directory).await?;

    Ok(())
}
