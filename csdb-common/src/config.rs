//! Importer configuration
//!
//! Configuration is an explicit value constructed by the host process and
//! handed to each component at construction. Nothing reads process-wide
//! state after startup.

use std::path::PathBuf;

/// Configuration for one import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// SQLite database file holding the sales catalog.
    pub database_path: PathBuf,

    /// Directory of course name mapping files. Mapping import is skipped
    /// when unset.
    pub mappings_directory: Option<PathBuf>,

    /// Directory of subscription-platform sales exports.
    pub teachable_directory: PathBuf,

    /// Directory of marketplace statement files.
    pub udemy_directory: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("sales.db"),
            mappings_directory: None,
            teachable_directory: PathBuf::from("teachable"),
            udemy_directory: PathBuf::from("udemy"),
        }
    }
}
