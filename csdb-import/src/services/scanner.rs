//! Source file scanner
//!
//! Lists importable files in a source directory. Downstream logic assumes
//! nothing about ordering beyond "some fixed enumeration order for this
//! run".

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Source scanner errors; any of these is fatal to the run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// General I/O error
    #[error("I/O error reading {0}: {1}")]
    Io(PathBuf, std::io::Error),
}

impl From<ScanError> for csdb_common::Error {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::PathNotFound(path) => {
                csdb_common::Error::NotFound(format!("Path not found: {}", path.display()))
            }
            ScanError::NotADirectory(path) => {
                csdb_common::Error::InvalidInput(format!("Not a directory: {}", path.display()))
            }
            ScanError::Io(_, err) => csdb_common::Error::Io(err),
        }
    }
}

/// List the base names of the files in `dir`.
pub fn list_source_files(dir: &Path) -> Result<Vec<String>, ScanError> {
    if !dir.exists() {
        return Err(ScanError::PathNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut names = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| ScanError::Io(dir.to_path_buf(), e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::Io(dir.to_path_buf(), e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::Io(entry.path(), e))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    Ok(names)
}
