//! Course name mapping import
//!
//! Mapping files pre-seed the catalog with known name pairs so that sales
//! imports attach to an existing course instead of creating one per naming
//! system. Rows insert directly, bypassing the merge; a row whose display
//! name is already in the catalog is skipped.

use std::path::Path;

use csdb_common::Result;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::classify;
use crate::db::courses;
use crate::services::scanner;

/// Import every mapping file in `dir`.
pub async fn import_course_mappings(pool: &SqlitePool, dir: &Path) -> Result<()> {
    let files = scanner::list_source_files(dir)?;

    for file_name in files {
        info!("Importing course mappings from {}", file_name);
        import_mapping_file(pool, &dir.join(&file_name)).await?;
        info!("Finished {}", file_name);
    }

    Ok(())
}

async fn import_mapping_file(pool: &SqlitePool, path: &Path) -> Result<()> {
    let mut seeded = 0u64;

    for mapping in classify::header::course_mappings(path)? {
        let mapping = mapping?;
        let existing = courses::select_by_course_name(pool, &mapping.course_name).await?;
        if existing.is_some() {
            continue;
        }
        courses::insert_course(
            pool,
            &mapping.course_name,
            mapping.teachable_name.as_deref(),
            mapping.udemy_name.as_deref(),
        )
        .await?;
        seeded += 1;
    }

    debug!("Seeded {} course mappings from {}", seeded, path.display());

    Ok(())
}
