//! Subscription-platform import
//!
//! The whole sales set for this source is replaced on every run: one delete
//! up front, then every file's rows inserted fresh. The export carries no
//! stable per-file identity across runs, so idempotency is directory-level
//! rather than file-level.

use std::path::Path;

use csdb_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::classify;
use crate::db::{courses, teachable};
use crate::gate::SequentialGate;
use crate::services::scanner;

/// Replace the subscription-platform sales set from the files in `dir`.
pub async fn import_teachable_directory(pool: &SqlitePool, dir: &Path) -> Result<()> {
    let files = scanner::list_source_files(dir)?;

    teachable::delete_all(pool).await?;

    for file_name in files {
        info!("Importing {}...", file_name);
        import_teachable_file(pool, &dir.join(&file_name)).await?;
        info!("Done");
    }

    Ok(())
}

async fn import_teachable_file(pool: &SqlitePool, path: &Path) -> Result<()> {
    let gate = SequentialGate::new();

    for row in classify::header::teachable_rows(path)? {
        let sale = row?;
        let ticket = gate.register();
        ticket
            .run(async {
                courses::resolve_course(pool, courses::NameSide::Teachable, &sale.course_name)
                    .await?;
                teachable::insert_sale(pool, &sale).await?;
                Ok::<(), Error>(())
            })
            .await?;
    }

    // The file is complete only once every admitted row has landed.
    gate.drain().await;

    Ok(())
}
