//! Marketplace statement import
//!
//! Each statement file is tracked in the ledger under its base name. A file
//! seen before is replaced: the old ledger entry is deleted (its sales rows
//! cascade away) before a fresh entry and fresh rows are written, so
//! re-running against an unchanged directory reproduces the same row set.

use std::path::Path;

use csdb_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::classify;
use crate::db::{courses, statements, udemy};
use crate::gate::SequentialGate;
use crate::services::scanner;

/// Import every statement file in `dir`.
pub async fn import_udemy_directory(pool: &SqlitePool, dir: &Path) -> Result<()> {
    let files = scanner::list_source_files(dir)?;

    for file_name in files {
        if let Some(existing) = statements::select_by_file_name(pool, &file_name).await? {
            statements::delete_statement(pool, existing.id).await?;
        }

        info!("Importing {}...", file_name);
        let statement = statements::insert_statement(pool, &file_name).await?;
        import_statement_file(pool, &dir.join(&file_name), statement.id).await?;
        info!("Done");
    }

    Ok(())
}

async fn import_statement_file(pool: &SqlitePool, path: &Path, statement_id: i64) -> Result<()> {
    let gate = SequentialGate::new();

    for row in classify::statement::statement_records(path)? {
        let sale = row?;
        let ticket = gate.register();
        ticket
            .run(async {
                courses::resolve_course(pool, courses::NameSide::Udemy, &sale.course_name).await?;
                udemy::insert_sale(pool, statement_id, &sale).await?;
                Ok::<(), Error>(())
            })
            .await?;
    }

    // The file is complete only once every admitted row has landed.
    gate.drain().await;

    Ok(())
}
