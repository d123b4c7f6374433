//! Statement ledger operations
//!
//! Tracks which marketplace statement files have been imported. Replacing a
//! statement row cascades to its child sales rows, which is what makes
//! re-importing an unchanged file produce an identical result instead of
//! duplicates.

use csdb_common::db::models::Statement;
use csdb_common::Result;
use sqlx::{Row, SqlitePool};

/// Load the ledger entry for a statement file, if one exists.
pub async fn select_by_file_name(pool: &SqlitePool, file_name: &str) -> Result<Option<Statement>> {
    let row = sqlx::query("SELECT id, fileName FROM statements WHERE fileName = ?")
        .bind(file_name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Statement {
        id: row.get("id"),
        file_name: row.get("fileName"),
    }))
}

/// Delete a ledger entry; child sales rows cascade away with it.
pub async fn delete_statement(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM statements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert a fresh ledger entry for a statement file.
pub async fn insert_statement(pool: &SqlitePool, file_name: &str) -> Result<Statement> {
    let result = sqlx::query("INSERT INTO statements (fileName) VALUES (?)")
        .bind(file_name)
        .execute(pool)
        .await?;

    Ok(Statement {
        id: result.last_insert_rowid(),
        file_name: file_name.to_string(),
    })
}

/// Count ledger entries.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM statements")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
