//! Database initialization
//!
//! Opens (or creates) the catalog database and creates every table if
//! absent. There are no migrations; the schema is re-asserted on every run.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Open the catalog database, creating the file and schema if needed.
///
/// The importer shares one connection across all components; every statement
/// commits independently, so the pool is capped at a single connection.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open an in-memory catalog database with the full schema.
///
/// Used by tests; behaves exactly like a file-backed pool, including
/// foreign key enforcement and the single-connection cap.
pub async fn open_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create every catalog table if absent.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_courses_table(pool).await?;
    create_statements_table(pool).await?;
    create_udemy_table(pool).await?;
    create_teachable_table(pool).await?;

    info!("Database tables initialized (courses, statements, udemy, teachable)");

    Ok(())
}

/// Create the course catalog table.
///
/// `teachableName` and `udemyName` are each unique when present; they are
/// the foreign key targets for the two sales tables.
pub async fn create_courses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            courseName TEXT,
            teachableName TEXT UNIQUE,
            udemyName TEXT UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the statement ledger table.
pub async fn create_statements_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS statements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fileName TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the marketplace sales table.
///
/// Rows belong to their statement: deleting a statement removes its sales.
/// Course references restrict deletion and follow renames.
pub async fn create_udemy_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS udemy (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            statementID INTEGER NOT NULL,
            transactionID INTEGER,
            date TEXT,
            userName TEXT,
            courseName TEXT,
            couponCode TEXT,
            revenueChannel TEXT,
            vendor TEXT,
            price REAL,
            transactionCurrency TEXT,
            taxAmount REAL,
            storeFee REAL,
            sharePrice REAL,
            instructorShare REAL,
            taxRate REAL,
            exchangeRate REAL,
            FOREIGN KEY (statementID) REFERENCES statements (id)
                ON DELETE CASCADE
                ON UPDATE CASCADE,
            FOREIGN KEY (courseName) REFERENCES courses (udemyName)
                ON DELETE RESTRICT
                ON UPDATE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the subscription-platform sales table.
pub async fn create_teachable_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachable (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teachableID INTEGER,
            purchasedAt TEXT,
            courseName TEXT,
            finalPrice REAL,
            earningsUSD REAL,
            coupon TEXT,
            userID INTEGER,
            saleID INTEGER,
            FOREIGN KEY (courseName) REFERENCES courses (teachableName)
                ON DELETE RESTRICT
                ON UPDATE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = open_in_memory().await.expect("Failed to open database");
        create_schema(&pool).await.expect("Second creation failed");
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = open_in_memory().await.expect("Failed to open database");

        // No statement with id 42 exists, so this insert must fail.
        let result = sqlx::query("INSERT INTO udemy (statementID, courseName) VALUES (42, NULL)")
            .execute(&pool)
            .await;

        assert!(result.is_err());
    }
}
