//! Subscription-platform sales persistence

use csdb_common::db::models::TeachableSale;
use csdb_common::Result;
use sqlx::SqlitePool;

/// Remove every subscription-platform sales row.
///
/// The whole set is replaced on each run; this runs once, before any file
/// in the directory is reprocessed.
pub async fn delete_all(pool: &SqlitePool) -> Result<()> {
    sqlx::query("DELETE FROM teachable").execute(pool).await?;
    Ok(())
}

/// Insert one sales row.
pub async fn insert_sale(pool: &SqlitePool, sale: &TeachableSale) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO teachable
            (teachableID, purchasedAt, courseName, finalPrice,
             earningsUSD, coupon, userID, saleID)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sale.teachable_id)
    .bind(sale.purchased_at.map(|t| t.to_rfc3339()))
    .bind(&sale.course_name)
    .bind(sale.final_price)
    .bind(sale.earnings_usd)
    .bind(&sale.coupon)
    .bind(sale.user_id)
    .bind(sale.sale_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Count subscription-platform sales rows.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teachable")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
