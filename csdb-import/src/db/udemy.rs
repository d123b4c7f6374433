//! Marketplace sales persistence

use csdb_common::db::models::UdemySale;
use csdb_common::Result;
use sqlx::SqlitePool;

/// Insert one transaction row under its parent statement.
pub async fn insert_sale(pool: &SqlitePool, statement_id: i64, sale: &UdemySale) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO udemy
            (transactionID, statementID, date, userName,
             courseName, couponCode, revenueChannel, vendor,
             price, transactionCurrency, taxAmount, storeFee,
             sharePrice, instructorShare, taxRate, exchangeRate)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(sale.transaction_id)
    .bind(statement_id)
    .bind(sale.date.map(|t| t.to_rfc3339()))
    .bind(&sale.user_name)
    .bind(&sale.course_name)
    .bind(&sale.coupon_code)
    .bind(&sale.revenue_channel)
    .bind(&sale.vendor)
    .bind(sale.price)
    .bind(&sale.transaction_currency)
    .bind(sale.tax_amount)
    .bind(sale.store_fee)
    .bind(sale.share_price)
    .bind(sale.instructor_share)
    .bind(sale.tax_rate)
    .bind(sale.exchange_rate)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Count marketplace sales rows.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM udemy")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Count marketplace sales rows belonging to one statement.
pub async fn count_for_statement(pool: &SqlitePool, statement_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM udemy WHERE statementID = ?")
        .bind(statement_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::courses::{self, NameSide};
    use crate::db::statements;
    use csdb_common::db::init::open_in_memory;

    fn sale(course_name: &str) -> UdemySale {
        UdemySale {
            transaction_id: Some(5001),
            date: None,
            user_name: "student".to_string(),
            course_name: course_name.to_string(),
            coupon_code: String::new(),
            revenue_channel: "Organic".to_string(),
            vendor: "Udemy".to_string(),
            price: Some(19.99),
            transaction_currency: "USD".to_string(),
            tax_amount: Some(1.50),
            store_fee: Some(4.00),
            share_price: Some(14.49),
            instructor_share: Some(0.5),
            tax_rate: Some(0.08),
            exchange_rate: Some(1.0),
        }
    }

    #[tokio::test]
    async fn sales_attach_to_their_statement() {
        let pool = open_in_memory().await.unwrap();

        courses::resolve_course(&pool, NameSide::Udemy, "Course U").await.unwrap();
        let first = statements::insert_statement(&pool, "march.csv").await.unwrap();
        let second = statements::insert_statement(&pool, "april.csv").await.unwrap();

        insert_sale(&pool, first.id, &sale("Course U")).await.unwrap();
        insert_sale(&pool, first.id, &sale("Course U")).await.unwrap();
        insert_sale(&pool, second.id, &sale("Course U")).await.unwrap();

        assert_eq!(count_for_statement(&pool, first.id).await.unwrap(), 2);
        assert_eq!(count_for_statement(&pool, second.id).await.unwrap(), 1);
        assert_eq!(count(&pool).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_requires_a_resolved_course() {
        let pool = open_in_memory().await.unwrap();

        let statement = statements::insert_statement(&pool, "march.csv").await.unwrap();
        assert!(insert_sale(&pool, statement.id, &sale("Course U")).await.is_err());
    }
}
