//! Shared data models for the sales catalog

use chrono::{DateTime, Utc};

/// Canonical catalog entity unifying a subscription-platform name and a
/// marketplace name for one underlying course.
///
/// A course may carry either, both, or (until its first sighting is
/// reconciled) neither external name, but a given `teachable_name` or
/// `udemy_name` value maps to at most one row at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub course_name: Option<String>,
    pub teachable_name: Option<String>,
    pub udemy_name: Option<String>,
}

/// One imported marketplace statement file. At most one live row per
/// `file_name`; re-import replaces the row and its child sales records.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub id: i64,
    pub file_name: String,
}

/// One row of a subscription-platform sales export.
#[derive(Debug, Clone, PartialEq)]
pub struct TeachableSale {
    pub teachable_id: Option<i64>,
    pub purchased_at: Option<DateTime<Utc>>,
    pub course_name: String,
    pub final_price: Option<f64>,
    pub earnings_usd: Option<f64>,
    pub coupon: String,
    pub user_id: Option<i64>,
    pub sale_id: Option<i64>,
}

/// One transaction row from the active section of a marketplace statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UdemySale {
    pub transaction_id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub user_name: String,
    pub course_name: String,
    pub coupon_code: String,
    pub revenue_channel: String,
    pub vendor: String,
    pub price: Option<f64>,
    pub transaction_currency: String,
    pub tax_amount: Option<f64>,
    pub store_fee: Option<f64>,
    pub share_price: Option<f64>,
    pub instructor_share: Option<f64>,
    pub tax_rate: Option<f64>,
    pub exchange_rate: Option<f64>,
}
