//! Sentinel-state classification of marketplace statement files
//!
//! Statement files pack several logical sections into one file with no
//! per-section header. A small state machine watches the first cell of each
//! row: the literal `Transaction Id` opens the transaction section and the
//! literal `Redemptions` closes it. Matching is exact, case-sensitive, and
//! whole-cell.

use std::fs::File;
use std::path::Path;

use csdb_common::db::models::UdemySale;
use csdb_common::Result;
use csv::{StringRecord, StringRecordsIntoIter};

use crate::coerce;

/// Marker cell opening the transaction section.
const SECTION_START: &str = "Transaction Id";
/// Marker cell closing the transaction section.
const SECTION_END: &str = "Redemptions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionState {
    Seeking,
    Active,
    Stopped,
}

/// Lazy stream of transaction rows from one statement file.
pub struct StatementRecords {
    rows: StringRecordsIntoIter<File>,
    state: SectionState,
}

/// Open a statement file for classification.
pub fn statement_records(path: &Path) -> Result<StatementRecords> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(StatementRecords {
        rows: reader.into_records(),
        state: SectionState::Seeking,
    })
}

impl Iterator for StatementRecords {
    type Item = Result<UdemySale>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == SectionState::Stopped {
                return None;
            }

            let record = match self.rows.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };

            // Rows with no cells are ignored in every state.
            if record.is_empty() {
                continue;
            }

            match self.state {
                SectionState::Seeking if record.get(0) == Some(SECTION_START) => {
                    self.state = SectionState::Active;
                }
                SectionState::Seeking | SectionState::Stopped => {}
                SectionState::Active if record.get(0) == Some(SECTION_END) => {
                    self.state = SectionState::Stopped;
                }
                SectionState::Active => return Some(Ok(sale_from_record(&record))),
            }
        }
    }
}

/// Map one in-section row to a sale by fixed column position.
fn sale_from_record(record: &StringRecord) -> UdemySale {
    let text = |index: usize| record.get(index).unwrap_or("").to_string();

    UdemySale {
        transaction_id: coerce::int(record.get(0)),
        date: coerce::datetime(record.get(1)),
        user_name: text(2),
        course_name: text(3),
        coupon_code: text(4),
        revenue_channel: text(5),
        vendor: text(6),
        price: coerce::float(record.get(7)),
        transaction_currency: text(8),
        tax_amount: coerce::float(record.get(9)),
        store_fee: coerce::float(record.get(10)),
        share_price: coerce::float(record.get(11)),
        instructor_share: coerce::float(record.get(12)),
        tax_rate: coerce::float(record.get(13)),
        exchange_rate: coerce::float(record.get(14)),
    }
}
