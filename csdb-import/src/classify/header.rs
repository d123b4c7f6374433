//! Header-mapped record streams
//!
//! The first row of the file names its columns; every following row is
//! mapped by header name into a fixed-shape record. Columns the record does
//! not use are ignored, and absent or unparseable numeric fields become
//! `None` instead of failing the row.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csdb_common::db::models::TeachableSale;
use csdb_common::Result;
use csv::StringRecord;

use crate::coerce;

/// One row of a course name mapping file.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseMapping {
    pub course_name: String,
    pub teachable_name: Option<String>,
    pub udemy_name: Option<String>,
}

/// Positions of named columns within a header row.
struct HeaderMap {
    positions: HashMap<String, usize>,
}

impl HeaderMap {
    fn new(headers: &StringRecord) -> Self {
        let positions = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.trim().to_string(), index))
            .collect();
        Self { positions }
    }

    fn cell<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.positions.get(name).and_then(|&index| record.get(index))
    }

    fn text(&self, record: &StringRecord, name: &str) -> String {
        self.cell(record, name).unwrap_or("").to_string()
    }

    /// Like `text`, but an absent or empty cell becomes `None`.
    fn optional_text(&self, record: &StringRecord, name: &str) -> Option<String> {
        match self.cell(record, name) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => None,
        }
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    Ok(reader)
}

/// Lazy stream of course mapping rows from one file.
///
/// Mapping files carry `CourseName`, `Teachable`, and `Udemy` columns; the
/// latter two are optional per row.
pub fn course_mappings(path: &Path) -> Result<impl Iterator<Item = Result<CourseMapping>>> {
    let mut reader = open_reader(path)?;
    let header = HeaderMap::new(reader.headers()?);

    Ok(reader
        .into_records()
        .map(move |record| -> Result<CourseMapping> {
            let record = record?;
            Ok(CourseMapping {
                course_name: header.text(&record, "CourseName"),
                teachable_name: header.optional_text(&record, "Teachable"),
                udemy_name: header.optional_text(&record, "Udemy"),
            })
        }))
}

/// Lazy stream of subscription-platform sales rows from one export file.
pub fn teachable_rows(path: &Path) -> Result<impl Iterator<Item = Result<TeachableSale>>> {
    let mut reader = open_reader(path)?;
    let header = HeaderMap::new(reader.headers()?);

    Ok(reader
        .into_records()
        .map(move |record| -> Result<TeachableSale> {
            let record = record?;
            Ok(TeachableSale {
                teachable_id: coerce::int(header.cell(&record, "id")),
                purchased_at: coerce::datetime(header.cell(&record, "purchased_at")),
                course_name: header.text(&record, "course_name"),
                final_price: coerce::float(header.cell(&record, "final_price")),
                earnings_usd: coerce::float(header.cell(&record, "earnings_usd")),
                coupon: header.text(&record, "coupon"),
                user_id: coerce::int(header.cell(&record, "user_id")),
                sale_id: coerce::int(header.cell(&record, "sale_id")),
            })
        }))
}
