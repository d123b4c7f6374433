//! Row classification
//!
//! Each classifier turns a raw delimited file into a lazy, finite,
//! non-restartable sequence of typed records, pulled one at a time by the
//! consuming importer.
//!
//! Two variants exist: header-mapped (first row names the columns) and
//! sentinel-state (section boundaries are marked by the content of rows,
//! not their position).

pub mod header;
pub mod statement;
