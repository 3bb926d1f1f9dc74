//! Open-seat detection.

use sniper_core::error::Result;

use crate::client::CourseLookup;
use crate::table::ResultsTable;

/// Whether `crn` currently has an open seat.
///
/// Runs the open-only search and reports `true` when the CRN shows up
/// anywhere in the table text. Lookup errors are returned as errors, never as
/// `false`.
pub async fn is_section_open(lookup: &dyn CourseLookup, crn: &str) -> Result<bool> {
    let table = lookup.lookup(crn, true).await?;
    Ok(table_mentions(&table, crn))
}

/// Substring test over the concatenated table text.
///
/// Known gap: a CRN that happens to appear inside another cell (a different
/// section's CRN, a room number) reads as open. Rows are not inspected.
pub fn table_mentions(table: &ResultsTable, crn: &str) -> bool {
    table.text.contains(crn)
}
