//! CRN → course title resolution.

use sniper_core::error::{Result, SniperError};

use crate::client::CourseLookup;
use crate::table::ResultsTable;

/// Look up the course title for `crn` with an unfiltered search.
///
/// Fails with [`SniperError::NotFound`] when no row names the CRN or the title
/// cell is blank. Lookup errors pass through untouched.
pub async fn resolve_course_name(lookup: &dyn CourseLookup, crn: &str) -> Result<String> {
    let table = lookup.lookup(crn, false).await?;
    find_course_title(&table, crn).ok_or_else(|| SniperError::NotFound(crn.to_string()))
}

/// Title of the first row whose first column contains `crn`.
///
/// The CRN cell is matched by substring because the timetable decorates it
/// with links and padding. The title lives in the third column.
pub fn find_course_title(table: &ResultsTable, crn: &str) -> Option<String> {
    let row = table
        .rows
        .iter()
        .find(|row| row.column(0).is_some_and(|cell| cell.contains(crn)))?;

    let title = row.column(2)?.trim();
    (!title.is_empty()).then(|| title.to_string())
}
