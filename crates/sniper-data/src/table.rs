//! Results-table extraction from timetable HTML.
//!
//! The timetable renders matching sections in `<table class="dataentrytable">`.
//! Everything downstream works on [`ResultsTable`], so the HTML library is
//! confined to this module.

use scraper::{ElementRef, Html, Selector};
use sniper_core::error::{Result, SniperError};

const TABLE_SELECTOR: &str = "table.dataentrytable";

/// One `<tr>` of the results table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// Trimmed text of each `<td>`, left to right. Header rows built from
    /// `<th>` cells have no columns.
    pub columns: Vec<String>,
}

impl Row {
    pub fn column(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(String::as_str)
    }
}

/// The parsed results table of one timetable response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsTable {
    /// Rows in document order.
    pub rows: Vec<Row>,
    /// Every text node inside the table(s), concatenated untrimmed.
    pub text: String,
}

impl ResultsTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.text.trim().is_empty()
    }
}

/// Extract the results table from a timetable document.
///
/// A document with no results table yields an empty [`ResultsTable`]; the
/// timetable omits the table entirely when nothing matches. An empty body is
/// a [`SniperError::ParseFailed`].
pub fn parse_results_table(document: &str) -> Result<ResultsTable> {
    if document.trim().is_empty() {
        return Err(SniperError::ParseFailed("empty response body".to_string()));
    }

    let table_sel = selector(TABLE_SELECTOR)?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let html = Html::parse_document(document);
    let mut table = ResultsTable::default();

    for element in html.select(&table_sel) {
        table.text.extend(element.text());
        table
            .rows
            .extend(element.select(&row_sel).map(|tr| row_from(tr, &cell_sel)));
    }

    tracing::debug!(rows = table.rows.len(), "parsed results table");
    Ok(table)
}

fn row_from(tr: ElementRef<'_>, cell_sel: &Selector) -> Row {
    Row {
        columns: tr
            .select(cell_sel)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect(),
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SniperError::ParseFailed(format!("bad selector {css}: {e}")))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_parse_rows_and_columns() {
        let table = parse_results_table(&section_page("13466", "Data Structures and Algorithms"))
            .expect("parse");

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].column(0), Some("CRN"));
        assert_eq!(table.rows[1].column(0), Some("13466"));
        assert_eq!(table.rows[1].column(1), Some("CS-3114"));
        assert_eq!(table.rows[1].column(2), Some("Data Structures and Algorithms"));
        assert_eq!(table.rows[1].column(9), None);
    }

    #[test]
    fn test_text_concatenates_all_cells() {
        let table = parse_results_table(&section_page("13466", "Data Structures")).expect("parse");

        assert!(table.text.contains("13466"));
        assert!(table.text.contains("CS-3114"));
        assert!(table.text.contains("Data Structures"));
    }

    #[test]
    fn test_missing_table_is_empty() {
        let table = parse_results_table(&no_results_page()).expect("parse");

        assert!(table.is_empty());
        assert!(!table.text.contains("NO SECTIONS"));
    }

    #[test]
    fn test_text_outside_table_ignored() {
        let page = r#"<html><body><p>13466</p><table class="dataentrytable"><tr><td>99999</td></tr></table></body></html>"#;
        let table = parse_results_table(page).expect("parse");

        assert!(!table.text.contains("13466"));
        assert!(table.text.contains("99999"));
    }

    #[test]
    fn test_header_cells_have_no_columns() {
        let page = r#"<table class="dataentrytable"><tr><th>CRN</th><th>Title</th></tr><tr><td>1</td></tr></table>"#;
        let table = parse_results_table(page).expect("parse");

        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].columns.is_empty());
        assert_eq!(table.rows[1].columns, vec!["1".to_string()]);
    }

    #[test]
    fn test_empty_body_is_parse_failure() {
        let err = parse_results_table("   \n").unwrap_err();
        assert!(matches!(err, SniperError::ParseFailed(_)));
    }
}
