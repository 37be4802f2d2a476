// src/capk/extract.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument, trace};

use super::types::RawRow;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static FIRST_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td:first-child").expect("first-cell selector should parse"));

/// Inner HTML of every `<tr>` whose first cell's text contains `brand`.
///
/// Matching is a plain substring test, so "VISA" also picks up "VISA Europe".
/// Rows come back in document order; no match is an empty vec.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn extract_rows(html: &str, brand: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    extract_from_document(&document, brand)
}

/// Same as [`extract_rows`] for an already-parsed document.
pub fn extract_from_document(document: &Html, brand: &str) -> Vec<RawRow> {
    let rows: Vec<RawRow> = document
        .select(&ROW)
        .filter(|row| {
            row.select(&FIRST_CELL)
                .next()
                .map(|cell| cell.text().collect::<String>().contains(brand))
                .unwrap_or(false)
        })
        .enumerate()
        .map(|(index, row)| {
            trace!(brand, index, "matched row");
            RawRow {
                brand: brand.to_string(),
                index,
                html: row.inner_html(),
            }
        })
        .collect();

    debug!(brand, rows = rows.len(), "extracted rows");
    rows
}
