// src/capk/parse.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace, warn};

use super::types::{CapkRecord, RawRow};
use crate::error::{Result, ScrapeError};

/// A whole `<td>…</td>` cell on one line, shortest match.
static CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"<td>(.*?)</td>").expect("cell regex"));
static TD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?td>").expect("td tag regex"));

/// Cell texts of a row in order, with the `<td>` markers removed.
pub fn split_cells(html: &str) -> Vec<String> {
    CELL.find_iter(html)
        .map(|m| TD_TAG.replace_all(m.as_str(), "").into_owned())
        .collect()
}

/// Turn one table row into a record by cell position.
pub fn parse_row(row: &RawRow) -> Result<CapkRecord> {
    let cells = split_cells(&row.html);
    let found = cells.len();
    trace!(brand = %row.brand, index = row.index, cells = found, "split row");

    CapkRecord::from_cells(cells).ok_or_else(|| {
        warn!(brand = %row.brand, index = row.index, found, "row too short");
        ScrapeError::Parse {
            brand: row.brand.clone(),
            index: row.index,
            expected: CapkRecord::CELLS,
            found,
        }
    })
}

/// Parse every row; the first malformed row fails the batch.
pub fn parse_rows(rows: &[RawRow]) -> Result<Vec<CapkRecord>> {
    let records = rows.iter().map(parse_row).collect::<Result<Vec<_>>>()?;
    debug!(records = records.len(), "parsed rows");
    Ok(records)
}
