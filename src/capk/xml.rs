// src/capk/xml.rs

use tracing::{debug, trace};

use super::types::CapkRecord;

/// DF05 expiry written for every key, whatever the table says.
pub const DF05_EXPIRY: &str = "20311222";
pub const DF06: &str = "01";
pub const DF07: &str = "01";

/// Width of the DF04 exponent field.
pub const EXPONENT_WIDTH: usize = 6;

/// Left-pad with '0' to six characters; longer values are left alone.
pub fn pad_exponent(exponent: &str) -> String {
    format!("{:0>width$}", exponent, width = EXPONENT_WIDTH)
}

/// Render one `<capk>` block, or `None` when the key is neither Test nor Live.
pub fn format_record(record: &CapkRecord) -> Option<String> {
    let class = record.key_class()?;
    trace!(
        rid = %record.rid_list,
        index = %record.rid_index,
        class = class.as_str(),
        code = class.code(),
        "formatting key"
    );

    let block = format!(
        "<capk>\n    <9F06>{}</9F06>\n    <9F22>{}</9F22>\n    <DF02>{}</DF02>\n    \
         <DF03>{}</DF03>\n    <DF04>{}</DF04>\n    <DF05>{}</DF05>\n    \
         <DF06>{}</DF06>\n    <DF07>{}</DF07>\n</capk>\n",
        record.rid_list,
        record.rid_index,
        record.modulus,
        record.sha,
        pad_exponent(&record.exponent),
        DF05_EXPIRY,
        DF06,
        DF07,
    );
    Some(block)
}

/// Concatenate the blocks of every exportable record, in input order.
pub fn format_records(records: &[CapkRecord]) -> String {
    let mut out = String::new();
    let mut skipped = 0usize;
    for record in records {
        match format_record(record) {
            Some(block) => out.push_str(&block),
            None => {
                skipped += 1;
                trace!(key_type = %record.key_type, rid = %record.rid_list, "skipping key");
            }
        }
    }
    debug!(records = records.len(), skipped, "formatted records");
    out
}
