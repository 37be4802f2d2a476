pub mod extract;
pub mod parse;
pub mod types;
pub mod xml;

pub use extract::extract_rows;
pub use parse::{parse_row, parse_rows};
pub use types::{CapkRecord, KeyClass, RawRow};
pub use xml::{format_record, format_records};
