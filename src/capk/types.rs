// src/capk/types.rs

/// Inner markup of one `<tr>` that matched a brand label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Brand label the row was selected for.
    pub brand: String,
    /// Position among that brand's matching rows, in document order.
    pub index: usize,
    pub html: String,
}

/// One CA public key as listed in the source table.
///
/// Every field is the raw cell text; nothing is trimmed, decoded or validated.
#[derive(Debug, PartialEq, Clone, Eq, Default)]
pub struct CapkRecord {
    pub issuer: String,
    /// DF04, padded to six digits on output.
    pub exponent: String,
    /// 9F22
    pub rid_index: String,
    /// 9F06
    pub rid_list: String,
    /// DF02
    pub modulus: String,
    pub key_length: String,
    /// DF03
    pub sha: String,
    /// "Test" or "Live"; anything else keeps the record out of the XML.
    pub key_type: String,
    pub expires: String,
}

impl CapkRecord {
    /// Number of table cells a record is built from.
    pub const CELLS: usize = 9;

    /// Build a record from cells in table order. Returns `None` when fewer than
    /// [`CapkRecord::CELLS`] are given; extra cells are ignored.
    pub fn from_cells<I, S>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut it = cells.into_iter().map(Into::into);
        Some(CapkRecord {
            issuer: it.next()?,
            exponent: it.next()?,
            rid_index: it.next()?,
            rid_list: it.next()?,
            modulus: it.next()?,
            key_length: it.next()?,
            sha: it.next()?,
            key_type: it.next()?,
            expires: it.next()?,
        })
    }

    pub fn key_class(&self) -> Option<KeyClass> {
        KeyClass::from_str(&self.key_type)
    }
}

/// Key classification taken from the "Key Type" column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyClass {
    Test,
    Live,
}

impl KeyClass {
    pub fn as_str(&self) -> &str {
        match self {
            KeyClass::Test => "Test",
            KeyClass::Live => "Live",
        }
    }

    /// Exact, case-sensitive match; "live" or "Test " are not keys we export.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Test" => Some(KeyClass::Test),
            "Live" => Some(KeyClass::Live),
            _ => None,
        }
    }

    /// Terminal classification code. Not part of the `<capk>` tag set.
    pub fn code(&self) -> &'static str {
        match self {
            KeyClass::Test => "0",
            KeyClass::Live => "1",
        }
    }
}
