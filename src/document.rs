// src/document.rs

use chrono::{DateTime, SecondsFormat, Utc};

/// The `capks.xml` text: one timestamp comment, then one commented section per brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    sections: usize,
}

impl Document {
    /// Start a document stamped with `updated`, e.g. `<!-- Updated on 2024-05-01T08:00:00.000Z -->`.
    pub fn new(updated: DateTime<Utc>) -> Self {
        let text = format!(
            "<!-- Updated on {} -->\n",
            updated.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        Self { text, sections: 0 }
    }

    /// Append a brand comment followed by its `<capk>` blocks.
    /// Every section after the first is separated by a blank line.
    pub fn push_section(&mut self, brand: &str, blocks: &str) {
        if self.sections > 0 {
            self.text.push('\n');
        }
        self.text.push_str("<!-- ");
        self.text.push_str(brand);
        self.text.push_str(" -->\n");
        self.text.push_str(blocks);
        self.sections += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 15).unwrap()
    }

    #[test]
    fn header_uses_millisecond_utc_timestamp() {
        let doc = Document::new(stamp());
        assert_eq!(doc.as_str(), "<!-- Updated on 2024-05-01T08:30:15.000Z -->\n");
    }

    #[test]
    fn sections_layout() {
        let mut doc = Document::new(stamp());
        doc.push_section("MasterCard", "<capk>\n</capk>\n");
        doc.push_section("VISA", "");
        assert_eq!(
            doc.into_string(),
            "<!-- Updated on 2024-05-01T08:30:15.000Z -->\n\
             <!-- MasterCard -->\n\
             <capk>\n</capk>\n\
             \n\
             <!-- VISA -->\n"
        );
    }
}
