// src/pipeline.rs

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::{info, instrument, warn};

use crate::capk::{extract::extract_from_document, format_records, parse_rows};
use crate::config::Config;
use crate::document::Document;
use crate::error::Result;
use crate::fetch::PageSource;
use crate::write;

/// What one brand contributed to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSummary {
    pub brand: String,
    /// Table rows whose first cell named the brand.
    pub rows: usize,
    /// `<capk>` blocks written.
    pub emitted: usize,
    /// Rows dropped because their key type was neither Test nor Live.
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source_url: String,
    pub output_path: PathBuf,
    pub sections: Vec<SectionSummary>,
}

impl RunSummary {
    pub fn total_emitted(&self) -> usize {
        self.sections.iter().map(|s| s.emitted).sum()
    }
}

/// Build the XML for `brands` out of page markup. Pure apart from logging.
#[instrument(level = "info", skip(html, brands), fields(html_len = html.len(), brands = brands.len()))]
pub fn build_document<S: AsRef<str>>(
    html: &str,
    brands: &[S],
    updated: DateTime<Utc>,
) -> Result<(Document, Vec<SectionSummary>)> {
    let page = Html::parse_document(html);
    let mut document = Document::new(updated);
    let mut sections = Vec::with_capacity(brands.len());

    for brand in brands {
        let brand = brand.as_ref();
        let rows = extract_from_document(&page, brand);
        if rows.is_empty() {
            warn!(brand, "no rows matched");
        }
        let records = parse_rows(&rows)?;
        let blocks = format_records(&records);
        let emitted = records.iter().filter(|r| r.key_class().is_some()).count();

        info!(brand, rows = rows.len(), emitted, "built section");
        document.push_section(brand, &blocks);
        sections.push(SectionSummary {
            brand: brand.to_string(),
            rows: rows.len(),
            emitted,
            skipped: records.len() - emitted,
        });
    }

    Ok((document, sections))
}

/// One full refresh: fetch, build, save.
///
/// Navigation and parse failures end the run with nothing written. A failed save is
/// only logged; the returned summary looks the same either way.
pub async fn run(config: &Config, source: &dyn PageSource) -> Result<RunSummary> {
    run_at(config, source, Utc::now()).await
}

/// [`run`] with a fixed timestamp for the header comment.
pub async fn run_at(
    config: &Config,
    source: &dyn PageSource,
    updated: DateTime<Utc>,
) -> Result<RunSummary> {
    info!(source = source.name(), url = %config.source_url, "fetching page");
    let page = source.fetch(&config.source_url).await?;
    info!(bytes = page.html.len(), "page loaded");

    let (document, sections) = build_document(&page.html, config.brands.as_slice(), updated)?;
    write::save(&config.output_path, document.as_str()).await;

    Ok(RunSummary {
        source_url: page.url,
        output_path: config.output_path.clone(),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use chrono::TimeZone;

    fn row(issuer: &str, exponent: &str, index: &str, key_type: &str) -> String {
        format!(
            "<tr><td>{issuer}</td><td>{exponent}</td><td>{index}</td><td>A000000004</td>\
             <td>ABCD</td><td>1024</td><td>1234</td><td>{key_type}</td><td>31/12/2030</td></tr>"
        )
    }

    fn page(rows: &[String]) -> String {
        format!("<html><body><table><tbody>{}</tbody></table></body></html>", rows.concat())
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn mastercard_block_sits_in_its_section() {
        let html = page(&[row("MasterCard", "3", "01", "Live")]);
        let (doc, sections) = build_document(&html, &["MasterCard", "VISA"], stamp()).unwrap();
        let text = doc.as_str();

        let mc = text.find("<!-- MasterCard -->").unwrap();
        let block = text.find("<DF04>000003</DF04>").unwrap();
        let visa = text.find("<!-- VISA -->").unwrap();
        assert!(mc < block && block < visa);
        assert!(text.starts_with("<!-- Updated on 2024-01-02T03:04:05.000Z -->\n<!-- MasterCard -->\n<capk>"));
        assert!(text.ends_with("</capk>\n\n<!-- VISA -->\n"));

        assert_eq!(sections[0].emitted, 1);
        assert_eq!(sections[1].rows, 0);
        assert_eq!(sections[1].emitted, 0);
    }

    #[test]
    fn filtered_rows_are_counted_not_emitted() {
        let html = page(&[
            row("VISA", "3", "92", "Live"),
            row("VISA", "3", "93", "Expired"),
            row("VISA", "1", "94", "Test"),
        ]);
        let (doc, sections) = build_document(&html, &["VISA"], stamp()).unwrap();
        assert_eq!(doc.as_str().matches("<capk>").count(), 2);
        assert!(!doc.as_str().contains("<9F22>93</9F22>"));
        assert_eq!(
            sections,
            vec![SectionSummary {
                brand: "VISA".into(),
                rows: 3,
                emitted: 2,
                skipped: 1,
            }]
        );
    }

    #[test]
    fn short_row_aborts_the_build() {
        let html = page(&["<tr><td>VISA</td><td>3</td></tr>".to_string()]);
        let err = build_document(&html, &["VISA"], stamp()).unwrap_err();
        assert!(matches!(err, ScrapeError::Parse { found: 2, .. }));
    }
}
