// src/config.rs

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_SOURCE_URL: &str = "https://www.eftlab.com/knowledge-base/list-of-ca-public-keys";
pub const DEFAULT_OUTPUT_PATH: &str = "capks.xml";
pub const DEFAULT_BRANDS: &[&str] = &["MasterCard", "VISA"];

/// Environment variable naming an optional YAML/JSON config file.
pub const CONFIG_ENV: &str = "CAPK_CONFIG";

/// How the source page is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Headless Chromium renders the page before the tables are read.
    #[default]
    Browser,
    /// Plain GET of the served HTML; no browser process.
    Http,
}

impl FetcherKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Some(FetcherKind::Http),
            "browser" => Some(FetcherKind::Browser),
            _ => None,
        }
    }
}

/// Settings for one refresh of the CAPK file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page listing the keys. `file://` URLs read a saved copy from disk.
    pub source_url: String,
    /// Where the XML goes; overwritten every run.
    pub output_path: PathBuf,
    /// Card brands to export, in output order.
    pub brands: Vec<String>,
    pub fetcher: FetcherKind,
    pub request_timeout_secs: u64,
    /// Chromium binary for the browser fetcher; auto-detected when unset.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            brands: DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
            fetcher: FetcherKind::Browser,
            request_timeout_secs: 30,
            chrome_executable: None,
        }
    }
}

impl Config {
    /// Defaults, then the file named by `CAPK_CONFIG`, then `CAPK_*` overrides.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::load`] with an injectable environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) if !path.trim().is_empty() => Self::from_path(path.trim())?,
            _ => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        info!(
            source = %config.source_url,
            output = %config.output_path.display(),
            brands = ?config.brands,
            fetcher = ?config.fetcher,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Read a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ScrapeError::Config(format!("reading {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "read config file");

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            serde_json::from_str(&text)
                .map_err(|e| ScrapeError::Config(format!("parsing {}: {}", path.display(), e)))
        } else {
            serde_yaml::from_str(&text)
                .map_err(|e| ScrapeError::Config(format!("parsing {}: {}", path.display(), e)))
        }
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CAPK_SOURCE_URL") {
            self.source_url = url.trim().to_string();
        }
        if let Some(out) = lookup("CAPK_OUTPUT") {
            self.output_path = PathBuf::from(out.trim());
        }
        if let Some(brands) = lookup("CAPK_BRANDS") {
            self.brands = brands
                .split(',')
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect();
        }
        if let Some(kind) = lookup("CAPK_FETCHER") {
            self.fetcher = FetcherKind::from_str(&kind)
                .ok_or_else(|| ScrapeError::Config(format!("unknown fetcher {:?}", kind)))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.source_url).map_err(|e| {
            ScrapeError::Config(format!("source_url {:?}: {}", self.source_url, e))
        })?;
        if self.brands.is_empty() {
            return Err(ScrapeError::Config("no brands configured".into()));
        }
        if self.brands.iter().any(|b| b.is_empty()) {
            return Err(ScrapeError::Config("empty brand label".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ScrapeError::Config("request_timeout_secs must be at least 1".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ScrapeError::Config("empty output_path".into()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
