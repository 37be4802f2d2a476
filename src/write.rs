// src/write.rs

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info};

use crate::error::{Result, ScrapeError};

/// Overwrite `path` with `text`, creating missing parent directories.
/// Returns the path written to.
pub async fn write_document(path: impl AsRef<Path>, text: &str) -> Result<PathBuf> {
    let path = path.as_ref();
    let to_err = |source| ScrapeError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(to_err)?;
        }
    }
    fs::write(path, text.as_bytes()).await.map_err(to_err)?;
    Ok(path.to_path_buf())
}

/// Write the document and log the outcome. A failed write is logged, never returned:
/// the run carries on as if the file had been saved.
pub async fn save(path: impl AsRef<Path>, text: &str) {
    match write_document(path, text).await {
        Ok(p) => info!(path = %p.display(), bytes = text.len(), "saved capk file"),
        Err(e) => error!(error = %e, "failed to save capk file"),
    }
}
