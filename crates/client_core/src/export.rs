//! Saving PDF reports fetched from the report endpoint.

use std::path::{Path, PathBuf};

use shared::domain::NegotiationResult;

use crate::error::ExportError;

/// Everything needed to request and save one report.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub negotiation: NegotiationResult,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// `negotiation_report_<item>.pdf`, with each whitespace run collapsed to `_`.
/// Path separators are replaced too so the name can never leave the target dir.
pub fn report_filename(item: &str) -> String {
    let mut name = String::with_capacity(item.len());
    let mut in_whitespace = false;
    for ch in item.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        name.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
    }
    format!("negotiation_report_{name}.pdf")
}

pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub async fn save_report(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    let path = dir.join(filename);
    write_report(&path, bytes).await?;
    Ok(path)
}

/// Writes to an exact destination, e.g. one picked in a save dialog.
pub async fn write_report(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved pdf report");
    Ok(())
}
