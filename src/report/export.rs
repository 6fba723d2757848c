use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use super::ReportKind;
use crate::error::{ConsoleError, Result};

/// `relatorio-<kind>-YYYY-MM-DD.pdf`
pub fn report_filename(kind: ReportKind, date: NaiveDate) -> String {
    format!("relatorio-{}-{}.pdf", kind.slug(), date.format("%Y-%m-%d"))
}

/// Where a report is saved: the explicit path, or the dated file in `output_dir`
pub fn report_path(
    kind: ReportKind,
    date: NaiveDate,
    output_dir: &Path,
    explicit: Option<PathBuf>,
) -> PathBuf {
    explicit.unwrap_or_else(|| output_dir.join(report_filename(kind, date)))
}

/// Write the PDF bytes, creating parent directories as needed
pub fn save_pdf(bytes: &[u8], path: &Path) -> Result<()> {
    if bytes.is_empty() {
        return Err(ConsoleError::ReportGeneration(
            "renderer produced an empty document".to_string(),
        ));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report saved");
    Ok(())
}
