use std::path::Path;
use std::process::Command;

use crate::error::{ConsoleError, Result};
use crate::report::ReportDocument;

/// Embedded Typst template for tabular reports.
/// Uses a placeholder that gets replaced with the actual JSON file path
const REPORT_TEMPLATE: &str = r##"// Tabular Report Template
// Data is loaded from JSON file

#let data = json("DATA_JSON_PATH")

#set page(
  paper: "a4",
  margin: 30pt,
  footer: align(center, text(size: 8pt, fill: rgb("#666666"), data.footer)),
)

#set text(font: ("Helvetica", "Liberation Sans", "DejaVu Sans"), size: 10pt, lang: "pt")

// Header
#align(center)[
  #text(size: 20pt, weight: "bold")[#data.title]
]
#v(10pt)
#if data.subtitle != none [
  #align(center, text(size: 14pt, fill: rgb("#666666"), data.subtitle))
  #v(6pt)
]
#align(center, text(size: 14pt, fill: rgb("#666666"), data.generated))
#v(12pt)

// Body
#table(
  columns: data.columns.map(c => c.width * 1fr),
  align: center + horizon,
  stroke: 1pt + black,
  inset: 8pt,
  fill: (x, y) => if y == 0 { rgb("#f0f0f0") } else { none },

  // Header
  ..data.columns.map(c => text(size: 10pt, weight: "bold", c.header)),

  // Rows
  ..data.rows.flatten().map(cell => text(size: 9pt, cell)),
)

#v(20pt)

// Summary
#block(
  width: 100%,
  fill: rgb("#f9f9f9"),
  radius: 5pt,
  inset: 15pt,
)[
  #text(size: 14pt, weight: "bold", data.summary.title)
  #v(6pt)
  #set text(size: 10pt)
  #grid(
    columns: (1fr, auto),
    row-gutter: 5pt,
    data.summary.total_label, str(data.summary.total),
    ..data.summary.breakdown.map(line => (line.label + ":", str(line.count))).flatten(),
  )
]
"##;

fn typst_available() -> bool {
    Command::new("typst").arg("--version").output().is_ok()
}

/// Render a report document to PDF bytes using Typst CLI
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>> {
    if !typst_available() {
        return Err(ConsoleError::TypstNotFound);
    }

    // Per-process working directory so concurrent runs do not share files
    let work_dir = std::env::temp_dir().join(format!("osreport-{}", std::process::id()));
    std::fs::create_dir_all(&work_dir)?;

    let result = compile(document, &work_dir);

    // Clean up temp files
    let _ = std::fs::remove_dir_all(&work_dir);

    result
}

fn compile(document: &ReportDocument, work_dir: &Path) -> Result<Vec<u8>> {
    // Serialize report data to JSON
    let json_data = serde_json::to_string(document)
        .map_err(|e| ConsoleError::ReportGeneration(e.to_string()))?;

    let json_path = work_dir.join("report_data.json");
    std::fs::write(&json_path, &json_data)?;

    // Write template with relative JSON path
    let template_content = REPORT_TEMPLATE.replace("DATA_JSON_PATH", "report_data.json");
    let template_path = work_dir.join("report.typ");
    std::fs::write(&template_path, &template_content)?;

    let pdf_path = work_dir.join("report.pdf");

    tracing::debug!(dir = %work_dir.display(), rows = document.rows.len(), "running typst");
    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(work_dir)
        .arg(&template_path)
        .arg(&pdf_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ConsoleError::ReportGeneration(stderr.trim().to_string()));
    }

    Ok(std::fs::read(&pdf_path)?)
}
