use chrono::NaiveDateTime;
use serde::Serialize;

use super::format::generated_stamp;
use super::table::{ColumnHeader, RenderedTable, Summary};

/// Everything a PDF report shows, already formatted as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub subtitle: Option<String>,
    pub generated: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<String>>,
    pub summary: Summary,
    pub footer: String,
}

/// Per-run header and footer values
#[derive(Debug, Clone)]
pub struct DocumentContext {
    pub title: String,
    pub subtitle: Option<String>,
    pub generated_at: NaiveDateTime,
    pub footer: String,
}

impl ReportDocument {
    pub fn assemble(ctx: &DocumentContext, table: RenderedTable) -> Self {
        Self {
            title: ctx.title.clone(),
            subtitle: ctx.subtitle.clone(),
            generated: generated_stamp(ctx.generated_at),
            columns: table.columns,
            rows: table.rows,
            summary: table.summary,
            footer: ctx.footer.clone(),
        }
    }
}
