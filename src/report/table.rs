//! Column-driven table rendering shared by every report variant.

use serde::Serialize;
use std::collections::HashMap;

use super::format::truncate;

/// One report column: header, share of page width, cell accessor and optional truncation
pub struct Column<T> {
    pub header: &'static str,
    pub width: f64,
    pub value: fn(&T) -> String,
    pub truncate: Option<usize>,
}

impl<T> Column<T> {
    pub fn new(header: &'static str, width: f64, value: fn(&T) -> String) -> Self {
        Self {
            header,
            width,
            value,
            truncate: None,
        }
    }

    pub fn truncated(mut self, max: usize) -> Self {
        self.truncate = Some(max);
        self
    }

    fn cell(&self, record: &T) -> String {
        let raw = (self.value)(record);
        match self.truncate {
            Some(max) => truncate(&raw, max),
            None => raw,
        }
    }
}

/// Categorical field counted in the summary, e.g. `Status "aberta": 2`
pub struct Breakdown<T> {
    pub label: &'static str,
    pub key: fn(&T) -> String,
}

pub struct TableSpec<T> {
    pub columns: Vec<Column<T>>,
    pub total_label: &'static str,
    pub breakdown: Option<Breakdown<T>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub header: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownLine {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub total_label: String,
    pub total: usize,
    pub breakdown: Vec<BreakdownLine>,
}

/// Header, body and summary of a rendered table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<String>>,
    pub summary: Summary,
}

pub fn render_table<T>(spec: &TableSpec<T>, records: &[T]) -> RenderedTable {
    let columns = spec
        .columns
        .iter()
        .map(|c| ColumnHeader {
            header: c.header.to_string(),
            width: c.width,
        })
        .collect();

    let rows = records
        .iter()
        .map(|r| spec.columns.iter().map(|c| c.cell(r)).collect())
        .collect();

    let breakdown = spec
        .breakdown
        .as_ref()
        .map(|b| {
            count_by(records, b.key)
                .into_iter()
                .map(|(value, count)| BreakdownLine {
                    label: format!("{} \"{}\"", b.label, value),
                    count,
                })
                .collect()
        })
        .unwrap_or_default();

    RenderedTable {
        columns,
        rows,
        summary: Summary {
            title: "Resumo do Relatório".to_string(),
            total_label: spec.total_label.to_string(),
            total: records.len(),
            breakdown,
        },
    }
}

/// Count records per key, in order of first appearance
pub fn count_by<T>(records: &[T], key: impl Fn(&T) -> String) -> Vec<(String, usize)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for record in records {
        let k = key(record);
        match positions.get(&k) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                positions.insert(k.clone(), counts.len());
                counts.push((k, 1));
            }
        }
    }

    counts
}
