//! pt-BR text formatting used by reports and listings.

use chrono::{NaiveDate, NaiveDateTime};

pub const ELLIPSIS: &str = "...";

/// Cut `text` to `max` characters plus an ellipsis; shorter text is returned as is
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Format a money amount as Brazilian Real, e.g. `R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = group_thousands(cents / 100);
    let formatted = format!("R$ {},{:02}", whole, cents % 100);
    if negative {
        format!("-{formatted}")
    } else {
        formatted
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `Gerado em: dd/mm/yyyy às HH:MM:SS`
pub fn generated_stamp(at: NaiveDateTime) -> String {
    format!(
        "Gerado em: {} às {}",
        format_date(at.date()),
        at.format("%H:%M:%S")
    )
}

/// Describe a date range for a report subtitle, if any bound is set
pub fn period(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Option<String> {
    match (from, to) {
        (Some(from), Some(to)) => Some(format!(
            "Período: {} a {}",
            format_date(from),
            format_date(to)
        )),
        (Some(from), None) => Some(format!("Período: a partir de {}", format_date(from))),
        (None, Some(to)) => Some(format!("Período: até {}", format_date(to))),
        (None, None) => None,
    }
}
