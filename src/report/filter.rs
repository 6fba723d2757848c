use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::enrich::EnrichedOrder;
use crate::error::{ConsoleError, Result};

/// Canonical service-order statuses.
///
/// Statuses are free strings on the wire; these are the values the order
/// screens offer. Another screen used `em_andamento`/`concluida`, which is
/// not part of this set.
pub const KNOWN_STATUSES: [&str; 4] = ["aberta", "em andamento", "fechada", "cancelada"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Exact(String),
}

impl StatusFilter {
    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Exact(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("all")
            || trimmed.eq_ignore_ascii_case("todos")
        {
            return Ok(StatusFilter::All);
        }
        Ok(StatusFilter::Exact(trimmed.to_string()))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Exact(s) => write!(f, "{s}"),
        }
    }
}

/// Status and inclusive open-date bounds. Unset parts do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: StatusFilter,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderFilter {
    /// Build a filter from command-line values
    pub fn parse(status: Option<&str>, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let status = match status {
            Some(s) => s.parse::<StatusFilter>().unwrap_or_default(),
            None => StatusFilter::All,
        };
        let from = from.map(parse_cli_date).transpose()?;
        let to = to.map(parse_cli_date).transpose()?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ConsoleError::InvalidDateRange { from, to });
            }
        }

        if let StatusFilter::Exact(s) = &status {
            if !KNOWN_STATUSES.contains(&s.as_str()) {
                tracing::warn!(status = %s, "filtering by a status outside the known set");
            }
        }

        Ok(Self { status, from, to })
    }

    pub fn matches(&self, order: &EnrichedOrder) -> bool {
        let opened = order.order.opened_on;
        self.status.matches(&order.order.status)
            && self.from.map_or(true, |d| opened >= d)
            && self.to.map_or(true, |d| opened <= d)
    }

    /// Orders that satisfy every set predicate, in input order
    pub fn apply(&self, orders: &[EnrichedOrder]) -> Vec<EnrichedOrder> {
        orders.iter().filter(|o| self.matches(o)).cloned().collect()
    }
}

fn parse_cli_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ConsoleError::InvalidDate(s.to_string()))
}
