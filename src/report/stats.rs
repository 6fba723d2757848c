use super::enrich::EnrichedOrder;
use super::table::count_by;
use crate::api::Sources;

/// Collection totals plus the status distribution of the selected orders
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_orders: usize,
    pub total_clients: usize,
    pub total_technicians: usize,
    pub total_products: usize,
    pub status_breakdown: Vec<(String, usize)>,
}

impl Stats {
    /// `orders` is the filtered selection; the other totals cover whole collections
    pub fn compute(sources: &Sources, orders: &[EnrichedOrder]) -> Self {
        Self {
            total_orders: orders.len(),
            total_clients: sources.clients.len(),
            total_technicians: sources.technicians.len(),
            total_products: sources.products.len(),
            status_breakdown: count_by(orders, |o| o.order.status.clone()),
        }
    }
}

/// Distinct statuses present in `orders`, in first-seen order
pub fn distinct_statuses(orders: &[EnrichedOrder]) -> Vec<String> {
    count_by(orders, |o| o.order.status.clone())
        .into_iter()
        .map(|(status, _)| status)
        .collect()
}
