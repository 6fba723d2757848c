use std::collections::HashMap;

use crate::api::{Client, ProductService, Resource, ServiceOrder, Technician};

pub const CLIENT_NOT_FOUND: &str = "Cliente não encontrado";
pub const TECHNICIAN_NOT_FOUND: &str = "Técnico não encontrado";
pub const PRODUCT_NOT_FOUND: &str = "Produto/Serviço não encontrado";

/// A service order with the display names of what it references
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedOrder {
    pub order: ServiceOrder,
    pub client_name: String,
    pub technician_name: String,
    pub product_name: String,
}

/// Map id -> record. The first record with a given id wins.
pub fn index_by_id<R: Resource>(records: &[R]) -> HashMap<u64, &R> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.entry(record.id()).or_insert(record);
    }
    index
}

/// Attach client, technician and product names to each order, keeping order.
///
/// References that do not resolve get a placeholder name.
pub fn enrich_orders(
    orders: &[ServiceOrder],
    clients: &[Client],
    technicians: &[Technician],
    products: &[ProductService],
) -> Vec<EnrichedOrder> {
    let clients = index_by_id(clients);
    let technicians = index_by_id(technicians);
    let products = index_by_id(products);

    orders
        .iter()
        .map(|order| {
            let client_name = resolve(&clients, order.client_id, |c| &c.name, CLIENT_NOT_FOUND);
            let technician_name = resolve(
                &technicians,
                order.technician_id,
                |t| &t.name,
                TECHNICIAN_NOT_FOUND,
            );
            let product_name =
                resolve(&products, order.product_id, |p| &p.name, PRODUCT_NOT_FOUND);

            EnrichedOrder {
                order: order.clone(),
                client_name,
                technician_name,
                product_name,
            }
        })
        .collect()
}

fn resolve<R>(
    index: &HashMap<u64, &R>,
    id: u64,
    name: impl Fn(&R) -> &String,
    placeholder: &str,
) -> String {
    match index.get(&id).map(|r| name(*r)) {
        Some(found) if !found.trim().is_empty() => found.clone(),
        _ => {
            tracing::debug!(id, placeholder, "unresolved reference");
            placeholder.to_string()
        }
    }
}
