//! Concurrent loading of the collections a report is built from.

use std::thread::{Scope, ScopedJoinHandle};
use std::time::Instant;

use super::{ApiClient, Client, ProductService, Resource, ServiceOrder, Technician};
use crate::error::{ConsoleError, Result};

/// Which collections a run needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Needs {
    pub orders: bool,
    pub clients: bool,
    pub technicians: bool,
    pub products: bool,
}

impl Needs {
    pub fn all() -> Self {
        Self {
            orders: true,
            clients: true,
            technicians: true,
            products: true,
        }
    }
}

/// Collections fetched for one run. Unneeded ones stay empty.
#[derive(Debug, Default, Clone)]
pub struct Sources {
    pub orders: Vec<ServiceOrder>,
    pub clients: Vec<Client>,
    pub technicians: Vec<Technician>,
    pub products: Vec<ProductService>,
}

/// Fetch every needed collection concurrently.
///
/// Returns once all requests have settled. The first failure, in the order
/// orders, clients, technicians, products, becomes the single error for the
/// batch and the other results are dropped.
pub fn fetch_sources(api: &ApiClient, needs: Needs) -> Result<Sources> {
    let started = Instant::now();

    let result = std::thread::scope(|s| -> Result<Sources> {
        let orders = spawn_if::<ServiceOrder>(s, api, needs.orders);
        let clients = spawn_if::<Client>(s, api, needs.clients);
        let technicians = spawn_if::<Technician>(s, api, needs.technicians);
        let products = spawn_if::<ProductService>(s, api, needs.products);

        let orders = settle(orders);
        let clients = settle(clients);
        let technicians = settle(technicians);
        let products = settle(products);

        Ok(Sources {
            orders: orders?,
            clients: clients?,
            technicians: technicians?,
            products: products?,
        })
    });

    match &result {
        Ok(sources) => tracing::info!(
            orders = sources.orders.len(),
            clients = sources.clients.len(),
            technicians = sources.technicians.len(),
            products = sources.products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "report data loaded"
        ),
        Err(e) => tracing::error!(error = %e, "error loading report data"),
    }

    result.map_err(ConsoleError::data_load)
}

fn spawn_if<'scope, 'env, R: Resource + 'scope>(
    scope: &'scope Scope<'scope, 'env>,
    api: &'env ApiClient,
    needed: bool,
) -> Option<ScopedJoinHandle<'scope, Result<Vec<R>>>> {
    needed.then(|| scope.spawn(move || api.get_all::<R>()))
}

fn settle<R>(handle: Option<ScopedJoinHandle<'_, Result<Vec<R>>>>) -> Result<Vec<R>> {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic)),
        None => Ok(Vec::new()),
    }
}
