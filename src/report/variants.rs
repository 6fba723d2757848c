//! Column sets of the orders, clients, technicians and products reports.

use super::document::{DocumentContext, ReportDocument};
use super::enrich::EnrichedOrder;
use super::format::{format_brl, format_date};
use super::table::{render_table, Breakdown, Column, TableSpec};
use crate::api::{Client, ProductService, Technician};

pub const DESCRIPTION_LIMIT: usize = 30;
pub const ADDRESS_LIMIT: usize = 20;

const FIFTH: f64 = 0.2;
const SIXTH: f64 = 1.0 / 6.0;
const QUARTER: f64 = 0.25;

pub fn orders_spec() -> TableSpec<EnrichedOrder> {
    TableSpec {
        columns: vec![
            Column::new("ID", FIFTH, |o: &EnrichedOrder| o.order.id.to_string()),
            Column::new("Cliente", FIFTH, |o: &EnrichedOrder| {
                if o.client_name.is_empty() {
                    "N/A".to_string()
                } else {
                    o.client_name.clone()
                }
            }),
            Column::new("Status", FIFTH, |o: &EnrichedOrder| o.order.status.clone()),
            Column::new("Data Abertura", FIFTH, |o: &EnrichedOrder| {
                format_date(o.order.opened_on)
            }),
            Column::new("Descrição", FIFTH, |o: &EnrichedOrder| {
                o.order.description.clone()
            })
            .truncated(DESCRIPTION_LIMIT),
        ],
        total_label: "Total de Ordens de Serviço:",
        breakdown: Some(Breakdown {
            label: "Status",
            key: |o: &EnrichedOrder| o.order.status.clone(),
        }),
    }
}

pub fn clients_spec() -> TableSpec<Client> {
    TableSpec {
        columns: vec![
            Column::new("ID", SIXTH, |c: &Client| c.id.to_string()),
            Column::new("Nome", SIXTH, |c: &Client| c.name.clone()),
            Column::new("Email", SIXTH, |c: &Client| c.email.clone()),
            Column::new("CPF/CNPJ", SIXTH, |c: &Client| c.tax_id.clone()),
            Column::new("Telefone", SIXTH, |c: &Client| c.phone.clone()),
            Column::new("Endereço", SIXTH, |c: &Client| c.address.clone()).truncated(ADDRESS_LIMIT),
        ],
        total_label: "Total de Clientes:",
        breakdown: None,
    }
}

pub fn technicians_spec() -> TableSpec<Technician> {
    TableSpec {
        columns: vec![
            Column::new("ID", QUARTER, |t: &Technician| t.id.to_string()),
            Column::new("Nome", QUARTER, |t: &Technician| t.name.clone()),
            Column::new("Email", QUARTER, |t: &Technician| t.email.clone()),
            Column::new("Cargo", QUARTER, |t: &Technician| t.role.clone()),
        ],
        total_label: "Total de Técnicos:",
        breakdown: Some(Breakdown {
            label: "Cargo",
            key: |t: &Technician| t.role.clone(),
        }),
    }
}

pub fn products_spec() -> TableSpec<ProductService> {
    TableSpec {
        columns: vec![
            Column::new("ID", FIFTH, |p: &ProductService| p.id.to_string()),
            Column::new("Código", FIFTH, |p: &ProductService| p.code.clone()),
            Column::new("Nome", FIFTH, |p: &ProductService| p.name.clone()),
            Column::new("Valor", FIFTH, |p: &ProductService| format_brl(p.value)),
            Column::new("Tempo Estimado", FIFTH, |p: &ProductService| {
                format!("{} min", p.estimated_minutes)
            }),
        ],
        total_label: "Total de Produtos/Serviços:",
        breakdown: None,
    }
}

pub fn orders_document(orders: &[EnrichedOrder], ctx: &DocumentContext) -> ReportDocument {
    ReportDocument::assemble(ctx, render_table(&orders_spec(), orders))
}

pub fn clients_document(clients: &[Client], ctx: &DocumentContext) -> ReportDocument {
    ReportDocument::assemble(ctx, render_table(&clients_spec(), clients))
}

pub fn technicians_document(technicians: &[Technician], ctx: &DocumentContext) -> ReportDocument {
    ReportDocument::assemble(ctx, render_table(&technicians_spec(), technicians))
}

pub fn products_document(products: &[ProductService], ctx: &DocumentContext) -> ReportDocument {
    ReportDocument::assemble(ctx, render_table(&products_spec(), products))
}
