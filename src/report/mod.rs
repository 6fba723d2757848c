pub mod document;
pub mod enrich;
pub mod export;
pub mod filter;
pub mod format;
pub mod stats;
pub mod table;
pub mod variants;

pub use document::{DocumentContext, ReportDocument};
pub use enrich::{enrich_orders, EnrichedOrder};
pub use filter::{OrderFilter, StatusFilter, KNOWN_STATUSES};
pub use stats::Stats;

use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::api::{fetch_sources, ApiClient, Needs, Sources};
use crate::config::{resolve_output_dir, Config};
use crate::error::{ConsoleError, Result};
use crate::pdf::render_pdf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Orders,
    Clients,
    Technicians,
    Products,
}

impl ReportKind {
    /// Name used in the output filename
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Orders => "os",
            ReportKind::Clients => "clientes",
            ReportKind::Technicians => "tecnicos",
            ReportKind::Products => "produtos",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Orders => "Relatório de Ordens de Serviço",
            ReportKind::Clients => "Relatório de Clientes",
            ReportKind::Technicians => "Relatório de Técnicos",
            ReportKind::Products => "Relatório de Produtos/Serviços",
        }
    }

    fn footer_suffix(self) -> &'static str {
        match self {
            ReportKind::Orders => "Relatório gerado automaticamente",
            other => other.title(),
        }
    }

    /// Collections the report is built from
    pub fn needs(self) -> Needs {
        match self {
            ReportKind::Orders => Needs::all(),
            ReportKind::Clients => Needs {
                clients: true,
                ..Needs::default()
            },
            ReportKind::Technicians => Needs {
                technicians: true,
                ..Needs::default()
            },
            ReportKind::Products => Needs {
                products: true,
                ..Needs::default()
            },
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" | "os" => Ok(ReportKind::Orders),
            "clients" | "clientes" => Ok(ReportKind::Clients),
            "technicians" | "tecnicos" => Ok(ReportKind::Technicians),
            "products" | "produtos" => Ok(ReportKind::Products),
            other => Err(format!(
                "unknown report '{other}'. Use orders, clients, technicians or products"
            )),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Orders => "orders",
            ReportKind::Clients => "clients",
            ReportKind::Technicians => "technicians",
            ReportKind::Products => "products",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub kind: ReportKind,
    /// Only used by the orders report
    pub filter: OrderFilter,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub records: usize,
}

/// Enrich, filter and lay out fetched data as a report document
pub fn build_document(
    kind: ReportKind,
    sources: &Sources,
    filter: &OrderFilter,
    generated_at: NaiveDateTime,
    footer: &str,
) -> ReportDocument {
    let ctx = DocumentContext {
        title: kind.title().to_string(),
        subtitle: match kind {
            ReportKind::Orders => format::period(filter.from, filter.to),
            _ => None,
        },
        generated_at,
        footer: format!("{} - {}", footer, kind.footer_suffix()),
    };

    match kind {
        ReportKind::Orders => {
            let enriched = enrich_orders(
                &sources.orders,
                &sources.clients,
                &sources.technicians,
                &sources.products,
            );
            let selected = filter.apply(&enriched);
            tracing::debug!(
                fetched = enriched.len(),
                selected = selected.len(),
                status = %filter.status,
                "orders filtered"
            );
            variants::orders_document(&selected, &ctx)
        }
        ReportKind::Clients => variants::clients_document(&sources.clients, &ctx),
        ReportKind::Technicians => variants::technicians_document(&sources.technicians, &ctx),
        ReportKind::Products => variants::products_document(&sources.products, &ctx),
    }
}

/// Run the whole pipeline: fetch, enrich, filter, render and save the PDF.
pub fn generate_report(
    api: &ApiClient,
    config: &Config,
    cfg_dir: &Path,
    request: &ReportRequest,
) -> Result<GeneratedReport> {
    let kind = request.kind;
    let sources = fetch_sources(api, kind.needs())?;

    let now = Local::now();
    let document = build_document(
        kind,
        &sources,
        &request.filter,
        now.naive_local(),
        &config.report.footer,
    );

    let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
    let path = export::report_path(kind, now.date_naive(), &output_dir, request.output.clone());

    let saved = render_pdf(&document).and_then(|bytes| export::save_pdf(&bytes, &path));
    if let Err(e) = saved {
        tracing::error!(report = %kind, error = %e, "error generating report");
        return Err(generation_error(e));
    }

    Ok(GeneratedReport {
        path,
        records: document.summary.total,
    })
}

fn generation_error(err: ConsoleError) -> ConsoleError {
    match err {
        ConsoleError::ReportGeneration(_) => err,
        other => ConsoleError::ReportGeneration(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ProductService, ServiceOrder, Technician};
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sources() -> Sources {
        Sources {
            orders: vec![ServiceOrder {
                id: 1,
                client_id: 7,
                product_id: 2,
                technician_id: 3,
                opened_on: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
                status: "aberta".to_string(),
                description: "Sem sinal".to_string(),
            }],
            clients: Vec::new(),
            technicians: vec![Technician {
                id: 3,
                name: "Bruno".to_string(),
                role: "Campo".to_string(),
                email: String::new(),
                password: String::new(),
            }],
            products: vec![ProductService {
                id: 2,
                code: "INST".to_string(),
                name: "Instalação".to_string(),
                description: String::new(),
                value: 80.0,
                estimated_minutes: 45,
            }],
        }
    }

    #[test]
    fn kinds_parse_in_both_languages() {
        assert_eq!("orders".parse::<ReportKind>(), Ok(ReportKind::Orders));
        assert_eq!("os".parse::<ReportKind>(), Ok(ReportKind::Orders));
        assert_eq!("Clientes".parse::<ReportKind>(), Ok(ReportKind::Clients));
        assert_eq!("tecnicos".parse::<ReportKind>(), Ok(ReportKind::Technicians));
        assert_eq!("products".parse::<ReportKind>(), Ok(ReportKind::Products));
        assert!("invoices".parse::<ReportKind>().is_err());
    }

    #[test]
    fn only_orders_fetch_everything() {
        assert_eq!(ReportKind::Orders.needs(), Needs::all());
        let clients = ReportKind::Clients.needs();
        assert!(clients.clients && !clients.orders && !clients.technicians);
    }

    #[test]
    fn missing_client_renders_placeholder() {
        let doc = build_document(
            ReportKind::Orders,
            &sources(),
            &OrderFilter::default(),
            at(),
            "Sistema de Ordem de Serviço",
        );
        assert_eq!(doc.rows[0][1], "Cliente não encontrado");
        assert_eq!(doc.title, "Relatório de Ordens de Serviço");
        assert_eq!(
            doc.footer,
            "Sistema de Ordem de Serviço - Relatório gerado automaticamente"
        );
        assert_eq!(doc.subtitle, None);
    }

    #[test]
    fn orders_subtitle_describes_period() {
        let filter = OrderFilter::parse(None, Some("2024-04-01"), Some("2024-04-30")).unwrap();
        let doc = build_document(ReportKind::Orders, &sources(), &filter, at(), "S");
        assert_eq!(
            doc.subtitle.as_deref(),
            Some("Período: 01/04/2024 a 30/04/2024")
        );
        assert_eq!(doc.summary.total, 1);
    }

    #[test]
    fn filters_do_not_affect_other_reports() {
        let filter = OrderFilter::parse(Some("fechada"), Some("2030-01-01"), None).unwrap();
        let doc = build_document(ReportKind::Technicians, &sources(), &filter, at(), "S");
        assert_eq!(doc.summary.total, 1);
        assert_eq!(doc.subtitle, None);
        assert_eq!(doc.footer, "S - Relatório de Técnicos");
    }
}
