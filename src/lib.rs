pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod pdf;
pub mod report;

pub use api::{ApiClient, Client, Invoice, ProductService, ServiceOrder, Technician};
pub use config::{Config, Session};
pub use error::{ConsoleError, Result};
pub use report::{generate_report, ReportKind, ReportRequest};
