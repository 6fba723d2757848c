use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

/// Base URLs of the four backend services.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    /// Clients and technicians service
    #[serde(default = "default_clients_url")]
    pub clients_url: String,
    #[serde(default = "default_products_url")]
    pub products_url: String,
    #[serde(default = "default_orders_url")]
    pub orders_url: String,
    #[serde(default = "default_billing_url")]
    pub billing_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            clients_url: default_clients_url(),
            products_url: default_products_url(),
            orders_url: default_orders_url(),
            billing_url: default_billing_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_footer")]
    pub footer: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            footer: default_footer(),
        }
    }
}

fn default_clients_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_products_url() -> String {
    "http://localhost:5002".to_string()
}

fn default_orders_url() -> String {
    "http://localhost:5003".to_string()
}

fn default_billing_url() -> String {
    "http://localhost:5004".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_footer() -> String {
    "Sistema de Ordem de Serviço".to_string()
}
