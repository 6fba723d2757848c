use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Service;

/// An entity exposed by one of the backend services.
///
/// `id` is assigned by the service and never sent back in request bodies.
pub trait Resource: Serialize + DeserializeOwned + Send {
    const SERVICE: Service;
    const PATH: &'static str;
    const LABEL: &'static str;

    fn id(&self) -> u64;
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Client {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpfCnpj", default)]
    pub tax_id: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct Technician {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cargo", default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "senha", default)]
    pub password: String,
}

impl fmt::Debug for Technician {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Technician")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProductService {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "valor", default)]
    pub value: f64,
    /// Minutes
    #[serde(rename = "tempoEstimado", default)]
    pub estimated_minutes: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServiceOrder {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(rename = "cliente")]
    pub client_id: u64,
    #[serde(rename = "produtoServico")]
    pub product_id: u64,
    #[serde(rename = "tecnico")]
    pub technician_id: u64,
    #[serde(rename = "dataAbertura", with = "wire_date")]
    pub opened_on: NaiveDate,
    pub status: String,
    #[serde(rename = "descricaoProblema", default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Invoice {
    #[serde(default, skip_serializing)]
    pub id: u64,
    #[serde(rename = "dataEmissao", with = "wire_date")]
    pub issued_on: NaiveDate,
    #[serde(rename = "ordemDeServico")]
    pub order_id: u64,
    #[serde(rename = "valorTotal")]
    pub total: f64,
}

impl Resource for Client {
    const SERVICE: Service = Service::Clients;
    const PATH: &'static str = "/api/clientes";
    const LABEL: &'static str = "clients";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Technician {
    const SERVICE: Service = Service::Clients;
    const PATH: &'static str = "/api/tecnicos";
    const LABEL: &'static str = "technicians";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for ProductService {
    const SERVICE: Service = Service::Products;
    const PATH: &'static str = "/api/produtos-servicos";
    const LABEL: &'static str = "products";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for ServiceOrder {
    const SERVICE: Service = Service::Orders;
    const PATH: &'static str = "/api/os";
    const LABEL: &'static str = "orders";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Invoice {
    const SERVICE: Service = Service::Billing;
    const PATH: &'static str = "/api/notas-fiscais";
    const LABEL: &'static str = "invoices";

    fn id(&self) -> u64 {
        self.id
    }
}

/// Parse a service date: plain date, naive timestamp, or RFC 3339.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| ts.date())
}

mod wire_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wire_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{raw}'")))
    }
}
