mod fetch;
mod model;

pub use fetch::{fetch_sources, Needs, Sources};
pub use model::{
    parse_wire_date, Client, Invoice, ProductService, Resource, ServiceOrder, Technician,
};

use std::time::Duration;
use ureq::{Agent, RequestBuilder};

use crate::config::{ApiSettings, Session};
use crate::error::{ConsoleError, Result};

/// The backend a resource lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Clients and technicians
    Clients,
    Products,
    Orders,
    Billing,
}

/// HTTP/JSON client for the four backend services.
#[derive(Clone)]
pub struct ApiClient {
    agent: Agent,
    settings: ApiSettings,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings, session: &Session) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(settings.timeout_secs)))
            .build()
            .into();

        Self {
            agent,
            settings: settings.clone(),
            token: session.bearer().map(str::to_string),
        }
    }

    pub fn base_url(&self, service: Service) -> &str {
        let url = match service {
            Service::Clients => &self.settings.clients_url,
            Service::Products => &self.settings.products_url,
            Service::Orders => &self.settings.orders_url,
            Service::Billing => &self.settings.billing_url,
        };
        url.trim_end_matches('/')
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}{}", self.base_url(R::SERVICE), R::PATH)
    }

    fn record_url<R: Resource>(&self, id: u64) -> String {
        format!("{}/{}", self.collection_url::<R>(), id)
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        let request = request.header("Accept", "application/json");
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// GET the whole collection
    pub fn get_all<R: Resource>(&self) -> Result<Vec<R>> {
        let url = self.collection_url::<R>();
        tracing::debug!(%url, resource = R::LABEL, "fetching collection");
        let body = self.read(&url, self.authorize(self.agent.get(&url)).call())?;
        let records: Vec<R> = decode(&url, &body)?;
        tracing::debug!(resource = R::LABEL, count = records.len(), "collection fetched");
        Ok(records)
    }

    pub fn get_by_id<R: Resource>(&self, id: u64) -> Result<R> {
        let url = self.record_url::<R>(id);
        tracing::debug!(%url, "fetching record");
        let body = self.read(&url, self.authorize(self.agent.get(&url)).call())?;
        decode(&url, &body)
    }

    /// POST a new record; the service assigns its id
    pub fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let url = self.collection_url::<R>();
        let payload = encode(&url, record)?;
        let request = self
            .authorize(self.agent.post(&url))
            .header("Content-Type", "application/json");
        let body = self.read(&url, request.send(payload.as_bytes()))?;
        let created: R = decode(&url, &body)?;
        tracing::info!(resource = R::LABEL, id = created.id(), "record created");
        Ok(created)
    }

    pub fn update<R: Resource>(&self, id: u64, record: &R) -> Result<R> {
        let url = self.record_url::<R>(id);
        let payload = encode(&url, record)?;
        let request = self
            .authorize(self.agent.put(&url))
            .header("Content-Type", "application/json");
        let body = self.read(&url, request.send(payload.as_bytes()))?;
        tracing::info!(resource = R::LABEL, id, "record updated");
        decode(&url, &body)
    }

    pub fn delete<R: Resource>(&self, id: u64) -> Result<()> {
        let url = self.record_url::<R>(id);
        self.read(&url, self.authorize(self.agent.delete(&url)).call())?;
        tracing::info!(resource = R::LABEL, id, "record deleted");
        Ok(())
    }

    fn read(
        &self,
        url: &str,
        response: std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> Result<String> {
        let http_err = |source| ConsoleError::Http {
            url: url.to_string(),
            source,
        };
        let mut response = response.map_err(http_err)?;
        response.body_mut().read_to_string().map_err(http_err)
    }
}

fn decode<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| ConsoleError::Decode {
        url: url.to_string(),
        source,
    })
}

fn encode<T: serde::Serialize>(url: &str, record: &T) -> Result<String> {
    serde_json::to_string(record).map_err(|source| ConsoleError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_resource_path() {
        let settings = ApiSettings {
            orders_url: "http://os.local:8080/".to_string(),
            ..ApiSettings::default()
        };
        let api = ApiClient::new(&settings, &Session::default());

        assert_eq!(
            api.collection_url::<ServiceOrder>(),
            "http://os.local:8080/api/os"
        );
        assert_eq!(
            api.record_url::<Technician>(9),
            "http://localhost:5001/api/tecnicos/9"
        );
        assert_eq!(
            api.collection_url::<Invoice>(),
            "http://localhost:5004/api/notas-fiscais"
        );
        assert_eq!(
            api.collection_url::<ProductService>(),
            "http://localhost:5002/api/produtos-servicos"
        );
    }

    #[test]
    fn token_comes_from_session() {
        let session = Session {
            token: Some("abc".to_string()),
            ..Session::default()
        };
        let api = ApiClient::new(&ApiSettings::default(), &session);
        assert_eq!(api.token.as_deref(), Some("abc"));

        let anonymous = ApiClient::new(&ApiSettings::default(), &Session::default());
        assert!(anonymous.token.is_none());
    }
}
