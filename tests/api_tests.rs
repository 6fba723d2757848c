mod common;

use common::{dead_url, full_routes, FakeApi};
use osreport::api::{fetch_sources, Needs};
use osreport::config::ApiSettings;
use osreport::{ApiClient, Client, ConsoleError, ServiceOrder, Session, Technician};

fn settings_for(url: &str) -> ApiSettings {
    ApiSettings {
        clients_url: url.to_string(),
        products_url: url.to_string(),
        orders_url: url.to_string(),
        billing_url: url.to_string(),
        timeout_secs: 5,
    }
}

fn logged_in() -> Session {
    Session {
        email: Some("admin@example.com".to_string()),
        token: Some("tok-123".to_string()),
        logged_in_at: None,
    }
}

#[test]
fn get_all_decodes_service_records() {
    let server = FakeApi::start(&full_routes());
    let api = ApiClient::new(&settings_for(&server.url), &Session::default());

    let clients = api.get_all::<Client>().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0].name, "ACME Ltda");
    assert_eq!(clients[1].tax_id, "987.654.321-00");

    let orders = api.get_all::<ServiceOrder>().unwrap();
    assert_eq!(orders[1].opened_on.to_string(), "2024-04-15");
}

#[test]
fn requests_carry_the_session_token() {
    let server = FakeApi::start(&full_routes());
    let api = ApiClient::new(&settings_for(&server.url), &logged_in());
    api.get_all::<Technician>().unwrap();

    let anonymous = ApiClient::new(&settings_for(&server.url), &Session::default());
    anonymous.get_all::<Technician>().unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let with_token: Vec<_> = requests
        .iter()
        .filter(|r| r.authorization.as_deref() == Some("Bearer tok-123"))
        .collect();
    assert_eq!(with_token.len(), 1);
}

#[test]
fn crud_round_trip_uses_service_paths_and_fields() {
    let server = FakeApi::start(&[
        (
            "GET",
            "/api/clientes/1",
            200,
            r#"{"id": 1, "nome": "ACME", "cpfCnpj": "1", "endereco": "Rua A", "telefone": "2", "email": "a@a.com"}"#,
        ),
        (
            "POST",
            "/api/clientes",
            201,
            r#"{"id": 3, "nome": "Initech", "cpfCnpj": "3", "endereco": "Rua C", "telefone": "4", "email": "i@i.com"}"#,
        ),
        (
            "PUT",
            "/api/clientes/3",
            200,
            r#"{"id": 3, "nome": "Initech SA", "cpfCnpj": "3", "endereco": "Rua C", "telefone": "4", "email": "i@i.com"}"#,
        ),
        ("DELETE", "/api/clientes/3", 204, ""),
    ]);
    let api = ApiClient::new(&settings_for(&server.url), &Session::default());

    let fetched = api.get_by_id::<Client>(1).unwrap();
    assert_eq!(fetched.name, "ACME");

    let draft = Client {
        id: 0,
        name: "Initech".to_string(),
        tax_id: "3".to_string(),
        address: "Rua C".to_string(),
        phone: "4".to_string(),
        email: "i@i.com".to_string(),
    };
    let created = api.create(&draft).unwrap();
    assert_eq!(created.id, 3);

    let renamed = Client {
        name: "Initech SA".to_string(),
        ..created
    };
    let updated = api.update(3, &renamed).unwrap();
    assert_eq!(updated.name, "Initech SA");

    api.delete::<Client>(3).unwrap();

    let requests = server.requests();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["GET", "POST", "PUT", "DELETE"]);

    let post: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert!(post.get("id").is_none());
    assert_eq!(post["nome"], "Initech");
    assert_eq!(post["cpfCnpj"], "3");
}

#[test]
fn error_status_is_an_http_error() {
    let server = FakeApi::start(&[("GET", "/api/os", 500, r#"{"error":"boom"}"#)]);
    let api = ApiClient::new(&settings_for(&server.url), &Session::default());

    let err = api.get_all::<ServiceOrder>().unwrap_err();
    match err {
        ConsoleError::Http { url, .. } => assert!(url.ends_with("/api/os")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_json_is_a_decode_error() {
    let server = FakeApi::start(&[("GET", "/api/clientes", 200, "not json")]);
    let api = ApiClient::new(&settings_for(&server.url), &Session::default());
    assert!(matches!(
        api.get_all::<Client>(),
        Err(ConsoleError::Decode { .. })
    ));
}

#[test]
fn fetch_sources_loads_needed_collections_only() {
    let server = FakeApi::start(&full_routes());
    let api = ApiClient::new(&settings_for(&server.url), &Session::default());

    let sources = fetch_sources(
        &api,
        Needs {
            clients: true,
            technicians: true,
            ..Needs::default()
        },
    )
    .unwrap();
    assert_eq!(sources.clients.len(), 2);
    assert_eq!(sources.technicians.len(), 2);
    assert!(sources.orders.is_empty());
    assert!(sources.products.is_empty());
    assert_eq!(server.requests().len(), 2);

    let all = fetch_sources(&api, Needs::all()).unwrap();
    assert_eq!(all.orders.len(), 3);
    assert_eq!(all.products.len(), 2);
}

#[test]
fn one_failed_fetch_fails_the_whole_batch() {
    let server = FakeApi::start(&full_routes());
    let mut settings = settings_for(&server.url);
    settings.products_url = dead_url();
    let api = ApiClient::new(&settings, &Session::default());

    let err = fetch_sources(&api, Needs::all()).unwrap_err();
    assert!(matches!(err, ConsoleError::DataLoad(_)));
    assert!(err.to_string().starts_with("Failed to load report data"));
}
