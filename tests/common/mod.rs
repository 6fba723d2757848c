#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Minimal HTTP/1.1 server answering canned JSON per method and path.
///
/// Unknown routes answer 404. Every request is recorded.
pub struct FakeApi {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

type Routes = HashMap<(String, String), (u16, String)>;

impl FakeApi {
    pub fn start(routes: &[(&str, &str, u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let routes: Routes = routes
            .iter()
            .map(|(method, path, status, body)| {
                (
                    (method.to_string(), path.to_string()),
                    (*status, body.to_string()),
                )
            })
            .collect();
        let routes = Arc::new(routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn handle(stream: TcpStream, routes: &Routes, recorded: &Mutex<Vec<RecordedRequest>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).unwrap();

    recorded.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let (status, payload) = routes
        .get(&(method, path))
        .cloned()
        .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));

    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {len}\r\nConnection: close\r\n\r\n{payload}",
        reason = if status < 400 { "OK" } else { "Error" },
        len = payload.len(),
    );
    let mut stream = stream;
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// A URL nothing listens on
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub const CLIENTS_JSON: &str = r#"[
  {"id": 1, "nome": "ACME Ltda", "cpfCnpj": "12.345.678/0001-90", "endereco": "Rua das Flores, 1234 - Jardim", "telefone": "(11) 4000-1000", "email": "contato@acme.com"},
  {"id": 2, "nome": "Globex", "cpfCnpj": "987.654.321-00", "endereco": "Av. Paulista, 1", "telefone": "(11) 4000-2000", "email": "ti@globex.com"}
]"#;

pub const TECHNICIANS_JSON: &str = r#"[
  {"id": 10, "nome": "Ana Souza", "cargo": "Suporte", "email": "ana@os.com", "senha": "s3cr3t"},
  {"id": 11, "nome": "Bruno Lima", "cargo": "Campo", "email": "bruno@os.com", "senha": "s3cr3t"}
]"#;

pub const PRODUCTS_JSON: &str = r#"[
  {"id": 20, "codigo": "FMT", "nome": "Formatação", "descricao": "Reinstalação", "valor": 150.0, "tempoEstimado": 120},
  {"id": 21, "codigo": "LIM", "nome": "Limpeza", "descricao": "Limpeza interna", "valor": 1250.5, "tempoEstimado": 60}
]"#;

pub const ORDERS_JSON: &str = r#"[
  {"id": 100, "cliente": 1, "produtoServico": 20, "tecnico": 10, "dataAbertura": "2024-04-01", "status": "aberta", "descricaoProblema": "Computador reiniciando sozinho durante o uso"},
  {"id": 101, "cliente": 2, "produtoServico": 21, "tecnico": 11, "dataAbertura": "2024-04-15T09:00:00", "status": "fechada", "descricaoProblema": "Ventoinha barulhenta"},
  {"id": 102, "cliente": 7, "produtoServico": 20, "tecnico": 10, "dataAbertura": "2024-05-02T14:30:00Z", "status": "aberta", "descricaoProblema": "Sem vídeo"}
]"#;

pub const INVOICES_JSON: &str = r#"[
  {"id": 500, "dataEmissao": "2024-04-20", "ordemDeServico": 101, "valorTotal": 1250.5}
]"#;

/// Routes serving all collections from one server
pub fn full_routes() -> Vec<(&'static str, &'static str, u16, &'static str)> {
    vec![
        ("GET", "/api/clientes", 200, CLIENTS_JSON),
        ("GET", "/api/tecnicos", 200, TECHNICIANS_JSON),
        ("GET", "/api/produtos-servicos", 200, PRODUCTS_JSON),
        ("GET", "/api/os", 200, ORDERS_JSON),
        ("GET", "/api/notas-fiscais", 200, INVOICES_JSON),
    ]
}
