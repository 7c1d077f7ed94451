//! Shared test utilities: a stand-in cipher service on an ephemeral port
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use url::Url;

/// One multipart upload as the service saw it.
#[derive(Debug, Clone, Default)]
pub struct Received {
    pub route: String,
    pub filename: Option<String>,
    pub file: Option<Vec<u8>>,
    pub key_matrix: Option<String>,
    pub other_fields: Vec<String>,
}

/// How the service answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// 200 with these bytes
    Respond(Vec<u8>),
    /// This status with an explanatory body
    Fail(StatusCode, String),
}

#[derive(Clone)]
struct ServiceState {
    behavior: Behavior,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct TestService {
    pub base_url: Url,
    received: Arc<Mutex<Vec<Received>>>,
}

impl TestService {
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().clone()
    }
}

async fn read_upload(route: &str, mut multipart: Multipart) -> Received {
    let mut received = Received {
        route: route.to_string(),
        ..Default::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                received.filename = field.file_name().map(|s| s.to_string());
                received.file = Some(field.bytes().await.unwrap().to_vec());
            }
            "keyMatrix" => {
                received.key_matrix = Some(field.text().await.unwrap());
            }
            _ => received.other_fields.push(field_name),
        }
    }

    received
}

async fn answer(state: ServiceState, received: Received) -> Response {
    state.received.lock().push(received);
    match state.behavior {
        Behavior::Respond(body) => (
            StatusCode::OK,
            [
                ("Content-Type", "application/octet-stream"),
                ("Content-Disposition", "attachment; filename=output.txt"),
            ],
            body,
        )
            .into_response(),
        Behavior::Fail(status, body) => (status, body).into_response(),
    }
}

async fn encrypt(State(state): State<ServiceState>, multipart: Multipart) -> Response {
    let received = read_upload("encrypt", multipart).await;
    answer(state, received).await
}

async fn decrypt(State(state): State<ServiceState>, multipart: Multipart) -> Response {
    let received = read_upload("decrypt", multipart).await;
    answer(state, received).await
}

/// A stored file served for plain GETs, answering with the same behavior.
async fn stored(State(state): State<ServiceState>) -> Response {
    match state.behavior {
        Behavior::Respond(body) => (StatusCode::OK, body).into_response(),
        Behavior::Fail(status, body) => (status, body).into_response(),
    }
}

/// Start a service on 127.0.0.1 with `/encrypt` and `/decrypt` routes,
/// plus `/stored/output.txt` for fetching a remote reference.
pub async fn spawn_service(behavior: Behavior) -> TestService {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServiceState {
        behavior,
        received: received.clone(),
    };

    let app = Router::new()
        .route("/encrypt", post(encrypt))
        .route("/decrypt", post(decrypt))
        .route("/stored/output.txt", get(stored))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestService {
        base_url: Url::parse(&format!("http://{}", addr)).unwrap(),
        received,
    }
}

/// An address nothing listens on.
pub async fn closed_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
