//! Integration test harness for Chainring.
//!
//! Builds the real application router over the in-memory document store and
//! in-memory sessions, then drives it either in-process
//! (`tower::ServiceExt::oneshot`) or over a real socket for the
//! client-library tests. No external services are required.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use chainring_core::{Accessory, Bike, ItemId};
use chainring_server::config::ServerConfig;
use chainring_server::db::catalog::CatalogRepository;
use chainring_server::db::{DocumentStore, MemoryDocumentStore};
use chainring_server::middleware::memory_session_layer;
use chainring_server::state::AppState;

/// The application assembled for tests: real router, in-memory store,
/// in-memory sessions.
pub struct TestApp {
    pub store: Arc<MemoryDocumentStore>,
    pub router: Router,
}

impl TestApp {
    /// An app whose import endpoints read the repository's sample `data/`
    /// directory.
    #[must_use]
    pub fn new() -> Self {
        // Test binaries run from the package root, two levels below the
        // workspace data directory.
        Self::with_data_dir("../../data")
    }

    /// An app with a custom data directory for the import endpoints.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://unused-in-tests"),
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            cors_origin: "http://localhost:5173".to_owned(),
            data_dir: data_dir.into(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let store = Arc::new(MemoryDocumentStore::new());
        let dyn_store: Arc<dyn DocumentStore> = store.clone();
        let state = AppState::new(config, dyn_store);
        let router = chainring_server::app(state, memory_session_layer());

        Self { store, router }
    }

    /// Serve the router on an ephemeral local port (for the HTTP clients).
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("test server");
        });
        addr
    }

    /// Seed bikes directly through the repository.
    pub async fn seed_bikes(&self, bikes: Vec<Bike>) {
        CatalogRepository::new(self.store.as_ref())
            .import_bikes(bikes)
            .await
            .expect("seed bikes");
    }

    /// Seed accessories directly through the repository.
    pub async fn seed_accessories(&self, accessories: Vec<Accessory>) {
        CatalogRepository::new(self.store.as_ref())
            .import_accessories(accessories)
            .await
            .expect("seed accessories");
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> Response<Body> {
        self.request(
            Request::get(path)
                .body(Body::empty())
                .expect("request build"),
        )
        .await
    }

    /// GET `path` with a session cookie.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Response<Body> {
        self.request(
            Request::get(path)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request build"),
        )
        .await
    }

    /// POST a JSON body to `path`.
    pub async fn post_json(&self, path: &str, body: &Value) -> Response<Body> {
        self.request(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request build"),
        )
        .await
    }

    /// POST a JSON body to `path` with a session cookie.
    pub async fn post_json_with_cookie(
        &self,
        path: &str,
        body: &Value,
        cookie: &str,
    ) -> Response<Body> {
        self.request(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(body.to_string()))
                .expect("request build"),
        )
        .await
    }

    /// POST with an empty body (logout).
    pub async fn post_empty_with_cookie(&self, path: &str, cookie: &str) -> Response<Body> {
        self.request(
            Request::post(path)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .expect("request build"),
        )
        .await
    }

    async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// The `name=value` pair of the session cookie set by a response.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(ToOwned::to_owned)
}

/// A bike fixture.
#[must_use]
pub fn sample_bike(id: &str, price: i64) -> Bike {
    Bike {
        id: ItemId::new(id),
        name: format!("bike {id}"),
        image: format!("/images/bikes/{id}.jpg"),
        price: Decimal::from(price),
        color: "black".to_owned(),
        rating: 4.4,
    }
}

/// An accessory fixture.
#[must_use]
pub fn sample_accessory(id: &str, price: i64) -> Accessory {
    Accessory {
        id: ItemId::new(id),
        name: format!("accessory {id}"),
        price: Decimal::from(price),
        image: format!("/images/accessories/{id}.jpg"),
        description: "test accessory".to_owned(),
        category: "components".to_owned(),
    }
}
