//! Router harness over an in-memory document store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use ordertrack_api::{router, AppContext};
use ordertrack_domain::{Config, StoreBackend, StoreConfig};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub context: Arc<AppContext>,
    app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config {
            store: StoreConfig { backend: StoreBackend::Memory },
            ..Config::default()
        };
        let context = Arc::new(AppContext::new(config).expect("memory context should build"));
        let app = router(Arc::clone(&context));
        Self { context, app }
    }

    /// Send one request and decode the JSON body (`Null` when empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        actor: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder.header("x-ordertrack-user", actor);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, actor: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(actor), Some(body)).await
    }
}
