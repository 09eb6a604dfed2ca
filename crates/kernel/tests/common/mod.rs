#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Every [`TestApp`] drives the real kernel router and services. The store
//! underneath is a freshly seeded in-memory store, so tests never share
//! state and need no external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use gazette_kernel::routes;
use gazette_kernel::state::AppState;
use gazette_kernel::store::Store;
use gazette_test_utils::MemoryStore;

/// Test application wrapper around the real router.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// App over the standard seed fixture.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::seeded()))
    }

    /// App over the standard seed fixture, also handing back the store.
    pub fn seeded() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::seeded());
        (Self::with_store(store.clone()), store)
    }

    /// App over any store implementation.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        let state = AppState::new(store);
        Self {
            router: routes::app(state.clone()),
            state,
        }
    }

    /// Send a request through the router.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// `GET path`, returning status and parsed JSON body.
    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        into_json(self.request(request).await).await
    }

    /// Send a JSON body with the given method.
    pub async fn send(&self, method: Method, path: &str, body: Value) -> (StatusCode, Value) {
        self.send_raw(method, path, body.to_string()).await
    }

    /// Send a raw string as an `application/json` body.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: impl Into<String>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap();
        into_json(self.request(request).await).await
    }

    /// `DELETE path`, returning status and raw body bytes.
    pub async fn delete(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::delete(path).body(Body::empty()).unwrap();
        let response = self.request(request).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }
}

/// Split a response into status and JSON body (`Null` when empty).
pub async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, body)
}

/// The `msg` field of an error body.
pub fn msg(body: &Value) -> &str {
    body["msg"].as_str().unwrap_or_default()
}
