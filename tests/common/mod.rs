use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use multiclinicas_api::{app, config::TenantConfig, AppState};

/// Full router over a fresh in-memory store, driven in-process
pub struct TestApp {
    router: Router,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self {
            router: app(AppState::in_memory(TenantConfig::default())),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("router failed")?;

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?
        };
        Ok((status, body))
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        clinica_id: Option<i64>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = clinica_id {
            builder = builder.header(TenantConfig::DEFAULT_HEADER, id.to_string());
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))?,
            None => builder.body(Body::empty())?,
        };
        self.send(request).await
    }

    /// Creates an active clinic and returns its id
    pub async fn clinica(&self, nome_fantasia: &str, subdominio: &str) -> Result<i64> {
        let (status, body) = self
            .call(
                Method::POST,
                "/clinicas",
                None,
                Some(serde_json::json!({ "nomeFantasia": nome_fantasia, "subdominio": subdominio })),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "clinic not created: {status} {body}");
        body["id"].as_i64().context("missing id")
    }
}
