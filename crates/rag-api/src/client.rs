//! HTTP client for the RAG backend REST API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::port::RagBackend;
use crate::types::*;

/// Default ceiling for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default path prefix under which the backend routes are mounted.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Connection settings for [`RagApiClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8000`.
    pub endpoint: String,
    /// Path prefix prepended to every route.
    pub base_path: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint and base path joined without doubled or missing slashes.
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        let path = self.base_path.trim_matches('/');
        if path.is_empty() {
            endpoint.to_string()
        } else {
            format!("{endpoint}/{path}")
        }
    }
}

/// RAG backend API client.
pub struct RagApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RagApiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a 2xx JSON body.
    async fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<R, ApiError> {
        let started = Instant::now();
        let request = build(self.client.request(method.clone(), self.url(path)));

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "request failed before a response");
            ApiError::from_transport(e, self.timeout)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout))?;

        tracing::debug!(
            %method,
            path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_detail);
            return Err(ApiError::Request {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RagBackend for RagApiClient {
    async fn get_health(&self) -> Result<HealthSnapshot, ApiError> {
        self.send(Method::GET, "/health", |r| r).await
    }

    async fn search(&self, query: &str, k: u32) -> Result<SearchResultSet, ApiError> {
        let response: SearchResponse = self
            .send(Method::GET, "/search", |r| {
                r.query(&[("q", query.to_string()), ("k", k.to_string())])
            })
            .await?;
        Ok(response.results)
    }

    async fn rag_query(&self, query: &str, k: u32) -> Result<RagAnswer, ApiError> {
        self.send(Method::POST, "/rag", |r| r.json(&RagRequest { q: query, k }))
            .await
    }

    async fn get_raw_documents(
        &self,
        limit: u32,
    ) -> Result<DocumentListing<RawDocument>, ApiError> {
        self.send(Method::GET, "/raw", |r| r.query(&[("limit", limit)]))
            .await
    }

    async fn get_clean_documents(
        &self,
        limit: u32,
    ) -> Result<DocumentListing<CleanDocument>, ApiError> {
        self.send(Method::GET, "/clean", |r| r.query(&[("limit", limit)]))
            .await
    }

    async fn reload_index(&self) -> Result<ReloadIndexOutcome, ApiError> {
        self.send(Method::POST, "/reload-index", |r| r).await
    }
}
