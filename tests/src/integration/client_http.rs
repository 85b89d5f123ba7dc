//! # HTTP Client Against a Live Mock Backend
//!
//! Exercises `RagApiClient` over real sockets: parameter forwarding, error
//! detail extraction and the transport error classes.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use parking_lot::Mutex;
    use rag_api::{ApiError, ClientConfig, HealthStatus, RagApiClient, RagBackend};
    use serde_json::{json, Value};

    use crate::support::{spawn_mock_server, unused_endpoint};

    fn client_for(endpoint: String) -> RagApiClient {
        RagApiClient::new(ClientConfig::new(endpoint)).expect("client")
    }

    #[tokio::test]
    async fn test_health_decodes_backend_field_names() {
        let router = Router::new().route(
            "/api/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "vector_index_loaded": true,
                    "vector_count": 1500,
                    "raw_documents": 12,
                    "clean_documents": 11
                }))
            }),
        );
        let server = spawn_mock_server(router).await;

        let health = tokio_test::assert_ok!(client_for(server.endpoint()).get_health().await);
        assert_eq!(health.status, HealthStatus::Healthy);
        assert!(health.vector_index_loaded);
        assert_eq!(health.vector_count, 1500);
        assert_eq!(health.raw_document_count, 12);
        assert_eq!(health.clean_document_count, 11);
    }

    #[tokio::test]
    async fn test_search_forwards_query_verbatim() {
        let seen: Arc<Mutex<Vec<HashMap<String, String>>>> = Arc::default();
        let recorder = Arc::clone(&seen);
        let router = Router::new().route(
            "/api/search",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().push(params);
                    Json(json!({
                        "results": [
                            {"url": "https://a", "score": 0.91, "text": "ownership rules"}
                        ],
                        "total_matches": 1,
                        "processing_time": 0.02
                    }))
                }
            }),
        );
        let server = spawn_mock_server(router).await;

        let query = "  what is ünïcode & rust?  ";
        let results = client_for(server.endpoint())
            .search(query, 5)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, Some(0.91));
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0]["q"], query);
        assert_eq!(seen[0]["k"], "5");
    }

    #[tokio::test]
    async fn test_rag_posts_json_body() {
        let bodies: Arc<Mutex<Vec<Value>>> = Arc::default();
        let recorder = Arc::clone(&bodies);
        let router = Router::new().route(
            "/api/rag",
            post(move |Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                async move {
                    recorder.lock().push(body);
                    Json(json!({"answer": "...", "processing_time": 1.234, "ctx_count": 3}))
                }
            }),
        );
        let server = spawn_mock_server(router).await;

        let answer = client_for(server.endpoint())
            .rag_query("What is ownership?", 3)
            .await
            .unwrap();

        assert_eq!(answer.context_chunk_count, 3);
        assert!((answer.processing_time_seconds - 1.234).abs() < f64::EPSILON);
        assert_eq!(
            bodies.lock().as_slice(),
            &[json!({"q": "What is ownership?", "k": 3})]
        );
    }

    #[tokio::test]
    async fn test_document_listings_pass_limit() {
        let limits: Arc<Mutex<Vec<String>>> = Arc::default();
        let raw_limits = Arc::clone(&limits);
        let router = Router::new()
            .route(
                "/api/raw",
                get(move |Query(params): Query<HashMap<String, String>>| {
                    let raw_limits = Arc::clone(&raw_limits);
                    async move {
                        raw_limits
                            .lock()
                            .push(params.get("limit").cloned().unwrap_or_default());
                        // html projected away by the backend
                        Json(json!({"count": 1, "items": [{"url": "https://r"}]}))
                    }
                }),
            )
            .route(
                "/api/clean",
                get(|| async {
                    Json(json!({"count": 1, "items": [{"url": "https://c", "text": "hello"}]}))
                }),
            );
        let server = spawn_mock_server(router).await;
        let client = client_for(server.endpoint());

        let raw = client.get_raw_documents(10).await.unwrap();
        assert_eq!(raw.items[0].url.as_deref(), Some("https://r"));
        assert_eq!(raw.items[0].html, "");
        assert_eq!(limits.lock().as_slice(), &["10".to_string()]);

        let clean = client.get_clean_documents(10).await.unwrap();
        assert_eq!(clean.items[0].text, "hello");
    }

    #[tokio::test]
    async fn test_reload_index() {
        let router = Router::new().route(
            "/api/reload-index",
            post(|| async {
                Json(json!({
                    "status": "success",
                    "vector_count": 1500,
                    "message": "Index reloaded with 1500 vectors"
                }))
            }),
        );
        let server = spawn_mock_server(router).await;

        let outcome = client_for(server.endpoint()).reload_index().await.unwrap();
        assert_eq!(outcome.status, "success");
        assert_eq!(outcome.vector_count, 1500);
    }

    #[tokio::test]
    async fn test_error_detail_string() {
        let router = Router::new().route(
            "/api/search",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Query too long"})),
                )
            }),
        );
        let server = spawn_mock_server(router).await;

        let err = client_for(server.endpoint())
            .search("x", 5)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.detail(), Some("Query too long"));
        assert_eq!(err.user_message("Search failed"), "Query too long");
    }

    #[tokio::test]
    async fn test_validation_detail_list() {
        let router = Router::new().route(
            "/api/search",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [
                        {"loc": ["query", "k"], "msg": "ensure this value is less than or equal to 20", "type": "value_error"}
                    ]})),
                )
            }),
        );
        let server = spawn_mock_server(router).await;

        let err = client_for(server.endpoint())
            .search("x", 50)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.detail(),
            Some("ensure this value is less than or equal to 20")
        );
    }

    #[tokio::test]
    async fn test_error_without_json_body_uses_fallback() {
        let router = Router::new().route(
            "/api/rag",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
        );
        let server = spawn_mock_server(router).await;

        let err = client_for(server.endpoint())
            .rag_query("q", 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Request {
                status: 500,
                detail: None
            }
        ));
        assert_eq!(err.user_message("RAG query failed"), "RAG query failed");
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let router = Router::new().route(
            "/api/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"status": "healthy"}))
            }),
        );
        let server = spawn_mock_server(router).await;
        let client = RagApiClient::new(
            ClientConfig::new(server.endpoint()).with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = tokio_test::assert_err!(client.get_health().await);
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let err = client_for(unused_endpoint())
            .get_health()
            .await
            .unwrap_err();
        assert!(err.is_network(), "expected network error, got {err:?}");
        assert_eq!(
            err.user_message("Failed to fetch health status"),
            "Failed to fetch health status"
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let router = Router::new().route(
            "/api/rag",
            post(|| async { Json(json!({"unexpected": true})) }),
        );
        let server = spawn_mock_server(router).await;

        let err = client_for(server.endpoint())
            .rag_query("q", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_empty_base_path_targets_root() {
        let router = Router::new().route(
            "/health",
            get(|| async { Json(json!({"status": "unhealthy"})) }),
        );
        let server = spawn_mock_server(router).await;
        let client =
            RagApiClient::new(ClientConfig::new(server.endpoint()).with_base_path("")).unwrap();

        let health = client.get_health().await.unwrap();
        assert_eq!(health.status, HealthStatus::Unhealthy);
        assert_eq!(health.vector_count, 0);
    }
}
