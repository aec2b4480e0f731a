use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{connections, system};
use crate::state::AppState;

pub const CONNECTIONS_PATH: &str = "/backend/datasources/organizations/connections";

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/openapi.json", get(system::openapi))
        .merge(connection_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(&config.security) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn connection_routes() -> Router<AppState> {
    Router::new()
        .route(CONNECTIONS_PATH, get(connections::connections_list))
        .route(
            &format!("{}/:id", CONNECTIONS_PATH),
            get(connections::connection_get).patch(connections::connection_patch),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::PATCH, Method::OPTIONS])
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::seed::seed_connections;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::seeded().unwrap(), &AppConfig::default())
    }

    async fn read_body(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn patch_req(uri: &str, body: &str) -> Request<Body> {
        Request::patch(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn record_uri(id: &str) -> String {
        format!("{}/{}", CONNECTIONS_PATH, id)
    }

    async fn call(app: &Router, req: Request<Body>) -> Response<Body> {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn call_json(app: &Router, req: Request<Body>) -> Value {
        read_body(call(app, req).await).await
    }

    #[tokio::test]
    async fn list_returns_seed_in_order() {
        let resp = test_app().oneshot(get_req(CONNECTIONS_PATH)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        assert_eq!(body, serde_json::to_value(seed_connections()).unwrap());
        assert_eq!(body[0]["id"], "conn_001");
        assert_eq!(body[1]["id"], "conn_002");
    }

    #[tokio::test]
    async fn get_by_id() {
        let resp = test_app().oneshot(get_req(&record_uri("conn_002"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = read_body(resp).await;
        assert_eq!(body["id"], "conn_002");
        assert_eq!(body["credentials"]["AppName"], "CheraCare Mobile");
        assert_eq!(body["last_sync_at"], "2026-02-16T08:30:00+00:00");
    }

    #[tokio::test]
    async fn get_unknown_id_is_404() {
        let resp = test_app().oneshot(get_req(&record_uri("conn_999"))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = read_body(resp).await;
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Connection 'conn_999' not found.");
    }

    #[tokio::test]
    async fn patch_updates_only_last_sync_at() {
        let app = test_app();
        let before = call_json(&app, get_req(&record_uri("conn_001"))).await;
        assert!(before["last_sync_at"].is_null());

        let resp = app
            .clone()
            .oneshot(patch_req(
                &record_uri("conn_001"),
                r#"{"last_sync_at":"2026-02-19T10:00:00+00:00"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let patched = read_body(resp).await;
        assert_eq!(patched["last_sync_at"], "2026-02-19T10:00:00+00:00");

        let after = call_json(&app, get_req(&record_uri("conn_001"))).await;
        assert_eq!(after, patched);

        let mut expected = before.clone();
        expected["last_sync_at"] = json!("2026-02-19T10:00:00+00:00");
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn patch_twice_is_idempotent() {
        let app = test_app();
        let body = r#"{"last_sync_at":"2026-02-19T10:00:00+00:00"}"#;

        let first = call_json(&app, patch_req(&record_uri("conn_002"), body)).await;
        let list_after_first = call_json(&app, get_req(CONNECTIONS_PATH)).await;
        let second = call_json(&app, patch_req(&record_uri("conn_002"), body)).await;
        let list_after_second = call_json(&app, get_req(CONNECTIONS_PATH)).await;

        assert_eq!(first, second);
        assert_eq!(list_after_first, list_after_second);
    }

    #[tokio::test]
    async fn patch_malformed_timestamp_leaves_record_alone() {
        let app = test_app();
        let resp = app
            .clone()
            .oneshot(patch_req(&record_uri("conn_002"), r#"{"last_sync_at":"last tuesday"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = read_body(resp).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(
            body["field_errors"]["last_sync_at"],
            "Invalid timestamp format: last tuesday"
        );

        let after = call_json(&app, get_req(&record_uri("conn_002"))).await;
        assert_eq!(after["last_sync_at"], "2026-02-16T08:30:00+00:00");
    }

    #[tokio::test]
    async fn patch_naive_timestamp_rejected() {
        let body = r#"{"last_sync_at":"2026-02-19T10:00:00"}"#;
        let resp = call(&test_app(), patch_req(&record_uri("conn_001"), body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_missing_field_and_bad_json() {
        let app = test_app();

        let resp = app.clone().oneshot(patch_req(&record_uri("conn_001"), "{}")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = read_body(resp).await;
        assert_eq!(body["field_errors"]["last_sync_at"], "This field is required");

        let resp = app.oneshot(patch_req(&record_uri("conn_001"), "{not json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_body(resp).await["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn patch_non_object_body_is_invalid_json() {
        let app = test_app();

        for body in [r#"["2026-02-19T10:00:00+00:00"]"#, "[]", r#""2026-02-19T10:00:00+00:00""#] {
            let resp = call(&app, patch_req(&record_uri("conn_001"), body)).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {}", body);
            assert_eq!(read_body(resp).await["code"], "INVALID_JSON", "body {}", body);
        }

        let after = call_json(&app, get_req(&record_uri("conn_001"))).await;
        assert!(after["last_sync_at"].is_null());
        assert_eq!(after, serde_json::to_value(&seed_connections()[0]).unwrap());
    }

    #[tokio::test]
    async fn patch_unknown_id_is_404() {
        let app = test_app();
        let body = r#"{"last_sync_at":"2026-02-19T10:00:00+00:00"}"#;
        let resp = call(&app, patch_req(&record_uri("conn_404"), body)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let list = read_body(app.oneshot(get_req(CONNECTIONS_PATH)).await.unwrap()).await;
        assert_eq!(list, serde_json::to_value(seed_connections()).unwrap());
    }

    #[tokio::test]
    async fn patch_preserves_offset() {
        let body = r#"{"last_sync_at":"2026-02-19T15:30:00+05:30"}"#;
        let resp = call(&test_app(), patch_req(&record_uri("conn_001"), body)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["last_sync_at"], "2026-02-19T15:30:00+05:30");
    }

    #[tokio::test]
    async fn health_and_docs() {
        let app = test_app();

        let resp = app.clone().oneshot(get_req("/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["connections"], 2);

        let resp = app.clone().oneshot(get_req("/openapi.json")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_body(resp).await["openapi"], "3.0.3");

        let resp = app.oneshot(get_req("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn no_create_or_delete() {
        let app = test_app();
        let resp = app
            .clone()
            .oneshot(Request::delete(record_uri("conn_001")).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let resp = app
            .oneshot(Request::post(CONNECTIONS_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn cors_disabled_or_listed() {
        let mut security = AppConfig::default().security;
        security.enable_cors = false;
        assert!(cors_layer(&security).is_none());

        security.enable_cors = true;
        security.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(cors_layer(&security).is_some());
    }
}
