use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use clinic_backend::{build_router, AppState, ClinicServiceFactory};
use clinic_config::{AppConfig, ServerConfig};

fn app_with(config: AppConfig) -> Router {
    let factory = Arc::new(ClinicServiceFactory::from_services(None, None));
    let state = AppState::with_factory(Arc::new(config), factory).unwrap();
    build_router(&state)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("clinic-{}-{}-{}", name, std::process::id(), nanos));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn booking_routes_are_nested_under_api() {
    let app = app_with(AppConfig::default());

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(health["status"], "OK");
    assert_eq!(health["googleCalendar"], false);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_root_greets() {
    let app = app_with(AppConfig::default());
    let response = app
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("clinic booking API"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app_with(AppConfig::default());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/appointment-modes")
                .header(header::ORIGIN, "https://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn frontend_is_served_with_index_fallback() {
    let dir = scratch_dir("static");
    std::fs::write(dir.join("index.html"), "<html>wizard</html>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('hi')").unwrap();

    let app = app_with(AppConfig {
        server: ServerConfig {
            static_dir: Some(dir.to_string_lossy().into_owned()),
            ..Default::default()
        },
        ..Default::default()
    });

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/app.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "console.log('hi')");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/booking/step-2").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "<html>wizard</html>");

    // API routes still win over the fallback
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(body_string(response).await.contains("\"status\":\"OK\""));

    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn no_static_dir_means_404_outside_api() {
    let app = app_with(AppConfig::default());
    let response = app
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
