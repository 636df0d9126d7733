// --- File: crates/services/clinic_backend/src/router.rs ---
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app_state::AppState;

/// The full application: booking API under `/api`, optional docs and
/// frontend, CORS for any origin, request tracing.
pub fn build_router(state: &AppState) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the clinic booking API!" }))
        .merge(clinic_booking::routes(state.booking.clone()));

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    if let Some(static_dir) = state.config.server.static_dir.as_deref() {
        let index = Path::new(static_dir).join("index.html");
        if !index.is_file() {
            warn!("No index.html in {}; unknown paths will return 404", static_dir);
        }
        info!("Serving frontend from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(cors).layer(TraceLayer::new_for_http())
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    use clinic_booking::doc::BookingApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Clinic Booking API",
            version = "0.1.0",
            description = "Appointment slots and booking for the clinic",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        servers((url = "/api", description = "Main API Prefix")),
    )]
    struct ApiDoc;

    let mut openapi_doc = ApiDoc::openapi();
    openapi_doc.merge(BookingApiDoc::openapi());
    info!("📖 Adding Swagger UI at /api/docs");

    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
