use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{ApplicationInfo, Health};
use common::APPLICATION;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod credentials;
pub mod servers;

/// Application name.
#[utoipa::path(get, path = "/", tag = "meta", responses((status = 200, description = "Application info", body = crate::openapi::ApplicationInfoDoc)))]
pub async fn index() -> Json<ApplicationInfo> {
    Json(ApplicationInfo { application: APPLICATION })
}

#[utoipa::path(get, path = "/health", tag = "meta", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/credentials", get(credentials::list).post(credentials::create))
        .route(
            "/credentials/:id",
            get(credentials::get).patch(credentials::update).delete(credentials::delete),
        )
        .route("/servers", get(servers::list).post(servers::create))
        .route("/servers/:id", get(servers::get).patch(servers::update).delete(servers::delete))
}

/// Build the full application router: meta routes, the `/api/v1` resources
/// and the API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/v1", api_v1())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
