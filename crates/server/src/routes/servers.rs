use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::server::domain::{ServerData, ServerResponse};

use super::credentials::ListQuery;
use crate::errors::ApiError;
use crate::state::AppState;

#[utoipa::path(
    get, path = "/api/v1/servers", tag = "servers",
    params(ListQuery),
    responses(
        (status = 200, description = "Servers, newest first", body = [crate::openapi::ServerDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<ServerResponse>>, ApiError> {
    let items = state.servers.get_list(q.pagination()).await?;
    info!(count = items.len(), "list servers");
    Ok(Json(items))
}

#[utoipa::path(
    post, path = "/api/v1/servers", tag = "servers",
    request_body = crate::openapi::ServerInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ServerDoc),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation failed or unknown credential", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ServerData>, JsonRejection>,
) -> Result<Json<ServerResponse>, ApiError> {
    let Json(data) = payload?;
    Ok(Json(state.servers.create(data).await?))
}

#[utoipa::path(
    get, path = "/api/v1/servers/{id}", tag = "servers",
    params(("id" = i32, Path, description = "Server id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ServerDoc),
        (status = 404, description = "Not found")
    )
)]
pub async fn get(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<ServerResponse>, ApiError> {
    let Path(id) = id?;
    state.servers.fetch_by_id(id).await?.map(Json).ok_or_else(|| ApiError::not_found("server"))
}

#[utoipa::path(
    patch, path = "/api/v1/servers/{id}", tag = "servers",
    params(("id" = i32, Path, description = "Server id")),
    request_body = crate::openapi::ServerInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServerDoc),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed or unknown credential", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ServerData>, JsonRejection>,
) -> Result<Json<ServerResponse>, ApiError> {
    let Path(id) = id?;
    let Json(data) = payload?;
    state.servers.update(id, data).await?.map(Json).ok_or_else(|| ApiError::not_found("server"))
}

#[utoipa::path(
    delete, path = "/api/v1/servers/{id}", tag = "servers",
    params(("id" = i32, Path, description = "Server id")),
    responses((status = 204, description = "Deleted or already absent"))
)]
pub async fn delete(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.servers.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
