use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::pagination::Pagination;
use service::credential::domain::{CredentialData, CredentialResponse};

use crate::errors::ApiError;
use crate::state::AppState;

/// Raw paging parameters; unusable values fall back to the defaults.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref())
    }
}

#[utoipa::path(
    get, path = "/api/v1/credentials", tag = "credentials",
    params(ListQuery),
    responses(
        (status = 200, description = "Credentials, newest first", body = [crate::openapi::CredentialDoc]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<CredentialResponse>>, ApiError> {
    let items = state.credentials.get_list(q.pagination()).await?;
    info!(count = items.len(), "list credentials");
    Ok(Json(items))
}

#[utoipa::path(
    post, path = "/api/v1/credentials", tag = "credentials",
    request_body = crate::openapi::CredentialInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CredentialDoc),
        (status = 400, description = "Malformed body"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CredentialData>, JsonRejection>,
) -> Result<Json<CredentialResponse>, ApiError> {
    let Json(data) = payload?;
    Ok(Json(state.credentials.create(data).await?))
}

#[utoipa::path(
    get, path = "/api/v1/credentials/{id}", tag = "credentials",
    params(("id" = i32, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::CredentialDoc),
        (status = 404, description = "Not found")
    )
)]
pub async fn get(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<Json<CredentialResponse>, ApiError> {
    let Path(id) = id?;
    state.credentials.get_by_id(id).await?.map(Json).ok_or_else(|| ApiError::not_found("credential"))
}

#[utoipa::path(
    patch, path = "/api/v1/credentials/{id}", tag = "credentials",
    params(("id" = i32, Path, description = "Credential id")),
    request_body = crate::openapi::CredentialInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CredentialDoc),
        (status = 404, description = "Not found"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CredentialData>, JsonRejection>,
) -> Result<Json<CredentialResponse>, ApiError> {
    let Path(id) = id?;
    let Json(data) = payload?;
    state.credentials.update(id, data).await?.map(Json).ok_or_else(|| ApiError::not_found("credential"))
}

#[utoipa::path(
    delete, path = "/api/v1/credentials/{id}", tag = "credentials",
    params(("id" = i32, Path, description = "Credential id")),
    responses((status = 204, description = "Deleted or already absent"))
)]
pub async fn delete(State(state): State<AppState>, id: Result<Path<i32>, PathRejection>) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.credentials.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
