use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ApplicationInfoDoc { pub application: String }

#[derive(ToSchema)]
pub struct ValidationErrorsDoc { pub errors: Vec<String> }

#[derive(ToSchema)]
pub struct CredentialInputDoc { pub name: String, pub path: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct CredentialDoc {
    pub id: i32,
    pub name: String,
    pub path: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct LogLocationDoc {
    pub path: String,
    /// Must be `json`.
    pub format: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServerInputDoc {
    pub name: String,
    /// Hostname or IP address.
    pub host: String,
    pub credential_id: i32,
    pub log_location: LogLocationDoc,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServerDoc {
    pub id: i32,
    pub name: String,
    pub host: String,
    pub credential_id: i32,
    pub log_location: LogLocationDoc,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::routes::health,
        crate::routes::credentials::list,
        crate::routes::credentials::create,
        crate::routes::credentials::get,
        crate::routes::credentials::update,
        crate::routes::credentials::delete,
        crate::routes::servers::list,
        crate::routes::servers::create,
        crate::routes::servers::get,
        crate::routes::servers::update,
        crate::routes::servers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ApplicationInfoDoc,
            ValidationErrorsDoc,
            CredentialInputDoc,
            CredentialDoc,
            LogLocationDoc,
            ServerInputDoc,
            ServerDoc,
        )
    ),
    tags(
        (name = "meta"),
        (name = "credentials"),
        (name = "servers")
    )
)]
pub struct ApiDoc;
