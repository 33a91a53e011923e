use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over an already migrated database.
pub fn build_app(db: DatabaseConnection) -> Router {
    routes::build_router(AppState::new(db), build_cors())
}

/// Connect, migrate and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrations_applied", "database schema is up to date");

    let app = build_app(db);
    let bind = cfg.server.bind_addr();
    let listener = TcpListener::bind(&bind)
        .await
        .map_err(|source| StartupError::Bind { addr: bind.clone(), source })?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, env = %cfg.app.env, "starting logman server");
    axum::serve(listener, app).await?;
    Ok(())
}
