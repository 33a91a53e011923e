use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::credential::repo::seaorm::SeaOrmCredentialRepository;
use service::credential::CredentialService;
use service::server::repo::seaorm::SeaOrmServerRepository;
use service::server::ServerService;
use service::validation::RuleValidator;

pub type Credentials = CredentialService<SeaOrmCredentialRepository>;
pub type Servers = ServerService<SeaOrmServerRepository, SeaOrmCredentialRepository>;

/// Shared handler state. Both services read credentials through one repository.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<Credentials>,
    pub servers: Arc<Servers>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let credential_repo = Arc::new(SeaOrmCredentialRepository { db: db.clone() });
        let server_repo = Arc::new(SeaOrmServerRepository { db });
        Self {
            credentials: Arc::new(CredentialService::new(Arc::clone(&credential_repo), RuleValidator)),
            servers: Arc::new(ServerService::new(server_repo, credential_repo, RuleValidator)),
        }
    }
}
