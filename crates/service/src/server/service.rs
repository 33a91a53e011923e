use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{info, instrument};

use super::domain::{Server, ServerData, ServerResponse};
use super::repository::ServerRepository;
use crate::credential::repository::CredentialRepository;
use crate::errors::ServiceError;
use crate::timestamp;
use crate::validation::{RuleValidator, Validator};

/// Server business service. Holds the credential store only to check that a
/// referenced credential exists.
pub struct ServerService<S: ServerRepository, C: CredentialRepository, V: Validator = RuleValidator> {
    repo: Arc<S>,
    credentials: Arc<C>,
    validator: V,
}

impl<S: ServerRepository, C: CredentialRepository, V: Validator> ServerService<S, C, V> {
    pub fn new(repo: Arc<S>, credentials: Arc<C>, validator: V) -> Self {
        Self { repo, credentials, validator }
    }

    /// Resolve the credential, validate and store a new server.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use service::credential::repository::{mock::MockCredentialRepository, CredentialRepository};
    /// use service::credential::domain::Credential;
    /// use service::server::{ServerService, domain::{ServerData, LogLocationModel}, repository::mock::MockServerRepository};
    /// use service::validation::RuleValidator;
    ///
    /// let credentials = Arc::new(MockCredentialRepository::default());
    /// let mut key = Credential { name: "prod-key".into(), path: "/keys/prod.pem".into(), ..Default::default() };
    /// tokio_test::block_on(credentials.create(&mut key)).unwrap();
    ///
    /// let svc = ServerService::new(Arc::new(MockServerRepository::default()), credentials, RuleValidator);
    /// let data = ServerData {
    ///     name: "web1".into(),
    ///     host: "10.0.0.5".into(),
    ///     credential_id: key.id,
    ///     log_location: LogLocationModel { path: "/var/log/web1".into(), format: "json".into() },
    /// };
    /// let created = tokio_test::block_on(svc.create(data)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.credential_id, 1);
    /// ```
    #[instrument(skip(self, data), fields(name = %data.name, credential_id = data.credential_id))]
    pub async fn create(&self, data: ServerData) -> Result<ServerResponse, ServiceError> {
        self.ensure_credential(data.credential_id).await?;

        let now = timestamp::now();
        let mut server = Server { created_at: now.clone(), updated_at: now, ..Server::default() };
        server.apply(data);
        self.validator.validate(&server)?;

        self.repo
            .create(&mut server)
            .await
            .map_err(|e| ServiceError::storage("error during Server creation", e))?;
        info!(server_id = server.id, "server_created");
        Ok(server.into())
    }

    pub async fn fetch_by_id(&self, id: i32) -> Result<Option<ServerResponse>, ServiceError> {
        Ok(self.find(id).await?.map(ServerResponse::from))
    }

    /// Page of servers, newest first.
    pub async fn get_list(&self, page: Pagination) -> Result<Vec<ServerResponse>, ServiceError> {
        let servers = self
            .repo
            .get_list(page)
            .await
            .map_err(|e| ServiceError::storage("error during Server list getting", e))?;
        Ok(servers.into_iter().map(ServerResponse::from).collect())
    }

    /// Full replace of the mutable fields. `Ok(None)` when the server does not
    /// exist, or disappeared before the write landed.
    ///
    /// No optimistic locking: concurrent updates of the same server are
    /// last-writer-wins.
    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i32, data: ServerData) -> Result<Option<ServerResponse>, ServiceError> {
        let Some(mut server) = self.find(id).await? else {
            return Ok(None);
        };
        self.ensure_credential(data.credential_id).await?;

        server.apply(data);
        server.updated_at = timestamp::now();
        self.validator.validate(&server)?;

        let updated = self
            .repo
            .update(&server, id)
            .await
            .map_err(|e| ServiceError::storage("error during Server update", e))?;
        if !updated {
            return Ok(None);
        }
        info!(server_id = id, "server_updated");
        Ok(Some(server.into()))
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| ServiceError::storage("error during Server deletion", e))?;
        info!(server_id = id, "server_deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<Option<Server>, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::storage("error during Server search by id", e))
    }

    async fn ensure_credential(&self, credential_id: i32) -> Result<(), ServiceError> {
        let found = self
            .credentials
            .get_by_id(credential_id)
            .await
            .map_err(|e| ServiceError::storage("error during Credential search by id", e))?;
        match found {
            Some(_) => Ok(()),
            None => Err(ServiceError::validation(format!("credential with id {credential_id} not found"))),
        }
    }
}
