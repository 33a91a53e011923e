use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{info, instrument};

use super::domain::{Credential, CredentialData, CredentialResponse};
use super::repository::CredentialRepository;
use crate::errors::ServiceError;
use crate::timestamp;
use crate::validation::{RuleValidator, Validator};

/// Credential business service independent of web framework
pub struct CredentialService<R: CredentialRepository, V: Validator = RuleValidator> {
    repo: Arc<R>,
    validator: V,
}

impl<R: CredentialRepository, V: Validator> CredentialService<R, V> {
    pub fn new(repo: Arc<R>, validator: V) -> Self { Self { repo, validator } }

    /// Validate and store a new credential.
    ///
    /// # Examples
    /// ```
    /// use service::credential::{CredentialService, domain::CredentialData, repository::mock::MockCredentialRepository};
    /// use service::validation::RuleValidator;
    /// use std::sync::Arc;
    /// let svc = CredentialService::new(Arc::new(MockCredentialRepository::default()), RuleValidator);
    /// let data = CredentialData { name: "prod-key".into(), path: "/keys/prod.pem".into() };
    /// let created = tokio_test::block_on(svc.create(data)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.created_at, created.updated_at);
    /// ```
    #[instrument(skip(self, data), fields(name = %data.name))]
    pub async fn create(&self, data: CredentialData) -> Result<CredentialResponse, ServiceError> {
        let now = timestamp::now();
        let mut credential = Credential {
            id: 0,
            name: data.name,
            path: data.path,
            created_at: now.clone(),
            updated_at: now,
        };
        self.validator.validate(&credential)?;

        self.repo
            .create(&mut credential)
            .await
            .map_err(|e| ServiceError::storage("error during Credential creation", e))?;
        info!(credential_id = credential.id, "credential_created");
        Ok(credential.into())
    }

    /// Replace name and path. `Ok(None)` when the credential does not exist.
    ///
    /// Read and write are separate statements: concurrent updates of the same
    /// credential are last-writer-wins.
    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i32, data: CredentialData) -> Result<Option<CredentialResponse>, ServiceError> {
        let Some(existing) = self.find(id).await? else {
            return Ok(None);
        };
        let credential = Credential {
            id,
            name: data.name,
            path: data.path,
            created_at: existing.created_at,
            updated_at: timestamp::now(),
        };
        self.validator.validate(&credential)?;

        let updated = self
            .repo
            .update(&credential)
            .await
            .map_err(|e| ServiceError::storage("error during Credential update", e))?;
        if !updated {
            return Ok(None);
        }
        info!(credential_id = id, "credential_updated");
        self.get_by_id(id).await
    }

    /// Delete by id; a missing id is not an error.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        self.repo
            .delete_by_id(id)
            .await
            .map_err(|e| ServiceError::storage("error during Credential deletion", e))?;
        info!(credential_id = id, "credential_deleted");
        Ok(())
    }

    /// Page of credentials, newest first.
    pub async fn get_list(&self, page: Pagination) -> Result<Vec<CredentialResponse>, ServiceError> {
        let credentials = self
            .repo
            .get_list(page)
            .await
            .map_err(|e| ServiceError::storage("error during Credential list getting", e))?;
        Ok(credentials.into_iter().map(CredentialResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<CredentialResponse>, ServiceError> {
        Ok(self.find(id).await?.map(CredentialResponse::from))
    }

    async fn find(&self, id: i32) -> Result<Option<Credential>, ServiceError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| ServiceError::storage("error during Credential search by id", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::repository::mock::MockCredentialRepository;
    use crate::errors::ErrorKind;
    use std::time::Duration;

    fn service() -> CredentialService<MockCredentialRepository> {
        CredentialService::new(Arc::new(MockCredentialRepository::default()), RuleValidator)
    }

    fn data(name: &str, path: &str) -> CredentialData {
        CredentialData { name: name.into(), path: path.into() }
    }

    #[tokio::test]
    async fn create_echoes_input_with_new_id() {
        let svc = service();
        let created = svc.create(data("prod-key", "/keys/prod.pem")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.name, "prod-key");
        assert_eq!(created.path, "/keys/prod.pem");
        assert!(!created.created_at.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let second = svc.create(data("stage-key", "/keys/stage.pem")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn create_rejects_empty_fields() {
        let svc = service();
        let err = svc.create(data("", "")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let ServiceError::Validation(errs) = err else { panic!("expected validation error") };
        assert_eq!(errs.errors.len(), 2);
        assert!(errs.contains("'name'"));
        assert!(errs.contains("'path'"));
        assert!(svc.get_list(Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failures_are_wrapped_with_operation() {
        let svc = CredentialService::new(Arc::new(MockCredentialRepository::failing()), RuleValidator);
        let err = svc.create(data("k", "/k")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.to_string().starts_with("error during Credential creation"));

        let err = svc.get_by_id(1).await.unwrap_err();
        assert!(err.to_string().starts_with("error during Credential search by id"));
        let err = svc.delete_by_id(1).await.unwrap_err();
        assert!(err.to_string().starts_with("error during Credential deletion"));
    }

    #[tokio::test]
    async fn get_by_id_is_stable_and_none_when_absent() {
        let svc = service();
        let created = svc.create(data("prod-key", "/keys/prod.pem")).await.unwrap();
        let a = svc.get_by_id(created.id).await.unwrap();
        let b = svc.get_by_id(created.id).await.unwrap();
        assert_eq!(a, Some(created));
        assert_eq!(a, b);
        assert_eq!(svc.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_preserves_created_at_and_advances_updated_at() {
        let svc = service();
        let created = svc.create(data("prod-key", "/keys/prod.pem")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = svc.update(created.id, data("rotated", "/keys/rotated.pem")).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "rotated");
        assert_eq!(updated.path, "/keys/rotated.pem");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(svc.get_by_id(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let svc = service();
        assert_eq!(svc.update(7, data("x", "/x")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_validates_full_record() {
        let svc = service();
        let created = svc.create(data("prod-key", "/keys/prod.pem")).await.unwrap();
        let err = svc.update(created.id, data("prod-key", "")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(svc.get_by_id(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn delete_then_get_is_none_and_repeat_delete_is_ok() {
        let svc = service();
        let created = svc.create(data("prod-key", "/keys/prod.pem")).await.unwrap();
        svc.delete_by_id(created.id).await.unwrap();
        assert_eq!(svc.get_by_id(created.id).await.unwrap(), None);
        svc.delete_by_id(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn list_second_page_holds_ranks_eleven_to_twenty() {
        let svc = service();
        for i in 1..=25 {
            svc.create(data(&format!("key{i}"), "/k")).await.unwrap();
        }
        let page = svc.get_list(Pagination::new(2, 10)).await.unwrap();
        let ids: Vec<i32> = page.iter().map(|c| c.id).collect();
        assert_eq!(ids, (6..=15).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn list_honours_limits_above_one_hundred() {
        let svc = service();
        for i in 1..=120 {
            svc.create(data(&format!("key{i}"), "/k")).await.unwrap();
        }
        assert_eq!(svc.get_list(Pagination::new(1, 200)).await.unwrap().len(), 120);
        let page: Vec<i32> = svc.get_list(Pagination::new(2, 50)).await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(page, (21..=70).rev().collect::<Vec<_>>());
        assert!(svc.get_list(Pagination::new(u32::MAX, u32::MAX)).await.unwrap().is_empty());
    }
}
