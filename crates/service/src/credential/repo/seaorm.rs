use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, QuerySelect, Set, Unchanged};

use common::pagination::Pagination;
use models::credential;

use crate::credential::domain::Credential;
use crate::credential::repository::CredentialRepository;
use crate::errors::StorageError;

/// SeaORM-backed repository implementation.
pub struct SeaOrmCredentialRepository {
    pub db: DatabaseConnection,
}

impl From<credential::Model> for Credential {
    fn from(m: credential::Model) -> Self {
        Self { id: m.id, name: m.name, path: m.path, created_at: m.created_at, updated_at: m.updated_at }
    }
}

#[async_trait::async_trait]
impl CredentialRepository for SeaOrmCredentialRepository {
    async fn create(&self, c: &mut Credential) -> Result<(), StorageError> {
        let am = credential::ActiveModel {
            id: NotSet,
            name: Set(c.name.clone()),
            path: Set(c.path.clone()),
            created_at: Set(c.created_at.clone()),
            updated_at: Set(c.updated_at.clone()),
        };
        let inserted = am.insert(&self.db).await?;
        c.id = inserted.id;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Credential>, StorageError> {
        let found = credential::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Credential::from))
    }

    async fn get_list(&self, page: Pagination) -> Result<Vec<Credential>, StorageError> {
        let (_, limit) = page.normalize();
        let rows = credential::Entity::find()
            .order_by_desc(credential::Column::Id)
            .offset(page.offset())
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Credential::from).collect())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), StorageError> {
        credential::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn update(&self, c: &Credential) -> Result<bool, StorageError> {
        // created_at stays as stored
        let am = credential::ActiveModel {
            id: Unchanged(c.id),
            name: Set(c.name.clone()),
            path: Set(c.path.clone()),
            created_at: NotSet,
            updated_at: Set(c.updated_at.clone()),
        };
        match am.update(&self.db).await {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn credential(name: &str, at: &str) -> Credential {
        Credential { id: 0, name: name.into(), path: format!("/keys/{name}.pem"), created_at: at.into(), updated_at: at.into() }
    }

    #[tokio::test]
    async fn credential_repository_crud() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmCredentialRepository { db };

        let mut c = credential("prod-key", "2024-01-01T00:00:00.000000Z");
        repo.create(&mut c).await?;
        assert_eq!(c.id, 1);
        assert_eq!(repo.get_by_id(c.id).await?, Some(c.clone()));

        let changed = Credential {
            name: "rotated".into(),
            created_at: "ignored".into(),
            updated_at: "2024-02-01T00:00:00.000000Z".into(),
            ..c.clone()
        };
        assert!(repo.update(&changed).await?);
        let stored = repo.get_by_id(c.id).await?.unwrap();
        assert_eq!(stored.name, "rotated");
        assert_eq!(stored.created_at, c.created_at);
        assert_eq!(stored.updated_at, changed.updated_at);

        repo.delete_by_id(c.id).await?;
        assert!(repo.get_by_id(c.id).await?.is_none());
        // deleting again is fine
        repo.delete_by_id(c.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_false() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCredentialRepository { db: get_db().await? };
        let ghost = Credential { id: 42, ..credential("ghost", "2024-01-01T00:00:00.000000Z") };
        assert!(!repo.update(&ghost).await?);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paginated() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCredentialRepository { db: get_db().await? };
        for i in 1..=5 {
            repo.create(&mut credential(&format!("key{i}"), "2024-01-01T00:00:00.000000Z")).await?;
        }
        let page1: Vec<i32> = repo.get_list(Pagination::new(1, 2)).await?.iter().map(|c| c.id).collect();
        let page3: Vec<i32> = repo.get_list(Pagination::new(3, 2)).await?.iter().map(|c| c.id).collect();
        assert_eq!(page1, vec![5, 4]);
        assert_eq!(page3, vec![1]);
        assert!(repo.get_list(Pagination::new(4, 2)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_pages_are_empty() -> Result<(), anyhow::Error> {
        let repo = SeaOrmCredentialRepository { db: get_db().await? };
        repo.create(&mut credential("prod-key", "2024-01-01T00:00:00.000000Z")).await?;
        assert!(repo.get_list(Pagination::new(u32::MAX, 10)).await?.is_empty());
        assert!(repo.get_list(Pagination::new(u32::MAX, u32::MAX)).await?.is_empty());
        assert_eq!(repo.get_list(Pagination::new(1, u32::MAX)).await?.len(), 1);
        Ok(())
    }
}
