use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryOrder, QuerySelect, Set, Unchanged};

use common::pagination::Pagination;
use models::server;

use crate::errors::StorageError;
use crate::server::domain::{LogLocation, Server};
use crate::server::repository::ServerRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmServerRepository {
    pub db: DatabaseConnection,
}

impl From<server::Model> for Server {
    fn from(m: server::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            host: m.host,
            log_location: LogLocation { path: m.log_location_path, format: m.log_location_format },
            credential_id: m.credential_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[async_trait::async_trait]
impl ServerRepository for SeaOrmServerRepository {
    async fn create(&self, s: &mut Server) -> Result<(), StorageError> {
        let am = server::ActiveModel {
            id: NotSet,
            name: Set(s.name.clone()),
            host: Set(s.host.clone()),
            log_location_path: Set(s.log_location.path.clone()),
            log_location_format: Set(s.log_location.format.clone()),
            credential_id: Set(s.credential_id),
            created_at: Set(s.created_at.clone()),
            updated_at: Set(s.updated_at.clone()),
        };
        let inserted = am.insert(&self.db).await?;
        s.id = inserted.id;
        Ok(())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Server>, StorageError> {
        let found = server::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Server::from))
    }

    async fn get_list(&self, page: Pagination) -> Result<Vec<Server>, StorageError> {
        let (_, limit) = page.normalize();
        let rows = server::Entity::find()
            .order_by_desc(server::Column::Id)
            .offset(page.offset())
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Server::from).collect())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), StorageError> {
        server::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn update(&self, s: &Server, id: i32) -> Result<bool, StorageError> {
        let am = server::ActiveModel {
            id: Unchanged(id),
            name: Set(s.name.clone()),
            host: Set(s.host.clone()),
            log_location_path: Set(s.log_location.path.clone()),
            log_location_format: Set(s.log_location.format.clone()),
            credential_id: Set(s.credential_id),
            created_at: NotSet,
            updated_at: Set(s.updated_at.clone()),
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

    fn server(name: &str, credential_id: i32) -> Server {
        Server {
            id: 0,
            name: name.into(),
            host: format!("{name}.internal"),
            log_location: LogLocation { path: format!("/var/log/{name}"), format: "json".into() },
            credential_id,
            created_at: "2024-01-01T00:00:00.000000Z".into(),
            updated_at: "2024-01-01T00:00:00.000000Z".into(),
        }
    }

    #[tokio::test]
    async fn server_repository_crud() -> Result<(), anyhow::Error> {
        let repo = SeaOrmServerRepository { db: get_db().await? };

        let mut s = server("web1", 1);
        repo.create(&mut s).await?;
        assert_eq!(s.id, 1);
        assert_eq!(repo.get_by_id(s.id).await?, Some(s.clone()));

        let mut changed = server("db1", 2);
        changed.log_location.path = "/srv/db1.log".into();
        changed.updated_at = "2024-03-01T00:00:00.000000Z".into();
        changed.created_at = "ignored".into();
        assert!(repo.update(&changed, s.id).await?);

        let stored = repo.get_by_id(s.id).await?.unwrap();
        assert_eq!(stored.id, s.id);
        assert_eq!(stored.name, "db1");
        assert_eq!(stored.host, "db1.internal");
        assert_eq!(stored.credential_id, 2);
        assert_eq!(stored.log_location.path, "/srv/db1.log");
        assert_eq!(stored.created_at, s.created_at);
        assert_eq!(stored.updated_at, "2024-03-01T00:00:00.000000Z");

        repo.delete_by_id(s.id).await?;
        assert!(repo.get_by_id(s.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_false() -> Result<(), anyhow::Error> {
        let repo = SeaOrmServerRepository { db: get_db().await? };
        assert!(!repo.update(&server("ghost", 1), 9).await?);
        Ok(())
    }

    #[tokio::test]
    async fn list_orders_by_id_descending() -> Result<(), anyhow::Error> {
        let repo = SeaOrmServerRepository { db: get_db().await? };
        for i in 1..=3 {
            repo.create(&mut server(&format!("web{i}"), 1)).await?;
        }
        let names: Vec<String> = repo.get_list(Pagination::default()).await?.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["web3", "web2", "web1"]);
        Ok(())
    }
}
