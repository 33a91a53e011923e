use async_trait::async_trait;
use common::pagination::Pagination;

use super::domain::Server;
use crate::errors::StorageError;

/// Persistence contract for servers.
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Insert and write the storage-assigned id back into `server`.
    async fn create(&self, server: &mut Server) -> Result<(), StorageError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Server>, StorageError>;
    /// Newest first (descending id).
    async fn get_list(&self, page: Pagination) -> Result<Vec<Server>, StorageError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), StorageError>;
    /// Overwrite every mutable column of row `id`; `false` when it does not exist.
    async fn update(&self, server: &Server, id: i32) -> Result<bool, StorageError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i32, Server>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockServerRepository {
        table: Mutex<Table>,
        fail: bool,
    }

    impl MockServerRepository {
        /// Every call fails with a storage error.
        pub fn failing() -> Self { Self { fail: true, ..Self::default() } }

        fn check(&self) -> Result<(), StorageError> {
            if self.fail { Err(StorageError::new("mock storage unavailable")) } else { Ok(()) }
        }
    }

    #[async_trait]
    impl ServerRepository for MockServerRepository {
        async fn create(&self, server: &mut Server) -> Result<(), StorageError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            table.last_id += 1;
            server.id = table.last_id;
            table.rows.insert(server.id, server.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Server>, StorageError> {
            self.check()?;
            Ok(self.table.lock().unwrap().rows.get(&id).cloned())
        }

        async fn get_list(&self, page: Pagination) -> Result<Vec<Server>, StorageError> {
            self.check()?;
            let (_, limit) = page.normalize();
            let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let take = usize::try_from(limit).unwrap_or(usize::MAX);
            let table = self.table.lock().unwrap();
            Ok(table.rows.values().rev().skip(skip).take(take).cloned().collect())
        }

        async fn delete_by_id(&self, id: i32) -> Result<(), StorageError> {
            self.check()?;
            self.table.lock().unwrap().rows.remove(&id);
            Ok(())
        }

        async fn update(&self, server: &Server, id: i32) -> Result<bool, StorageError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            match table.rows.get_mut(&id) {
                Some(row) => {
                    let created_at = std::mem::take(&mut row.created_at);
                    *row = Server { id, created_at, ..server.clone() };
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}
