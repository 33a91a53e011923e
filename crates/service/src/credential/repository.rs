use async_trait::async_trait;
use common::pagination::Pagination;

use super::domain::Credential;
use crate::errors::StorageError;

/// Persistence contract for credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Insert and write the storage-assigned id back into `credential`.
    async fn create(&self, credential: &mut Credential) -> Result<(), StorageError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Credential>, StorageError>;
    /// Newest first (descending id).
    async fn get_list(&self, page: Pagination) -> Result<Vec<Credential>, StorageError>;
    async fn delete_by_id(&self, id: i32) -> Result<(), StorageError>;
    /// Overwrite name, path and `updated_at`; `false` when no row has that id.
    async fn update(&self, credential: &Credential) -> Result<bool, StorageError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Table {
        rows: BTreeMap<i32, Credential>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockCredentialRepository {
        table: Mutex<Table>,
        fail: bool,
    }

    impl MockCredentialRepository {
        /// Every call fails with a storage error.
        pub fn failing() -> Self { Self { fail: true, ..Self::default() } }

        fn check(&self) -> Result<(), StorageError> {
            if self.fail { Err(StorageError::new("mock storage unavailable")) } else { Ok(()) }
        }
    }

    #[async_trait]
    impl CredentialRepository for MockCredentialRepository {
        async fn create(&self, credential: &mut Credential) -> Result<(), StorageError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            table.last_id += 1;
            credential.id = table.last_id;
            table.rows.insert(credential.id, credential.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Credential>, StorageError> {
            self.check()?;
            Ok(self.table.lock().unwrap().rows.get(&id).cloned())
        }

        async fn get_list(&self, page: Pagination) -> Result<Vec<Credential>, StorageError> {
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

        async fn update(&self, credential: &Credential) -> Result<bool, StorageError> {
            self.check()?;
            let mut table = self.table.lock().unwrap();
            match table.rows.get_mut(&credential.id) {
                Some(row) => {
                    row.name = credential.name.clone();
                    row.path = credential.path.clone();
                    row.updated_at = credential.updated_at.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}
