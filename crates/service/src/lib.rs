//! Service layer for credentials and servers.
//! - Validates records before they reach storage.
//! - Enforces the server → credential reference.
//! - Depends on storage only through the repository traits, so the same
//!   services run over SeaORM or the in-memory mocks.

pub mod errors;
pub mod timestamp;
pub mod validation;
pub mod credential;
pub mod server;
#[cfg(test)]
pub mod test_support;
