//! Credentials: named references to the key files used to reach servers.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CredentialService;
