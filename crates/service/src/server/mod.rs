//! Servers: monitored hosts, each pointing at its logs and at the credential
//! used to reach it.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ServerService;
