//! Local backends and configuration loading for the signup crates.
//!
//! The service implementations here stand in for the hosted authentication
//! and document-database SDKs: in-memory ones for tests and demos, and a
//! directory of JSON documents for a persistent local profile store.

pub mod config_service;
pub mod in_memory_auth_service;
pub mod in_memory_profile_store;
pub mod json_dir_profile_store;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_auth_service::InMemoryAuthService;
pub use crate::in_memory_profile_store::InMemoryProfileStore;
pub use crate::json_dir_profile_store::JsonDirProfileStore;
