//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: draft profile, persisted user record and account identifier
//! - `service`: traits for the authentication and profile-store backends
//!
//! # Usage
//!
//! ```ignore
//! use signup_core::user::{AccountId, DraftProfile, UserRecord};
//! use signup_core::user::{AuthService, ProfileStore};
//! ```

mod model;
mod service;

// Re-export public API
pub use model::{AccountId, DraftProfile, Gender, UserRecord};
pub use service::{AuthService, ProfileStore};
