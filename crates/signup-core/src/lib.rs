//! Domain layer for the signup screen.
//!
//! Holds the draft/user models, the form validator, the remote service
//! traits the workflow talks to, and the events it publishes.

pub mod config;
pub mod error;
pub mod event;
pub mod user;
pub mod validation;

// Re-export common error type
pub use error::{Result, SignupError};
pub use event::SignupEvent;
