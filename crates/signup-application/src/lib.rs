//! Application layer for the signup screen.
//!
//! `SignupViewModel` binds the draft form, runs validation, and drives the
//! create-account / save-profile workflow against injected services.

pub mod signup;

pub use signup::SignupViewModel;
