//! Signup workflow.
//!
//! # Module Structure
//!
//! - `view_model`: draft state, validation entry point and the two-stage workflow
//! - `in_flight`: guard that keeps one submission running at a time

mod in_flight;
mod view_model;

pub use view_model::SignupViewModel;
