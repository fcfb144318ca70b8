//! Shared types and models for AgroRegistro
//!
//! This crate contains the record types shared between the backend and any
//! other components of the system (report tooling, import scripts).

pub mod models;
pub mod reports;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
