//! Database models for the AgroRegistro backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
