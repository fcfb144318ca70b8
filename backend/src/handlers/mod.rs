//! HTTP request handlers for AgroRegistro

pub mod banana_sale;
pub mod cacao_sale;
pub mod fertilizer;
pub mod health;
pub mod reporting;
pub mod wrapping;

pub use banana_sale::*;
pub use cacao_sale::*;
pub use fertilizer::*;
pub use health::*;
pub use reporting::*;
pub use wrapping::*;
