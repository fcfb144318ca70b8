//! Business logic services for AgroRegistro

pub mod banana_sale;
pub mod cacao_sale;
pub mod fertilizer;
pub mod reporting;
pub mod wrapping;

pub use banana_sale::BananaSaleService;
pub use cacao_sale::CacaoSaleService;
pub use fertilizer::FertilizerService;
pub use reporting::ReportingService;
pub use wrapping::WrappingService;
