pub mod api;
pub mod core;
pub mod generators;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::core::{AppConfig, QuotationError, QuotationResult};
pub use generators::{QuotationGenerator, QuotationSummary};
pub use models::{
    IssuerProfile, LineItem, ProductCatalog, QuotationRequest,
    StampLayout, StampOutcome, SupplyRatio,
};
