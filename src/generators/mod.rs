pub mod quotation;

pub use quotation::{layout, QuotationGenerator, QuotationSummary};
