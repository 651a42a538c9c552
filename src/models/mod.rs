pub mod catalog;
pub mod issuer;
pub mod quotation;
pub mod stamp;

pub use catalog::*;
pub use issuer::*;
pub use quotation::*;
pub use stamp::*;
