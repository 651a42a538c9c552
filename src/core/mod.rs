pub mod config;
pub mod error;
pub mod format;

pub use self::config::*;
pub use self::error::*;
pub use self::format::*;
