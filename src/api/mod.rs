pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use state::ApiState;
pub use routes::configure_routes;
pub use error::{ApiError, ApiResult};
