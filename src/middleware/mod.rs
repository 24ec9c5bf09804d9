pub mod auth;
pub mod response;

pub use auth::{auth_gate, INVALID_TOKEN_MESSAGE};
pub use response::{ApiResponse, ApiResult};
