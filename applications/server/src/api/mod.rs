/// API route modules
pub mod exercises;
pub mod extract;
pub mod health;
pub mod users;

use crate::error::ServerError;

/// Fallback for unmatched routes
pub async fn not_found() -> ServerError {
    ServerError::NotFound("not found".to_string())
}
