pub mod alerts;
pub mod network;
pub mod opportunities;
pub mod ops;
pub mod wallet;

use crate::errors::AppError;

/// Fallback for unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".into())
}
