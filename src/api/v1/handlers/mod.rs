pub mod health;
pub mod me;

use crate::error::AppError;

/// Method fallback for every route, so a 405 keeps the JSON error shape.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
