/*
 * Responsibility
 * - JSON bodies for unmatched paths (404) and unsupported methods (405)
 */
use crate::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
