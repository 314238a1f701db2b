//! Convenience result type alias for Quire.

use crate::error::AppError;

/// A specialized `Result` type for Quire operations.
pub type AppResult<T> = Result<T, AppError>;
