use uuid::Uuid;

use crate::errors::AppError;

/// Validates if a string is a valid project id
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::BadRequest(format!("Invalid project id: {}", id)))
}
