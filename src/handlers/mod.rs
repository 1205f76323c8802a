pub mod assets;
pub mod dashboard;
pub mod investments;
pub mod liabilities;
pub mod transactions;
pub mod users;

use uuid::Uuid;

use crate::error::ApiError;

/// Validate the user-id path parameter before any store access.
pub(crate) fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_input("Invalid user ID format"))
}
