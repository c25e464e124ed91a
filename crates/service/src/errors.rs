use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use models::errors::ModelError;

/// Field whose uniqueness a write would break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniqueField {
    Email,
    Phone,
}

impl UniqueField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueField::Email => "email",
            UniqueField::Phone => "phone",
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("another customer with this {0} is already present")]
    Conflict(UniqueField),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(e: impl fmt::Display) -> Self { Self::Storage(e.to_string()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(UniqueField::Email) => 1002,
            ServiceError::Conflict(UniqueField::Phone) => 1003,
            ServiceError::NotFound(_) => 1004,
            ServiceError::Storage(_) => 1200,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NotFound(what) => ServiceError::NotFound(format!("{what} not found")),
            // the constraint or column name tells which field collided
            ModelError::UniqueViolation(msg) if msg.contains("email") => ServiceError::Conflict(UniqueField::Email),
            ModelError::UniqueViolation(msg) if msg.contains("phone") => ServiceError::Conflict(UniqueField::Phone),
            other => ServiceError::Storage(other.to_string()),
        }
    }
}
