//! Parse and validation errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    #[error("unknown vehicle category: {0}")]
    UnknownVehicleCategory(String),

    #[error("unknown verification status: {0}")]
    UnknownStatus(String),

    #[error("invalid step {0}: only steps 1 and 2 exist")]
    InvalidStep(u32),

    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}
