use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown paint condition `{0}` (expected good|fair|poor)")]
    UnknownPaintCondition(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures seen by a boundary operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("request body could not be decoded: {0}")]
    Decode(String),
    #[error("integration failure: {0}")]
    Integration(String),
    #[error("component panicked: {0}")]
    Panicked(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("invalid input: {message}")]
    Invalid { message: String, correlation_id: String },
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    /// Text returned to the caller. Field messages are written for users and
    /// pass through; every other failure is reported as `fixed`.
    pub fn user_message(&self, fixed: &str) -> String {
        match self {
            Self::Invalid { message, .. } => message.clone(),
            Self::BadRequest { .. } | Self::ServiceUnavailable { .. } | Self::Internal { .. } => {
                fixed.to_owned()
            }
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::Invalid { correlation_id, .. }
            | Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::BadRequest { .. })
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        match self {
            Self::Validation(errors) => {
                InterfaceError::Invalid { message: errors.to_string(), correlation_id }
            }
            Self::Decode(message) => InterfaceError::BadRequest { message, correlation_id },
            Self::Integration(message) => {
                InterfaceError::ServiceUnavailable { message, correlation_id }
            }
            Self::Panicked(message) => InterfaceError::Internal { message, correlation_id },
        }
    }
}
