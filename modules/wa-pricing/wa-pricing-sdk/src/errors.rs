//! Error types for the pricing SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error")]
    Internal,
}

impl PricingError {
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
