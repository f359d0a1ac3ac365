use wa_pricing_sdk::errors::PricingError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

impl DomainError {
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for PricingError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::Unauthenticated => Self::unauthenticated(),
            DomainError::Database(_) => Self::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_cause_is_not_leaked_to_sdk_error() {
        let e = DomainError::from(anyhow::anyhow!("connection refused to 10.0.0.5"));
        let sdk: PricingError = e.into();
        assert_eq!(sdk, PricingError::Internal);
        assert!(!sdk.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn validation_keeps_field_in_message() {
        let sdk: PricingError =
            DomainError::validation("email", "must be a valid email address").into();
        assert_eq!(
            sdk,
            PricingError::validation("email: must be a valid email address")
        );
    }
}
