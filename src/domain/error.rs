use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Advisory error: {0}")]
    AdvisoryError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn advisory(msg: impl Into<String>) -> Self {
        Self::AdvisoryError(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_advisory_error(&self) -> bool {
        matches!(self, Self::AdvisoryError(_))
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_match_their_variant_only() {
        let variants = [
            DomainError::advisory("timeout"),
            DomainError::configuration("GEMINI_API_KEY is not set"),
            DomainError::invalid_input("empty question"),
            DomainError::internal("join failed"),
        ];

        let advisory: Vec<bool> = variants.iter().map(|e| e.is_advisory_error()).collect();
        let configuration: Vec<bool> = variants
            .iter()
            .map(|e| e.is_configuration_error())
            .collect();

        assert_eq!(advisory, vec![true, false, false, false]);
        assert_eq!(configuration, vec![false, true, false, false]);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = DomainError::configuration("GEMINI_API_KEY is not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: GEMINI_API_KEY is not set"
        );
    }
}
