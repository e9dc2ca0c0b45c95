//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid IATA location code
    #[error("Invalid IATA code: {0}")]
    InvalidIataCode(String),

    /// Invalid passenger composition
    #[error("Invalid passengers: {0}")]
    InvalidPassengers(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Date parsing error
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_iata_error_message() {
        let err = DomainError::InvalidIataCode("LONDON".to_string());
        assert_eq!(err.to_string(), "Invalid IATA code: LONDON");
    }

    #[test]
    fn invalid_passengers_error_message() {
        let err = DomainError::InvalidPassengers("no adults".to_string());
        assert_eq!(err.to_string(), "Invalid passengers: no adults");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }

    #[test]
    fn invalid_date_error_message() {
        let err = DomainError::InvalidDate("2025-02-30".to_string());
        assert_eq!(err.to_string(), "Invalid date: 2025-02-30");
    }
}
