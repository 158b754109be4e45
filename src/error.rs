//! Error types for the rate cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Errors raised by the persistent rate store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Bad input rejected before anything touches the table
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Underlying SQLite failure
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

// == Conversion Error Enum ==
/// Errors surfaced to the caller of a rate lookup or conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Bad currency code or amount supplied by the caller
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The provider answered with a rate that is not positive and finite
    #[error("Provider returned an invalid rate: {0}")]
    InvalidRate(f64),

    /// The provider could not be reached, failed, or timed out
    #[error("Rate provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The cached lookup itself failed
    #[error("Rate store failure: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ConversionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ConversionError::Validation(msg),
            other => ConversionError::Storage(other),
        }
    }
}

// == Provider Error Enum ==
/// Errors raised by the remote rate and currency directory services.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport failure (connect, TLS, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The service answered with an error document
    #[error("Service reported an error: {0}")]
    Api(String),

    /// The body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// The configured endpoint cannot carry a path
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_conversion_validation() {
        let err: ConversionError = StoreError::Validation("empty code".to_string()).into();
        assert!(matches!(err, ConversionError::Validation(msg) if msg == "empty code"));
    }

    #[test]
    fn test_storage_maps_to_conversion_storage() {
        let err: ConversionError =
            StoreError::Storage(rusqlite::Error::InvalidQuery).into();
        assert!(matches!(err, ConversionError::Storage(StoreError::Storage(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConversionError::InvalidRate(-1.0).to_string(),
            "Provider returned an invalid rate: -1"
        );
        assert_eq!(ProviderError::Status(503).to_string(), "Unexpected HTTP status: 503");
    }
}
