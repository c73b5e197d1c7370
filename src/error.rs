//! Error types for token passport construction.

use thiserror::Error;

/// The main error type for all passport operations.
///
/// Every variant is a configuration or programming error rather than a
/// transient fault, so none of them are retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassportError {
    /// The signature algorithm label is empty or not a recognized alias
    #[error(
        "Hashing algorithm {0:?} is not supported. Supported algorithms include SHA1 and SHA256"
    )]
    UnsupportedAlgorithm(String),

    /// Signature computation was attempted without a base string
    #[error("A base string is required")]
    MissingBaseString,

    /// Signature computation was attempted without a signing key
    #[error(
        "A hashing key is required. Derive one with Signature::derive_key(consumer_secret, token_secret)"
    )]
    MissingKey,

    /// The HMAC implementation rejected the key
    #[error("Invalid HMAC key: {0}")]
    InvalidKey(String),

    /// A signer was built without a credentials provider
    #[error("Missing credentials: account, consumer and token values are required to sign")]
    MissingCredentials,
}

impl PassportError {
    /// Check if this error was caused by the algorithm configuration.
    pub fn is_unsupported_algorithm(&self) -> bool {
        matches!(self, Self::UnsupportedAlgorithm(_))
    }

    /// Check if this error was caused by a missing signing input.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, Self::MissingBaseString | Self::MissingKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_algorithm_display() {
        let error = PassportError::UnsupportedAlgorithm("MD5".to_string());
        assert_eq!(
            error.to_string(),
            "Hashing algorithm \"MD5\" is not supported. Supported algorithms include SHA1 and SHA256"
        );
        assert!(error.is_unsupported_algorithm());
        assert!(!error.is_missing_input());
    }

    #[test]
    fn test_missing_input_classification() {
        assert!(PassportError::MissingBaseString.is_missing_input());
        assert!(PassportError::MissingKey.is_missing_input());
        assert!(!PassportError::MissingCredentials.is_missing_input());
    }
}
