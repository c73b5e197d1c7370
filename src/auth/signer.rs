//! Passport signer combining credentials, nonce generation and an algorithm.

use std::sync::Arc;

use crate::auth::{
    AlphanumericNonce, CredentialsProvider, DigestAlgorithm, NonceProvider, SignedTokenPassport,
    TokenPassport,
};
use crate::error::PassportError;

/// Algorithm label used when none is configured.
pub const DEFAULT_ALGORITHM: &str = "HMAC-SHA256";

/// Produces a freshly signed passport for every outbound request.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use token_passport::auth::{Credentials, PassportSigner, StaticCredentials};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("123456", "consumer_key", "cs", "token_id", "ts");
/// let signer = PassportSigner::builder()
///     .credentials(Arc::new(StaticCredentials::new(credentials)))
///     .algorithm("HMAC-SHA1")
///     .build()?;
///
/// let header = signer.sign_header()?;
/// assert!(header.contains(r#"algorithm="HMAC_HMAC-SHA1""#));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PassportSigner {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
    algorithm: String,
    digest: DigestAlgorithm,
}

impl PassportSigner {
    /// Create a new signer builder.
    pub fn builder() -> PassportSignerBuilder {
        PassportSignerBuilder::new()
    }

    /// The configured algorithm label.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// The digest primitive the label resolves to.
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Build and sign a passport with a new nonce and the current time.
    pub fn sign_passport(&self) -> Result<SignedTokenPassport, PassportError> {
        let credentials = self.credentials.get_credentials();

        TokenPassport::with_nonce_provider(self.nonce_provider.as_ref())
            .with_account(credentials.account.as_str())
            .with_consumer_key(credentials.consumer_key.as_str())
            .with_token(credentials.token.as_str())
            .sign(self.algorithm.as_str(), &credentials.signing_key())
    }

    /// Sign a new passport and serialize it into the header block.
    pub fn sign_header(&self) -> Result<String, PassportError> {
        Ok(self.sign_passport()?.serialize_header())
    }
}

impl std::fmt::Debug for PassportSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassportSigner")
            .field("account", &self.credentials.get_credentials().account)
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

/// Builder for [`PassportSigner`].
pub struct PassportSignerBuilder {
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    algorithm: String,
}

impl PassportSignerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            credentials: None,
            nonce_provider: None,
            algorithm: DEFAULT_ALGORITHM.to_string(),
        }
    }

    /// Set the credentials provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set the algorithm label annotated into the header.
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// Build the signer.
    ///
    /// Fails if no credentials were provided or the algorithm label is not
    /// supported.
    pub fn build(self) -> Result<PassportSigner, PassportError> {
        let credentials = self.credentials.ok_or(PassportError::MissingCredentials)?;
        let digest = DigestAlgorithm::from_label(&self.algorithm)?;

        let nonce_provider = self
            .nonce_provider
            .unwrap_or_else(|| Arc::new(AlphanumericNonce::new()));

        Ok(PassportSigner {
            credentials,
            nonce_provider,
            algorithm: self.algorithm,
            digest,
        })
    }
}

impl Default for PassportSignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, SeededRandom, StaticCredentials};

    fn provider() -> Arc<dyn CredentialsProvider> {
        Arc::new(StaticCredentials::new(Credentials::new(
            "123", "ck", "s1", "tk", "s2",
        )))
    }

    #[test]
    fn test_build_requires_credentials() {
        let err = PassportSigner::builder().build().unwrap_err();
        assert_eq!(err, PassportError::MissingCredentials);
    }

    #[test]
    fn test_build_rejects_algorithm() {
        let err = PassportSigner::builder()
            .credentials(provider())
            .algorithm("MD5")
            .build()
            .unwrap_err();
        assert_eq!(err, PassportError::UnsupportedAlgorithm("MD5".to_string()));
    }

    #[test]
    fn test_default_algorithm() {
        let signer = PassportSigner::builder().credentials(provider()).build().unwrap();
        assert_eq!(signer.algorithm(), DEFAULT_ALGORITHM);
        assert_eq!(signer.digest(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_sign_passport_fields() {
        let signer = PassportSigner::builder()
            .credentials(provider())
            .algorithm("hmacsha1")
            .build()
            .unwrap();

        let signed = signer.sign_passport().unwrap();
        let passport = signed.passport();
        assert_eq!(passport.account(), "123");
        assert_eq!(passport.consumer_key(), "ck");
        assert_eq!(passport.token(), "tk");
        assert_eq!(signed.signature().algorithm(), "hmacsha1");

        // Recompute independently from the same fields.
        let expected = TokenPassport::from_parts(
            "123",
            "ck",
            "tk",
            passport.nonce(),
            passport.timestamp(),
        )
        .sign("SHA1", "s1&s2")
        .unwrap();
        assert_eq!(signed.signature().value(), expected.signature().value());
    }

    #[test]
    fn test_each_passport_has_fresh_nonce() {
        let signer = PassportSigner::builder()
            .credentials(provider())
            .nonce_provider(Arc::new(AlphanumericNonce::with_source(SeededRandom::new(7))))
            .build()
            .unwrap();

        let first = signer.sign_passport().unwrap();
        let second = signer.sign_passport().unwrap();
        assert_ne!(first.passport().nonce(), second.passport().nonce());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let signer = PassportSigner::builder().credentials(provider()).build().unwrap();
        let debug_str = format!("{:?}", signer);
        assert!(debug_str.contains("123"));
        assert!(!debug_str.contains("s1"));
    }
}
