//! Credential management for token-based authentication.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use crate::auth::Signature;

/// Identity and secrets for one integration/user pairing.
#[derive(Clone)]
pub struct Credentials {
    /// The account identifier (tenant)
    pub account: String,
    /// The consumer key of the integration record
    pub consumer_key: String,
    /// The token id for the user/integration pairing
    pub token: String,
    consumer_secret: SecretString,
    token_secret: SecretString,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        account: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            consumer_key: consumer_key.into(),
            token: token.into(),
            consumer_secret: SecretString::from(consumer_secret.into()),
            token_secret: SecretString::from(token_secret.into()),
        }
    }

    /// Derive the HMAC signing key from both secrets.
    ///
    /// This exposes the secrets - do not log the result.
    pub fn signing_key(&self) -> String {
        Signature::derive_key(
            self.consumer_secret.expose_secret(),
            self.token_secret.expose_secret(),
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("consumer_key", &self.consumer_key)
            .field("token", &self.token)
            .field("consumer_secret", &"[REDACTED]")
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Names of the environment variables read by [`EnvCredentials`].
#[derive(Debug, Clone)]
pub struct EnvVarNames<'a> {
    pub account: &'a str,
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
    pub token: &'a str,
    pub token_secret: &'a str,
}

impl Default for EnvVarNames<'_> {
    fn default() -> Self {
        Self {
            account: "TBA_ACCOUNT",
            consumer_key: "TBA_CONSUMER_KEY",
            consumer_secret: "TBA_CONSUMER_SECRET",
            token: "TBA_TOKEN",
            token_secret: "TBA_TOKEN_SECRET",
        }
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads `TBA_ACCOUNT`, `TBA_CONSUMER_KEY`,
/// `TBA_CONSUMER_SECRET`, `TBA_TOKEN` and `TBA_TOKEN_SECRET`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    ///
    /// # Panics
    ///
    /// Panics if any of the environment variables is not set.
    pub fn from_env() -> Self {
        Self::from_env_vars(&EnvVarNames::default())
    }

    /// Create credentials from custom environment variable names.
    ///
    /// # Panics
    ///
    /// Panics if any of the environment variables is not set.
    pub fn from_env_vars(names: &EnvVarNames<'_>) -> Self {
        let read = |var: &str| {
            std::env::var(var).unwrap_or_else(|_| panic!("Environment variable {var} not set"))
        };

        Self {
            credentials: Credentials::new(
                read(names.account),
                read(names.consumer_key),
                read(names.consumer_secret),
                read(names.token),
                read(names.token_secret),
            ),
        }
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if any of the environment variables is not set.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_vars(&EnvVarNames::default())
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if any of the environment variables is not set.
    pub fn try_from_env_vars(names: &EnvVarNames<'_>) -> Option<Self> {
        let read = |var: &str| std::env::var(var).ok();

        Some(Self {
            credentials: Credentials::new(
                read(names.account)?,
                read(names.consumer_key)?,
                read(names.consumer_secret)?,
                read(names.token)?,
                read(names.token_secret)?,
            ),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
