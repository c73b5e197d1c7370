//! Token passport construction and serialization.
//!
//! A passport goes through two states:
//!
//! 1. [`TokenPassport`]: identity fields plus a nonce and timestamp fixed at
//!    creation. Exposes the base string used as signing input.
//! 2. [`SignedTokenPassport`]: the same fields with a computed
//!    [`Signature`]. Only this state can be serialized into the header block.
//!
//! Signing consumes the unsigned passport, so one nonce/timestamp pair is
//! never signed twice by accident.
//!
//! ## Base string
//!
//! ```text
//! encodeURI(account & consumerKey & token & nonce & timestamp)
//! ```
//!
//! ## Header block
//!
//! ```text
//! <ns:tokenPassport xsi:type="core:TokenPassport">
//! <core:account>..</core:account>
//! ...
//! <core:signature algorithm="HMAC_{label}">..</core:signature>
//! </ns:tokenPassport>
//! ```
//!
//! The elements are concatenated without whitespace and values are written
//! verbatim.

use std::fmt;

use time::OffsetDateTime;

use crate::auth::{AlphanumericNonce, NonceProvider, Signature, encode_uri};
use crate::error::PassportError;

/// Current Unix time in whole seconds.
fn current_timestamp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// An unsigned token passport.
///
/// # Example
///
/// ```rust
/// use token_passport::auth::{Signature, TokenPassport};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key = Signature::derive_key("consumer_secret", "token_secret");
/// let signed = TokenPassport::new()
///     .with_account("123456")
///     .with_consumer_key("consumer_key")
///     .with_token("token_id")
///     .sign("HMAC-SHA256", &key)?;
///
/// let header = signed.serialize_header();
/// assert!(header.starts_with("<ns:tokenPassport"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPassport {
    account: String,
    consumer_key: String,
    token: String,
    nonce: String,
    timestamp: i64,
}

impl TokenPassport {
    /// Create a passport with empty identity fields, a fresh nonce and the
    /// current timestamp.
    pub fn new() -> Self {
        Self::with_nonce_provider(&AlphanumericNonce::new())
    }

    /// Create a passport drawing its nonce from `provider`.
    pub fn with_nonce_provider<P>(provider: &P) -> Self
    where
        P: NonceProvider + ?Sized,
    {
        Self {
            account: String::new(),
            consumer_key: String::new(),
            token: String::new(),
            nonce: provider.next_nonce(),
            timestamp: current_timestamp(),
        }
    }

    /// Create a passport from explicit values, including nonce and timestamp.
    ///
    /// Useful for reproducing a base string the verifier reported, or for
    /// tests. Callers are responsible for nonce freshness.
    pub fn from_parts(
        account: impl Into<String>,
        consumer_key: impl Into<String>,
        token: impl Into<String>,
        nonce: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            account: account.into(),
            consumer_key: consumer_key.into(),
            token: token.into(),
            nonce: nonce.into(),
            timestamp,
        }
    }

    /// Set the account identifier.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Set the consumer key of the integration.
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = consumer_key.into();
        self
    }

    /// Set the token identifying the user/integration pairing.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    /// Unix epoch seconds at creation.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The canonical signing input.
    ///
    /// Field order is fixed; the verifier recomputes this string
    /// byte-for-byte.
    pub fn base_string(&self) -> String {
        encode_uri(&format!(
            "{}&{}&{}&{}&{}",
            self.account, self.consumer_key, self.token, self.nonce, self.timestamp
        ))
    }

    /// Sign the passport with the given algorithm label and key.
    ///
    /// The key is usually produced by [`Signature::derive_key`]. On failure
    /// the passport is dropped and no signed value is produced.
    pub fn sign(
        self,
        algorithm: impl Into<String>,
        key: &str,
    ) -> Result<SignedTokenPassport, PassportError> {
        let base_string = self.base_string();
        tracing::trace!("Passport base string: {}", base_string);

        let mut signature = Signature::new(algorithm);
        signature.compute(&base_string, key)?;

        tracing::debug!(
            account = %self.account,
            algorithm = %signature.algorithm(),
            nonce_len = self.nonce.len(),
            timestamp = self.timestamp,
            "Signed token passport"
        );

        Ok(SignedTokenPassport {
            passport: self,
            signature,
        })
    }
}

impl Default for TokenPassport {
    fn default() -> Self {
        Self::new()
    }
}

/// A token passport with a computed signature, ready to be embedded in a
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTokenPassport {
    passport: TokenPassport,
    signature: Signature,
}

impl SignedTokenPassport {
    /// The signed fields.
    pub fn passport(&self) -> &TokenPassport {
        &self.passport
    }

    /// The computed signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Split into the passport and its signature.
    pub fn into_parts(self) -> (TokenPassport, Signature) {
        (self.passport, self.signature)
    }

    /// Serialize the passport into the `tokenPassport` header block.
    pub fn serialize_header(&self) -> String {
        [
            r#"<ns:tokenPassport xsi:type="core:TokenPassport">"#.to_string(),
            format!("<core:account>{}</core:account>", self.passport.account),
            format!(
                "<core:consumerKey>{}</core:consumerKey>",
                self.passport.consumer_key
            ),
            format!("<core:token>{}</core:token>", self.passport.token),
            format!("<core:nonce>{}</core:nonce>", self.passport.nonce),
            format!(
                "<core:timestamp>{}</core:timestamp>",
                self.passport.timestamp
            ),
            format!(
                r#"<core:signature algorithm="HMAC_{}">{}</core:signature>"#,
                self.signature.algorithm(),
                self.signature.value()
            ),
            "</ns:tokenPassport>".to_string(),
        ]
        .concat()
    }
}

impl fmt::Display for SignedTokenPassport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize_header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::nonce::tests::ScriptedRandom;
    use crate::auth::{NONCE_MAX_LEN, NONCE_MIN_LEN};

    fn fixed_passport() -> TokenPassport {
        TokenPassport::from_parts("123", "ck", "tk", "abc123", 1_000_000_000)
    }

    #[test]
    fn test_new_passport_defaults() {
        let before = current_timestamp();
        let passport = TokenPassport::new();
        let after = current_timestamp();

        assert_eq!(passport.account(), "");
        assert_eq!(passport.consumer_key(), "");
        assert_eq!(passport.token(), "");
        assert!((NONCE_MIN_LEN..=NONCE_MAX_LEN).contains(&passport.nonce().len()));
        assert!(passport.nonce().bytes().all(|b| b.is_ascii_alphanumeric()));
        assert!(passport.timestamp() >= before && passport.timestamp() <= after);
    }

    #[test]
    fn test_nonce_fixed_for_lifetime() {
        let passport = TokenPassport::new();
        let nonce = passport.nonce().to_string();
        let timestamp = passport.timestamp();

        let passport = passport.with_account("1").with_consumer_key("2").with_token("3");
        assert_eq!(passport.nonce(), nonce);
        assert_eq!(passport.timestamp(), timestamp);
        assert_eq!(passport.base_string(), passport.base_string());
    }

    #[test]
    fn test_injected_nonce_provider() {
        let provider = AlphanumericNonce::with_source(ScriptedRandom::new(&[6, 1, 2, 3, 4, 5, 6]));
        let passport = TokenPassport::with_nonce_provider(&provider);
        assert_eq!(passport.nonce(), "123456");
    }

    #[test]
    fn test_base_string_order() {
        assert_eq!(fixed_passport().base_string(), "123&ck&tk&abc123&1000000000");
    }

    #[test]
    fn test_base_string_encoding() {
        let passport =
            TokenPassport::from_parts("TSTDRV 1", "c:k/1", "t=k?", "n0nce", 1_500_000_000);
        assert_eq!(
            passport.base_string(),
            "TSTDRV%201&c:k/1&t=k?&n0nce&1500000000"
        );
    }

    #[test]
    fn test_base_string_empty_identity() {
        let passport = TokenPassport::from_parts("", "", "", "abcdef", 42);
        assert_eq!(passport.base_string(), "&&&abcdef&42");
    }

    #[test]
    fn test_sign_round_trip() {
        let key = Signature::derive_key("s1", "s2");
        assert_eq!(key, "s1&s2");

        let first = fixed_passport().sign("HMAC-SHA1", &key).unwrap();
        let second = fixed_passport().sign("HMAC-SHA1", &key).unwrap();
        assert_eq!(first.signature().value(), second.signature().value());
        assert_eq!(first.signature().value(), "udDeETDHhSTmzMgf68SaiNWzsVU=");

        let expected = format!(
            r#"<core:signature algorithm="HMAC_HMAC-SHA1">{}</core:signature>"#,
            first.signature().value()
        );
        assert!(first.serialize_header().contains(&expected));
    }

    #[test]
    fn test_serialize_header_exact() {
        let signed = fixed_passport().sign("sha256", "s1&s2").unwrap();
        assert_eq!(
            signed.serialize_header(),
            concat!(
                r#"<ns:tokenPassport xsi:type="core:TokenPassport">"#,
                "<core:account>123</core:account>",
                "<core:consumerKey>ck</core:consumerKey>",
                "<core:token>tk</core:token>",
                "<core:nonce>abc123</core:nonce>",
                "<core:timestamp>1000000000</core:timestamp>",
                r#"<core:signature algorithm="HMAC_sha256">ApkvHuHFilB/mzirXFyYMHK9YrP//93yIwChXsn0osg=</core:signature>"#,
                "</ns:tokenPassport>"
            )
        );
        assert_eq!(signed.to_string(), signed.serialize_header());
    }

    #[test]
    fn test_serialize_header_values_verbatim() {
        let signed = TokenPassport::from_parts("a b", "c&d", "t", "nonce1", 7)
            .sign("SHA1", "key")
            .unwrap();
        let header = signed.serialize_header();
        assert!(header.contains("<core:account>a b</core:account>"));
        assert!(header.contains("<core:consumerKey>c&d</core:consumerKey>"));
    }

    #[test]
    fn test_sign_errors() {
        assert_eq!(
            fixed_passport().sign("MD5", "k").unwrap_err(),
            PassportError::UnsupportedAlgorithm("MD5".to_string())
        );
        assert_eq!(
            fixed_passport().sign("", "k").unwrap_err(),
            PassportError::UnsupportedAlgorithm(String::new())
        );
        assert_eq!(
            fixed_passport().sign("SHA1", "").unwrap_err(),
            PassportError::MissingKey
        );
    }

    #[test]
    fn test_into_parts() {
        let signed = fixed_passport().sign("HMACSHA256", "k").unwrap();
        let (passport, signature) = signed.into_parts();
        assert_eq!(passport, fixed_passport());
        assert_eq!(signature.algorithm(), "HMACSHA256");
        assert!(signature.is_computed());
    }
}
