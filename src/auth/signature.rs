//! HMAC signature generation for token passports.
//!
//! The signature is computed as:
//! ```text
//! base64(HMAC-<digest>(key, base_string))
//! key = encodeURI(consumer_secret + "&" + token_secret)
//! ```
//!
//! The remote verifier accepts two digest families, SHA-1 and SHA-256. Client
//! conventions name them differently, so a small alias table maps the
//! caller's label to a [`DigestAlgorithm`].

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;

use crate::auth::encode_uri;
use crate::error::PassportError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Digest primitives accepted by the remote verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// HMAC-SHA1
    Sha1,
    /// HMAC-SHA256
    Sha256,
}

/// Recognized labels, compared after uppercasing.
const ALGORITHM_ALIASES: &[(&str, DigestAlgorithm)] = &[
    ("HMAC-SHA256", DigestAlgorithm::Sha256),
    ("HMACSHA256", DigestAlgorithm::Sha256),
    ("SHA256", DigestAlgorithm::Sha256),
    ("HMAC-SHA1", DigestAlgorithm::Sha1),
    ("HMACSHA1", DigestAlgorithm::Sha1),
    ("SHA1", DigestAlgorithm::Sha1),
];

impl DigestAlgorithm {
    /// Resolve a caller-supplied label, ignoring letter case.
    ///
    /// Anything outside the alias table, including an empty label, is
    /// rejected with [`PassportError::UnsupportedAlgorithm`].
    pub fn from_label(label: &str) -> Result<Self, PassportError> {
        let upper = label.to_ascii_uppercase();
        ALGORITHM_ALIASES
            .iter()
            .find(|(alias, _)| *alias == upper)
            .map(|(_, algorithm)| *algorithm)
            .ok_or_else(|| {
                tracing::warn!("Rejected signature algorithm label: {:?}", label);
                PassportError::UnsupportedAlgorithm(label.to_string())
            })
    }

    /// All labels accepted by [`DigestAlgorithm::from_label`].
    pub fn aliases() -> impl Iterator<Item = &'static str> {
        ALGORITHM_ALIASES.iter().map(|(alias, _)| *alias)
    }

    /// Size of the raw digest in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "HMAC-SHA1"),
            Self::Sha256 => write!(f, "HMAC-SHA256"),
        }
    }
}

/// Compute a base64-encoded HMAC of `message` under `key`.
///
/// # Example
///
/// ```rust
/// use token_passport::auth::{DigestAlgorithm, hmac_base64};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let digest = hmac_base64(DigestAlgorithm::Sha1, "k", "abc")?;
/// assert_eq!(digest, "+b7wkf4A2fUShZODbbqZ4ZPwgXQ=");
/// # Ok(())
/// # }
/// ```
pub fn hmac_base64(
    algorithm: DigestAlgorithm,
    key: &str,
    message: &str,
) -> Result<String, PassportError> {
    let digest = match algorithm {
        DigestAlgorithm::Sha1 => {
            let mut mac = HmacSha1::new_from_slice(key.as_bytes())
                .map_err(|e| PassportError::InvalidKey(e.to_string()))?;
            mac.update(message.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        DigestAlgorithm::Sha256 => {
            let mut mac = HmacSha256::new_from_slice(key.as_bytes())
                .map_err(|e| PassportError::InvalidKey(e.to_string()))?;
            mac.update(message.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    Ok(BASE64.encode(digest))
}

/// The signature element of a token passport.
///
/// Holds the caller's algorithm label verbatim and, once computed, the
/// base64 digest. The label is what gets annotated into the header block;
/// only the internal digest choice is normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    value: String,
    algorithm: String,
}

impl Signature {
    /// Create an uncomputed signature for the given algorithm label.
    pub fn new(algorithm: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            algorithm: algorithm.into(),
        }
    }

    /// Derive the signing key from the consumer and token secrets.
    ///
    /// The key is not stored; pass it to [`Signature::compute`].
    pub fn derive_key(consumer_secret: &str, token_secret: &str) -> String {
        encode_uri(&format!("{consumer_secret}&{token_secret}"))
    }

    /// Compute the HMAC over `base_string` and store it.
    ///
    /// Inputs are checked in order (algorithm, base string, key) and the
    /// first failure is returned. The stored value is only replaced on
    /// success.
    pub fn compute(&mut self, base_string: &str, key: &str) -> Result<(), PassportError> {
        let algorithm = DigestAlgorithm::from_label(&self.algorithm)?;

        if base_string.is_empty() {
            return Err(PassportError::MissingBaseString);
        }

        if key.is_empty() {
            return Err(PassportError::MissingKey);
        }

        self.value = hmac_base64(algorithm, key, base_string)?;
        Ok(())
    }

    /// The base64 digest, empty until computed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The algorithm label as supplied by the caller.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Replace the algorithm label.
    pub fn set_algorithm(&mut self, algorithm: impl Into<String>) {
        self.algorithm = algorithm.into();
    }

    /// Whether a digest has been stored.
    pub fn is_computed(&self) -> bool {
        !self.value.is_empty()
    }
}
