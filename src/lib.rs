//! # Token Passport
//!
//! Builds signed token passports for token-based authentication (TBA)
//! against web-service APIs that use an OAuth 1.0a style signed-request
//! model.
//!
//! ## Features
//!
//! - Alphanumeric nonces and Unix timestamps fixed per passport
//! - Canonical, `encodeURI`-compatible base strings
//! - HMAC-SHA1 and HMAC-SHA256 signatures with alias-tolerant labels
//! - Serialization of the `tokenPassport` header block
//! - Signing only reachable through a typed unsigned → signed transition
//!
//! ## Quick Start
//!
//! ```rust
//! use token_passport::auth::{Signature, TokenPassport};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let key = Signature::derive_key("consumer_secret", "token_secret");
//!     let signed = TokenPassport::new()
//!         .with_account("123456")
//!         .with_consumer_key("consumer_key")
//!         .with_token("token_id")
//!         .sign("HMAC-SHA256", &key)?;
//!     println!("{}", signed);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;

// Re-export commonly used types at crate root
pub use auth::{DigestAlgorithm, PassportSigner, Signature, SignedTokenPassport, TokenPassport};
pub use error::PassportError;

/// Result type alias using PassportError
pub type Result<T> = std::result::Result<T, PassportError>;
