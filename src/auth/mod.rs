//! Token-based authentication passports.
//!
//! This module provides:
//! - URI-safe percent-encoding for base strings and keys
//! - Alphanumeric nonce generation over an injectable random source
//! - HMAC-SHA1 / HMAC-SHA256 signature computation
//! - Two-phase passport construction and header serialization
//! - Credential management with secure secret storage
//! - A signer that produces a fresh passport per request

mod credentials;
mod encoding;
mod nonce;
mod passport;
mod signature;
mod signer;

pub use credentials::{
    Credentials, CredentialsProvider, EnvCredentials, EnvVarNames, StaticCredentials,
};
pub use encoding::encode_uri;
pub use nonce::{
    AlphanumericNonce, NONCE_ALPHABET, NONCE_MAX_LEN, NONCE_MIN_LEN, NonceProvider, RandomSource,
    SeededRandom, ThreadRandom,
};
pub use passport::{SignedTokenPassport, TokenPassport};
pub use signature::{DigestAlgorithm, Signature, hmac_base64};
pub use signer::{DEFAULT_ALGORITHM, PassportSigner, PassportSignerBuilder};
