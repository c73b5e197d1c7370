//! Example: Sign a token passport from environment credentials.
//!
//! Run with: cargo run --example sign_passport
//!
//! Reads `TBA_ACCOUNT`, `TBA_CONSUMER_KEY`, `TBA_CONSUMER_SECRET`,
//! `TBA_TOKEN` and `TBA_TOKEN_SECRET` (a `.env` file is honored).
//! Set `RUST_LOG=token_passport=trace` to see the base string.

use std::sync::Arc;

use token_passport::auth::{
    Credentials, CredentialsProvider, EnvCredentials, PassportSigner, Signature, StaticCredentials,
    TokenPassport,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Manual two-phase construction.
    let key = Signature::derive_key("consumer_secret", "token_secret");
    let passport = TokenPassport::new()
        .with_account("123456")
        .with_consumer_key("consumer_key")
        .with_token("token_id");
    println!("Base string: {}", passport.base_string());

    let signed = passport.sign("HMAC-SHA256", &key)?;
    println!("Header: {}", signed);

    // Signer backed by a credentials provider.
    let provider: Arc<dyn CredentialsProvider> = match EnvCredentials::try_from_env() {
        Some(env_creds) => {
            println!(
                "Loaded env credentials for account {}",
                env_creds.get_credentials().account
            );
            Arc::new(env_creds)
        }
        None => {
            println!("TBA_* variables not set, using placeholder credentials.");
            Arc::new(StaticCredentials::new(Credentials::new(
                "123456",
                "consumer_key",
                "consumer_secret",
                "token_id",
                "token_secret",
            )))
        }
    };

    let signer = PassportSigner::builder()
        .credentials(provider)
        .algorithm("HMAC-SHA1")
        .build()?;
    println!("Signer header: {}", signer.sign_header()?);

    Ok(())
}
