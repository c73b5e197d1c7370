//! Example: Working with PassportError.
//!
//! Run with: cargo run --example error_handling

use token_passport::PassportError;
use token_passport::auth::{DigestAlgorithm, Signature, TokenPassport};

fn main() {
    println!(
        "Supported labels: {}",
        DigestAlgorithm::aliases().collect::<Vec<_>>().join(", ")
    );

    let key = Signature::derive_key("cs", "ts");
    for label in ["hmac-sha256", "MD5", ""] {
        match TokenPassport::new().with_account("123456").sign(label, &key) {
            Ok(signed) => println!("{label:?}: signed {}", signed.signature().value()),
            Err(PassportError::UnsupportedAlgorithm(label)) => {
                println!("{label:?}: rejected, choose SHA1 or SHA256")
            }
            Err(e) => println!("{label:?}: unexpected error: {e}"),
        }
    }

    let mut signature = Signature::new("SHA1");
    if let Err(e) = signature.compute("123&ck&tk&abc123&1000000000", "") {
        println!("Missing input: {e} (is_missing_input = {})", e.is_missing_input());
    }
}
