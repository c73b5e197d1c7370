//! URI-safe percent-encoding for base strings and signing keys.
//!
//! The remote verifier recomputes the base string byte-for-byte, so the set
//! of characters left unescaped is pinned to the classic `encodeURI` rule:
//!
//! ```text
//! A-Z a-z 0-9 - _ . ! ~ * ' ( ) ; / ? : @ & = + $ , #
//! ```
//!
//! Every other byte of the UTF-8 input is written as `%XX` with uppercase
//! hex digits. A literal `%` is escaped as `%25`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes that are percent-encoded: everything except alphanumerics and the
/// URI mark/reserved characters.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    // Unreserved marks
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    // Reserved
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// Percent-encode a string the way `encodeURI` does.
///
/// # Example
///
/// ```rust
/// use token_passport::auth::encode_uri;
///
/// assert_eq!(encode_uri("a b&c=d/e"), "a%20b&c=d/e");
/// ```
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}
