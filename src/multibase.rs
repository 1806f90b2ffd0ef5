//! # Multibase
//!
//! `did:key` only uses base-58-btc, identified in multibase by the leading
//! character `z`. Any other base is rejected rather than decoded.
//!
//! See <https://github.com/multiformats/multibase>.

use ::multibase::Base;

use crate::error::Error;

/// Multibase prefix character for base-58-btc.
pub const BASE58BTC_PREFIX: char = 'z';

/// Encode bytes as a `z`-prefixed base-58-btc string.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    ::multibase::encode(Base::Base58Btc, bytes)
}

/// Decode a `z`-prefixed base-58-btc string.
///
/// # Errors
///
/// Returns [`Error::UnsupportedMultibase`] if the prefix is anything other
/// than `z`, and [`Error::InvalidEncoding`] if the remainder contains
/// characters outside the base-58-btc alphabet.
pub fn decode(value: &str) -> crate::Result<Vec<u8>> {
    let mut chars = value.chars();
    let Some(prefix) = chars.next() else {
        return Err(Error::UnsupportedMultibase("empty multibase string".into()));
    };
    if prefix != BASE58BTC_PREFIX {
        let name = Base::from_code(prefix)
            .map_or_else(|_| "unknown base".to_string(), |base| format!("{base:?}"));
        return Err(Error::UnsupportedMultibase(format!(
            "expected base-58-btc prefix 'z', found '{prefix}' ({name})"
        )));
    }

    Base::Base58Btc
        .decode(chars.as_str())
        .map_err(|e| Error::InvalidEncoding(format!("issue decoding base-58-btc: {e}")))
}
