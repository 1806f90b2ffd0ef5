//! # DID Key Resolver
//!
//! Resolution of a `did:key` is local: the DID document is expanded from the
//! public key carried in the identifier itself.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, VerifyingKey};

use super::{DidKey, PREFIX};
use crate::document::Document;
use crate::error::Error;
use crate::{multibase, multicodec};

impl DidKey {
    /// Resolve a `did:key` into its DID document.
    ///
    /// Resolution is a pure function of `did`, so resolving the DID returned
    /// by [`DidKey::issue`] reproduces the document `issue` returned.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDid`] if `did` does not start with `did:key:` or has
    ///   no method-specific identifier.
    /// - [`Error::UnsupportedMultibase`] or [`Error::InvalidEncoding`] if the
    ///   identifier is not base-58-btc.
    /// - [`Error::MalformedCodec`] if the multicodec prefix is truncated.
    /// - [`Error::UnsupportedKeyType`] if the key is not Ed25519.
    /// - [`Error::InvalidPublicKey`] if the key bytes are not an Ed25519 point.
    pub fn resolve(did: &str) -> crate::Result<Document> {
        let public_key = Self::public_key(did)?;
        Ok(Self::document(&public_key))
    }

    /// Decode a `did:key` back into the raw Ed25519 public key it carries.
    ///
    /// # Errors
    ///
    /// See [`DidKey::resolve`].
    pub fn public_key(did: &str) -> crate::Result<[u8; PUBLIC_KEY_LENGTH]> {
        let Some(multikey) = did.strip_prefix(PREFIX) else {
            return Err(Error::InvalidDid(format!("DID is not a valid did:key: {did}")));
        };
        if multikey.is_empty() {
            return Err(Error::InvalidDid("did:key has no method-specific identifier".into()));
        }

        let bytes = multibase::decode(multikey)?;
        let value = multicodec::decode(&bytes)?;
        if value.code != multicodec::ED25519_PUB {
            return Err(Error::UnsupportedKeyType(format!(
                "multicodec {:#x} is not an Ed25519 public key",
                value.code
            )));
        }

        let public_key: [u8; PUBLIC_KEY_LENGTH] = value.payload.try_into().map_err(|v: Vec<u8>| {
            Error::InvalidPublicKey(format!(
                "public key is {} bytes, expected {PUBLIC_KEY_LENGTH}",
                v.len()
            ))
        })?;
        VerifyingKey::from_bytes(&public_key)
            .map_err(|e| Error::InvalidPublicKey(format!("not an Ed25519 public key: {e}")))?;

        Ok(public_key)
    }
}
