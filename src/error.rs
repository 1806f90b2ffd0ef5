//! # Errors
//!
//! Errors returned by the codec, method and resolver layers. Codec and
//! `did:key` errors are detected locally and indicate a structurally invalid
//! identifier. `ResolutionFailed` is the only error that originates outside
//! the crate (ledger adapter, network, timeout).

use serde_json::{json, Value};
use thiserror::Error;

/// Result type for DID issuance and resolution.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// DID issuance and resolution errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The multicodec varint prefix is empty, truncated, or too long.
    #[error("malformed multicodec: {0}")]
    MalformedCodec(String),

    /// The multibase prefix character is not `z` (base-58-btc).
    #[error("unsupported multibase: {0}")]
    UnsupportedMultibase(String),

    /// The multibase body contains characters outside the base-58 alphabet.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The DID is missing a scheme or method prefix, or the method-specific
    /// identifier is malformed.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// The multicodec code does not identify a supported key type.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The decoded key bytes are not a valid public key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The DID method is not implemented.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// The ledger adapter failed or timed out.
    #[error("resolution failed: {0}")]
    ResolutionFailed(String),

    /// Resolver configuration is invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Machine-readable error code. Uses the DID resolution error codes
    /// registered in the DID Specification Registries where one exists.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedCodec(_) => "malformedCodec",
            Self::UnsupportedMultibase(_) => "unsupportedMultibase",
            Self::InvalidEncoding(_) => "invalidEncoding",
            Self::InvalidDid(_) => "invalidDid",
            Self::UnsupportedKeyType(_) => "unsupportedPublicKeyType",
            Self::InvalidPublicKey(_) => "invalidPublicKey",
            Self::UnsupportedMethod(_) => "methodNotSupported",
            Self::ResolutionFailed(_) => "internalError",
            Self::InvalidConfig(_) => "invalidConfig",
        }
    }

    /// The human-readable message, without the error kind.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MalformedCodec(msg)
            | Self::UnsupportedMultibase(msg)
            | Self::InvalidEncoding(msg)
            | Self::InvalidDid(msg)
            | Self::UnsupportedKeyType(msg)
            | Self::InvalidPublicKey(msg)
            | Self::UnsupportedMethod(msg)
            | Self::ResolutionFailed(msg)
            | Self::InvalidConfig(msg) => msg.clone(),
        }
    }

    /// Express the error as an `OAuth2`-style JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.code(),
            "error_description": self.message(),
        })
    }
}
