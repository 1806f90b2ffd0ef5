//! # DID Resolver
//!
//! Dispatches a DID to the method that can resolve it and normalizes the
//! result into a single [`Document`] shape.
//!
//! `did:key` resolution is local and synchronous; `did:ethr` resolution goes
//! to the ledger. Both are exposed through the same async `resolve` so callers
//! need not know which methods block.
//!
//! See [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) for more.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::{Config, DEFAULT_TIMEOUT_SECS};
use crate::document::Document;
use crate::error::Error;
use crate::ethr::{DidEthr, RpcLedger};
use crate::key::DidKey;
use crate::provider::LedgerResolver;
use crate::Method;

/// The DID resolution JSON-LD context.
pub const RESOLUTION_CONTEXT: &str = "https://w3id.org/did-resolution/v1";

/// Resolves DIDs of every supported method.
#[derive(Clone)]
pub struct Resolver<L> {
    ledger: L,
    timeout: Duration,
}

impl Resolver<RpcLedger> {
    /// Create a resolver that queries the ledgers in `config` over JSON-RPC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration is invalid.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self::new(RpcLedger::from_config(config)).timeout(config.timeout()))
    }
}

impl<L: LedgerResolver> Resolver<L> {
    /// Create a resolver using `ledger` for `did:ethr` lookups.
    #[must_use]
    pub const fn new(ledger: L) -> Self {
        Self {
            ledger,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Bound each ledger lookup by `timeout`.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve a DID into its DID document.
    ///
    /// `did:key` identifiers are decoded locally and never reach the ledger.
    /// Every well-formed `did:ethr` identifier is passed to the ledger.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDid`] if `did` is not a DID or is malformed for its
    ///   method.
    /// - [`Error::UnsupportedMethod`] for DID methods other than `key` and
    ///   `ethr`.
    /// - Codec errors for malformed `did:key` identifiers.
    /// - [`Error::ResolutionFailed`] if the ledger lookup fails or times out.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, did: &str) -> crate::Result<Document> {
        match Method::from_did(did)? {
            Method::Key => DidKey::resolve(did),
            Method::Ethr => DidEthr::resolve(did, &self.ledger, self.timeout).await,
        }
    }

    /// Resolve a DID into a W3C DID resolution result.
    ///
    /// Unlike [`Resolver::resolve`] this does not fail: errors are reported in
    /// the resolution metadata and the document is omitted.
    pub async fn resolution(&self, did: &str) -> Resolved {
        let method = did.split(':').nth(1).unwrap_or_default();
        let additional = json!({
            "did": {
                "didString": did,
                "methodSpecificId": did.splitn(3, ':').nth(2).unwrap_or_default(),
                "method": method,
            }
        });

        match self.resolve(did).await {
            Ok(document) => Resolved {
                context: RESOLUTION_CONTEXT.into(),
                metadata: Metadata {
                    content_type: ContentType::DidLdJson,
                    additional: Some(additional),
                    ..Metadata::default()
                },
                document: Some(document),
            },
            Err(e) => Resolved {
                context: RESOLUTION_CONTEXT.into(),
                metadata: Metadata::from_error(&e),
                document: None,
            },
        }
    }
}

/// Returned by [`Resolver::resolution`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    /// The DID resolution context.
    #[serde(rename = "@context")]
    pub context: String,

    /// Resolution metadata.
    #[serde(rename = "didResolutionMetadata")]
    pub metadata: Metadata,

    /// The DID document. Empty if resolution was unsuccessful.
    #[serde(rename = "didDocument")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
}

/// DID resolution metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// The Media Type of the returned resource.
    pub content_type: ContentType,

    /// The error code from the resolution process, if applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// A human-readable explanation of the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Additional information about the resolution process.
    #[serde(flatten)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<Value>,
}

impl Metadata {
    fn from_error(err: &Error) -> Self {
        Self {
            content_type: ContentType::DidLdJson,
            error: Some(err.code().to_string()),
            error_message: Some(err.message()),
            additional: None,
        }
    }
}

/// The Media Type of the returned resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum ContentType {
    /// JSON-LD representation of a DID document.
    #[default]
    #[serde(rename = "application/did+ld+json")]
    DidLdJson,
}
