//! # DID Codec
//!
//! Issue and resolve Decentralized Identifiers for two methods:
//!
//! - `did:key`: an Ed25519 public key carried in the identifier itself. Issuance
//!   and resolution are pure computations.
//! - `did:ethr`: an Ethereum account whose DID document is held by the ERC-1056
//!   registry. Resolution is delegated to a [`LedgerResolver`].
//!
//! [`Resolver`] dispatches on the DID method and returns a single [`Document`]
//! shape for both. [`issue`] creates a new DID with its private key.

pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod ethr;
pub mod issue;
pub mod key;
pub mod keys;
pub mod multibase;
pub mod multicodec;
mod provider;
pub mod resolve;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use self::config::Config;
pub use self::core::Kind;
pub use self::document::*;
pub use self::error::{Error, Result};
pub use self::ethr::{DidEthr, RpcLedger};
pub use self::issue::{issue, Issuance, IssueRequest};
pub use self::key::DidKey;
pub use self::keys::{Algorithm, KeyPair, SecretKey};
pub use self::provider::*;
pub use self::resolve::{Resolved, Resolver};

/// Supported DID methods.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// `did:key`
    Key,

    /// `did:ethr`
    Ethr,
}

impl Method {
    /// Determine the method of `did` from its prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDid`] if `did` does not have the form
    /// `did:<method>:<id>` and [`Error::UnsupportedMethod`] if the method is
    /// not one of `key` or `ethr`.
    pub fn from_did(did: &str) -> Result<Self> {
        if did.starts_with(key::PREFIX) {
            return Ok(Self::Key);
        }
        if did.starts_with(ethr::PREFIX) {
            return Ok(Self::Ethr);
        }

        let mut parts = did.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("did"), Some(method), Some(id)) if !method.is_empty() && !id.is_empty() => {
                Err(Error::UnsupportedMethod(format!("DID method {method} is not supported")))
            }
            _ => Err(Error::InvalidDid(format!("not a DID: {did}"))),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key" => Ok(Self::Key),
            "ethr" => Ok(Self::Ethr),
            _ => Err(Error::UnsupportedMethod(format!("DID method {s} is not supported"))),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Ethr => write!(f, "ethr"),
        }
    }
}
