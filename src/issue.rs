//! # Issuance
//!
//! Issue a new DID for a named method. Callers that already know the method
//! can call [`DidKey::issue`] or [`DidEthr::issue`] directly.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::document::Document;
use crate::ethr::{DidEthr, EthrIssuance};
use crate::key::{DidKey, KeyIssuance};
use crate::keys::SecretKey;
use crate::Method;

/// A request to issue a new DID.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct IssueRequest {
    /// The DID method to issue for.
    pub method: Method,
}

/// A newly issued DID and its private key.
#[derive(Clone, Debug)]
pub enum Issuance {
    /// A `did:key`, with its DID document.
    Key(KeyIssuance),

    /// A `did:ethr`, with its account address.
    Ethr(EthrIssuance),
}

impl Issuance {
    /// The issued DID.
    #[must_use]
    pub fn did(&self) -> &str {
        match self {
            Self::Key(issued) => &issued.did,
            Self::Ethr(issued) => &issued.did,
        }
    }

    /// The private key controlling the DID.
    #[must_use]
    pub const fn private_key(&self) -> &SecretKey {
        match self {
            Self::Key(issued) => &issued.private_key,
            Self::Ethr(issued) => &issued.private_key,
        }
    }

    /// The DID document, for methods where it is known at issuance.
    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        match self {
            Self::Key(issued) => Some(&issued.document),
            Self::Ethr(_) => None,
        }
    }
}

/// Issue a new DID for the requested method. `did:ethr` identifiers are issued
/// on the configured default network.
///
/// # Errors
///
/// Returns an error if the key pair generated for a `did:ethr` cannot be
/// converted into an account address.
pub fn issue<R: CryptoRng + RngCore>(
    request: &IssueRequest, config: &Config, rng: &mut R,
) -> crate::Result<Issuance> {
    match request.method {
        Method::Key => Ok(Issuance::Key(DidKey::issue(rng))),
        Method::Ethr => Ok(Issuance::Ethr(DidEthr::issue(&config.ethr.default_network, rng)?)),
    }
}
