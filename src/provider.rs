//! # Provider Traits
//!
//! Collaborators the crate relies on but does not implement itself.

use std::future::Future;

use anyhow::Result;

use crate::document::Document;

/// [`LedgerResolver`] is used to proxy the on-chain resolution of a
/// `did:ethr` identifier.
///
/// Implementers need only return the DID document for the account on the
/// named network. This may be by querying an RPC endpoint directly, calling a
/// hosted resolver, or looking up a local cache. [`crate::ethr::RpcLedger`]
/// is a JSON-RPC implementation.
///
/// The resolver bounds each call with a timeout and drops the future when it
/// expires, so implementations must be cancel-safe. Failures are reported to
/// callers as [`crate::Error::ResolutionFailed`] and are never retried.
pub trait LedgerResolver: Send + Sync + Clone {
    /// Resolve the DID document for `address` on `network`.
    ///
    /// `network` is the network segment of the DID (`mainnet` when the DID
    /// omits it): either a network name such as `sepolia` or a hex chain id
    /// such as `0xaa36a7`.
    ///
    /// # Errors
    ///
    /// Returns an error if the network is unknown, the ledger cannot be
    /// reached, or its response cannot be interpreted.
    fn resolve_on_chain(
        &self, network: &str, address: &str,
    ) -> impl Future<Output = Result<Document>> + Send;
}
