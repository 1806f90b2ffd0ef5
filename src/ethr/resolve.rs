//! # DID Ethr Resolver

use std::time::Duration;

use super::{DidEthr, EthrDid};
use crate::core::Kind;
use crate::document::Document;
use crate::error::Error;
use crate::provider::LedgerResolver;

impl DidEthr {
    /// Resolve a `did:ethr` by delegating to the ledger adapter.
    ///
    /// The adapter call is bounded by `timeout`. Dropping the returned future
    /// cancels the call.
    ///
    /// The returned document is always for `did` as written. Adapters see the
    /// network with the default filled in, so a document they return for
    /// `did:ethr:mainnet:<address>` is re-rooted at `did:ethr:<address>` when
    /// that was the DID requested.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDid`] if `did` is not a well-formed `did:ethr`.
    /// - [`Error::ResolutionFailed`] if the adapter fails, times out, or
    ///   returns a document for a different DID.
    pub async fn resolve(
        did: &str, ledger: &impl LedgerResolver, timeout: Duration,
    ) -> crate::Result<Document> {
        let parsed: EthrDid = did.parse()?;

        let result =
            tokio::time::timeout(timeout, ledger.resolve_on_chain(&parsed.network, &parsed.address))
                .await;

        let canonical = parsed.to_string();

        match result {
            Ok(Ok(document)) if document.id == did => Ok(document),
            Ok(Ok(document)) if document.id == canonical => Ok(rebase(document, &canonical, did)),
            Ok(Ok(document)) => {
                tracing::warn!(did, id = %document.id, "ledger returned a document for another DID");
                Err(Error::ResolutionFailed(format!(
                    "ledger returned a document for '{}' when resolving {did}",
                    document.id
                )))
            }
            Ok(Err(e)) => {
                tracing::warn!(did, error = %e, "ledger resolution failed");
                Err(Error::ResolutionFailed(format!("issue resolving {did} on chain: {e}")))
            }
            Err(_) => {
                tracing::warn!(did, ?timeout, "ledger resolution timed out");
                Err(Error::ResolutionFailed(format!("resolving {did} timed out after {timeout:?}")))
            }
        }
    }
}

/// Move every DID URL in `document` rooted at `from` to `to`.
fn rebase(mut document: Document, from: &str, to: &str) -> Document {
    rebase_url(&mut document.id, from, to);

    for vm in document.verification_method.iter_mut().flatten() {
        rebase_url(&mut vm.id, from, to);
        rebase_url(&mut vm.controller, from, to);
    }
    for service in document.service.iter_mut().flatten() {
        rebase_url(&mut service.id, from, to);
    }

    let relationships = [
        &mut document.authentication,
        &mut document.assertion_method,
        &mut document.key_agreement,
        &mut document.capability_invocation,
        &mut document.capability_delegation,
    ];
    for entry in relationships.into_iter().flatten().flatten() {
        match entry {
            Kind::String(id) => rebase_url(id, from, to),
            Kind::Object(vm) => {
                rebase_url(&mut vm.id, from, to);
                rebase_url(&mut vm.controller, from, to);
            }
        }
    }

    document
}

fn rebase_url(url: &mut String, from: &str, to: &str) {
    let Some(rest) = url.strip_prefix(from) else {
        return;
    };
    // `did:ethr:mainnet:0xab` must not match `did:ethr:mainnet:0xabcd`
    if rest.is_empty() || rest.starts_with(['#', '?', '/']) {
        *url = format!("{to}{rest}");
    }
}
