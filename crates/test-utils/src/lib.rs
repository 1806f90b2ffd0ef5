//! Test doubles for DID issuance and resolution.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use vercre_did_codec::{DidEthr, Document, LedgerResolver};

/// Chain id reported in documents returned by [`MockLedger`].
pub const CHAIN_ID: u64 = 11_155_111;

/// A deterministic RNG so generated keys are reproducible across runs.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[derive(Clone, Copy, Debug, Default)]
enum Behavior {
    #[default]
    Respond,
    Fail,
    Stall,
}

/// An in-memory ledger that counts every lookup.
///
/// Accounts resolve to themselves as owner unless a different owner has been
/// set with [`MockLedger::set_owner`].
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    owners: Arc<DashMap<String, String>>,
    calls: Arc<AtomicUsize>,
    behavior: Behavior,
}

impl MockLedger {
    /// A ledger that answers every lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger whose lookups always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            ..Self::default()
        }
    }

    /// A ledger whose lookups never complete.
    #[must_use]
    pub fn stalled() -> Self {
        Self {
            behavior: Behavior::Stall,
            ..Self::default()
        }
    }

    /// Transfer ownership of `address` to `owner`.
    pub fn set_owner(&self, address: &str, owner: &str) {
        self.owners.insert(address.to_lowercase(), owner.to_string());
    }

    /// Number of lookups made so far, including failed ones.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LedgerResolver for MockLedger {
    async fn resolve_on_chain(&self, network: &str, address: &str) -> Result<Document> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            Behavior::Respond => {
                let owner = self
                    .owners
                    .get(&address.to_lowercase())
                    .map_or_else(|| address.to_string(), |o| o.value().clone());
                let did = format!("did:ethr:{network}:{address}");
                Ok(DidEthr::document(&did, CHAIN_ID, &owner))
            }
            Behavior::Fail => Err(anyhow!("ledger unavailable")),
            Behavior::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(anyhow!("ledger stalled"))
            }
        }
    }
}
