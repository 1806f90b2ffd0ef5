//! # JSON-RPC Ledger
//!
//! A [`LedgerResolver`] that reads identity ownership from the ERC-1056
//! `EthereumDIDRegistry` over Ethereum JSON-RPC.
//!
//! Only the registry's `identityOwner(address)` view is consulted, so the
//! documents returned are the default ERC-1056 document for the current owner.
//! Delegates and attributes published as registry events are not replayed.

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};

use super::{checksum, DidEthr, PREFIX};
use crate::config::{Config, NetworkConfig};
use crate::document::Document;
use crate::provider::LedgerResolver;

/// Resolves `did:ethr` documents from the registry contract on each
/// configured network.
#[derive(Clone, Debug)]
pub struct RpcLedger {
    client: reqwest::Client,
    networks: Vec<NetworkConfig>,
}

impl RpcLedger {
    /// Create a ledger client for the given networks.
    #[must_use]
    pub fn new(networks: Vec<NetworkConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            networks,
        }
    }

    /// Create a ledger client for the networks in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ethr.networks.clone())
    }

    fn network(&self, network: &str) -> Option<&NetworkConfig> {
        self.networks.iter().find(|n| n.matches(network))
    }

    /// Call `identityOwner(address)` on the network's registry.
    async fn identity_owner(&self, network: &NetworkConfig, address: &str) -> Result<String> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: json!([
                {"to": network.registry, "data": identity_owner_call(address)?},
                "latest"
            ]),
        };
        tracing::debug!(network = %network.name, address, "querying registry owner");

        let response = self.client.post(&network.rpc_url).json(&request).send().await?;
        if !response.status().is_success() {
            bail!("RPC endpoint returned {}", response.status());
        }
        let body = response.json::<RpcResponse>().await?;

        if let Some(error) = body.error {
            bail!("RPC error {}: {}", error.code, error.message);
        }
        let Some(result) = body.result else {
            bail!("RPC response has neither result nor error");
        };
        decode_address(&result)
    }
}

impl LedgerResolver for RpcLedger {
    async fn resolve_on_chain(&self, network: &str, address: &str) -> Result<Document> {
        let Some(config) = self.network(network) else {
            bail!("network {network} is not configured");
        };
        let owner = self.identity_owner(config, address).await?;

        let did = format!("{PREFIX}{network}:{address}");
        Ok(DidEthr::document(&did, config.chain_id, &owner))
    }
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<String>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// ABI-encode `identityOwner(address)` call data.
fn identity_owner_call(address: &str) -> Result<String> {
    let account = address.strip_prefix("0x").unwrap_or(address);
    let account = hex::decode(account)?;
    if account.len() != 20 {
        bail!("address must be 20 bytes, got {}", account.len());
    }

    let selector = &Keccak256::digest(b"identityOwner(address)")[..4];
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(selector);
    // address is left-padded to a 32-byte word
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(&account);
    Ok(format!("0x{}", hex::encode(data)))
}

/// Decode an ABI-encoded `address` return value.
fn decode_address(result: &str) -> Result<String> {
    let bytes = hex::decode(result.strip_prefix("0x").unwrap_or(result))?;
    if bytes.len() != 32 {
        return Err(anyhow!("expected a 32-byte word, got {} bytes", bytes.len()));
    }
    let mut account = [0u8; 20];
    account.copy_from_slice(&bytes[12..]);
    Ok(checksum(&account))
}
