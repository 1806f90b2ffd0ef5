//! # Configuration
//!
//! Resolver and issuance settings. `Config::default()` targets Sepolia through
//! a public RPC endpoint; deployments override it by deserializing their own
//! settings or from environment variables with [`Config::from_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default bound on a single ledger resolution.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Address of the ERC-1056 `EthereumDIDRegistry` on mainnet.
pub const MAINNET_REGISTRY: &str = "0xdca7ef03e98e0dc2b855be647c39abe984fcf21b";

/// Address of the ERC-1056 `EthereumDIDRegistry` on Sepolia.
pub const SEPOLIA_REGISTRY: &str = "0x03d5003bf0e79c5f5223588f347eba39afbc3818";

/// Top-level configuration.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Config {
    /// `did:ethr` settings.
    pub ethr: EthrConfig,

    /// Upper bound, in seconds, on a single ledger resolution.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ethr: EthrConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `did:ethr` settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct EthrConfig {
    /// Network new `did:ethr` identifiers are issued on.
    pub default_network: String,

    /// Networks the resolver can query.
    pub networks: Vec<NetworkConfig>,
}

impl Default for EthrConfig {
    fn default() -> Self {
        Self {
            default_network: "sepolia".into(),
            networks: vec![
                NetworkConfig {
                    name: "sepolia".into(),
                    chain_id: 11_155_111,
                    rpc_url: "https://rpc.ankr.com/eth_sepolia".into(),
                    registry: SEPOLIA_REGISTRY.into(),
                },
                NetworkConfig {
                    name: "mainnet".into(),
                    chain_id: 1,
                    rpc_url: "https://rpc.ankr.com/eth".into(),
                    registry: MAINNET_REGISTRY.into(),
                },
            ],
        }
    }
}

/// A ledger the resolver can query.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Network name as it appears in the DID, e.g. `sepolia`.
    pub name: String,

    /// EIP-155 chain id.
    pub chain_id: u64,

    /// JSON-RPC endpoint.
    pub rpc_url: String,

    /// Address of the ERC-1056 registry contract.
    pub registry: String,
}

impl NetworkConfig {
    /// Whether the DID network segment refers to this network, either by name
    /// or by hex chain id.
    #[must_use]
    pub fn matches(&self, network: &str) -> bool {
        if network == self.name {
            return true;
        }
        network
            .strip_prefix("0x")
            .and_then(|hex| u64::from_str_radix(hex, 16).ok())
            .is_some_and(|chain_id| chain_id == self.chain_id)
    }
}

impl Config {
    /// Default configuration overlaid with environment variables:
    ///
    /// - `ETHR_NETWORK`: network to issue `did:ethr` identifiers on.
    /// - `ETHR_RPC_URL`: JSON-RPC endpoint for that network.
    /// - `RESOLVER_TIMEOUT_SECS`: ledger resolution timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if a variable cannot be parsed or the
    /// resulting configuration is invalid.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(network) = std::env::var("ETHR_NETWORK") {
            config.ethr.default_network = network;
        }
        if let Ok(rpc_url) = std::env::var("ETHR_RPC_URL") {
            let name = config.ethr.default_network.clone();
            let Some(network) = config.ethr.networks.iter_mut().find(|n| n.matches(&name)) else {
                return Err(Error::InvalidConfig(format!(
                    "ETHR_RPC_URL set for unknown network {name}"
                )));
            };
            network.rpc_url = rpc_url;
        }
        if let Ok(timeout) = std::env::var("RESOLVER_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|e| {
                Error::InvalidConfig(format!("RESOLVER_TIMEOUT_SECS is not a number: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the timeout is zero, the default
    /// network is not configured, or a network has an invalid RPC URL or
    /// registry address.
    pub fn validate(&self) -> crate::Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeout must be greater than zero".into()));
        }
        if self.network(&self.ethr.default_network).is_none() {
            return Err(Error::InvalidConfig(format!(
                "default network {} is not configured",
                self.ethr.default_network
            )));
        }

        for network in &self.ethr.networks {
            url::Url::parse(&network.rpc_url).map_err(|e| {
                Error::InvalidConfig(format!("invalid RPC URL for {}: {e}", network.name))
            })?;
            let registry = network.registry.strip_prefix("0x").unwrap_or_default();
            if registry.len() != 40 || hex::decode(registry).is_err() {
                return Err(Error::InvalidConfig(format!(
                    "invalid registry address for {}: {}",
                    network.name, network.registry
                )));
            }
        }
        Ok(())
    }

    /// Look up a configured network by name or hex chain id.
    #[must_use]
    pub fn network(&self, network: &str) -> Option<&NetworkConfig> {
        self.ethr.networks.iter().find(|n| n.matches(network))
    }

    /// The ledger resolution timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_is_valid() {
        let config = Config::default();
        config.validate().expect("should be valid");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.network("sepolia").map(|n| n.chain_id), Some(11_155_111));
    }

    #[test]
    fn network_by_chain_id() {
        let config = Config::default();
        let network = config.network("0xaa36a7").expect("should find sepolia");
        assert_eq!(network.name, "sepolia");
        assert!(config.network("0x5").is_none());
    }

    #[test]
    fn deserialize_partial() {
        let config: Config = serde_json::from_value(json!({
            "timeoutSecs": 3,
            "ethr": {
                "defaultNetwork": "dev",
                "networks": [{
                    "name": "dev",
                    "chainId": 1337,
                    "rpcUrl": "http://localhost:8545",
                    "registry": "0xdca7ef03e98e0dc2b855be647c39abe984fcf21b"
                }]
            }
        }))
        .expect("should deserialize");

        config.validate().expect("should be valid");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert!(config.network("0x539").is_some());
    }

    // Environment variables are process-wide, so every case runs in this one
    // test rather than in parallel tests.
    #[test]
    fn from_env() {
        const VARS: [&str; 3] = ["ETHR_NETWORK", "ETHR_RPC_URL", "RESOLVER_TIMEOUT_SECS"];
        let clear = || {
            for var in VARS {
                std::env::remove_var(var);
            }
        };

        clear();
        assert_eq!(Config::from_env().expect("should load"), Config::default());

        std::env::set_var("ETHR_NETWORK", "mainnet");
        std::env::set_var("ETHR_RPC_URL", "http://localhost:8545");
        std::env::set_var("RESOLVER_TIMEOUT_SECS", "3");
        let config = Config::from_env().expect("should load");
        assert_eq!(config.ethr.default_network, "mainnet");
        assert_eq!(
            config.network("mainnet").map(|n| n.rpc_url.as_str()),
            Some("http://localhost:8545")
        );
        assert_eq!(
            config.network("sepolia").map(|n| n.rpc_url.as_str()),
            Some("https://rpc.ankr.com/eth_sepolia")
        );
        assert_eq!(config.timeout(), Duration::from_secs(3));

        std::env::set_var("RESOLVER_TIMEOUT_SECS", "soon");
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.message().contains("RESOLVER_TIMEOUT_SECS"));

        std::env::set_var("RESOLVER_TIMEOUT_SECS", "0");
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, Error::InvalidConfig(_)));

        clear();
        std::env::set_var("ETHR_NETWORK", "goerli");
        std::env::set_var("ETHR_RPC_URL", "http://localhost:8545");
        let err = Config::from_env().expect_err("should fail");
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.message().contains("unknown network goerli"));

        std::env::remove_var("ETHR_RPC_URL");
        let err = Config::from_env().expect_err("should fail");
        assert!(err.message().contains("goerli is not configured"));

        std::env::set_var("ETHR_NETWORK", "sepolia");
        std::env::set_var("ETHR_RPC_URL", "not a url");
        let err = Config::from_env().expect_err("should fail");
        assert!(err.message().contains("invalid RPC URL for sepolia"));

        clear();
    }

    #[test]
    fn invalid() {
        let mut config = Config::default();
        config.ethr.default_network = "goerli".into();
        let err = config.validate().expect_err("should be invalid");
        assert!(matches!(err, Error::InvalidConfig(_)));

        let mut config = Config::default();
        config.ethr.networks[0].registry = "0x1234".into();
        assert!(config.validate().is_err());

        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
