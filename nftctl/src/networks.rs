//! Network profiles and the profile registry.
//!
//! A [`NetworkProfile`] bundles everything the console knows about one
//! EVM-compatible network: chain id, display metadata, RPC and explorer
//! endpoints, and per-network policy (the required minter wallet and the
//! default transfer-from wallet). The [`NetworkRegistry`] is the immutable,
//! ordered table of profiles assembled at startup.

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::chain::ChainId;

/// Epic Chain chain id.
pub const EPIC_CHAIN: ChainId = ChainId::new(183);

/// Sepolia (testnet) chain id.
pub const SEPOLIA: ChainId = ChainId::new(11_155_111);

/// The wallet permitted to mint on Epic Chain.
pub const EPIC_CHAIN_MINTER: Address = address!("B9d5c93ec9abA93180ddD00a628e8FAcc3103039");

/// The profiles wallet transfers default from on Epic Chain.
pub const EPIC_CHAIN_PROFILES_WALLET: Address =
    address!("e7cbdd4E7fa9A11E60D6F5590aFD75265245B054");

/// The wallet permitted to mint on Sepolia.
pub const SEPOLIA_MINTER: Address = address!("Af55536b3216FDAeeB975729fAE923d5A4f31a9d");

/// Everything the console knows about one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Stable lookup key (e.g. `"sepolia"`).
    pub key: String,
    /// Numeric EIP-155 chain id, unique across the registry.
    pub chain_id: ChainId,
    /// Human-readable name shown to the operator.
    pub display_name: String,
    /// Native currency ticker (e.g. `"ETH"`).
    pub currency_symbol: String,
    /// Ordered HTTP RPC endpoints, first is preferred.
    pub rpc_urls: Vec<Url>,
    /// Ordered block-explorer base URLs.
    #[serde(default)]
    pub explorer_urls: Vec<Url>,
    /// The only wallet allowed to mint on this network; `None` means
    /// minting is unrestricted.
    #[serde(default)]
    pub required_minter: Option<Address>,
    /// Wallet that transfer forms default their from-address to.
    #[serde(default)]
    pub default_transfer_from: Option<Address>,
}

/// Error returned by [`NetworkRegistry::get`] for an unknown key.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown network {0:?}")]
pub struct UnknownNetworkError(pub String);

/// Error returned when a registry cannot be assembled.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// Two profiles share a chain id.
    #[error("duplicate chain id {0} in network table")]
    DuplicateChainId(ChainId),
    /// Two profiles share a lookup key.
    #[error("duplicate network key {0:?} in network table")]
    DuplicateKey(String),
    /// The table is empty.
    #[error("network table is empty")]
    Empty,
}

/// Immutable, ordered table of network profiles.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    profiles: Vec<NetworkProfile>,
}

impl NetworkRegistry {
    /// Builds a registry from a profile table.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty or contains duplicate keys or chain ids.
    pub fn new(profiles: Vec<NetworkProfile>) -> Result<Self, RegistryError> {
        if profiles.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, profile) in profiles.iter().enumerate() {
            for other in &profiles[..i] {
                if other.chain_id == profile.chain_id {
                    return Err(RegistryError::DuplicateChainId(profile.chain_id));
                }
                if other.key == profile.key {
                    return Err(RegistryError::DuplicateKey(profile.key.clone()));
                }
            }
        }
        Ok(Self { profiles })
    }

    /// Builds the registry of built-in networks.
    #[must_use]
    pub fn known() -> Self {
        Self {
            profiles: known_networks(),
        }
    }

    /// Returns the profiles in registration order.
    #[must_use]
    pub fn profiles(&self) -> &[NetworkProfile] {
        &self.profiles
    }

    /// Looks up a profile by key.
    ///
    /// # Errors
    ///
    /// Fails with [`UnknownNetworkError`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&NetworkProfile, UnknownNetworkError> {
        self.profiles
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| UnknownNetworkError(key.to_owned()))
    }

    /// Looks up a profile by chain id.
    #[must_use]
    pub fn by_chain_id(&self, chain_id: ChainId) -> Option<&NetworkProfile> {
        self.profiles.iter().find(|p| p.chain_id == chain_id)
    }
}

/// Returns the built-in network profile table.
#[must_use]
pub fn known_networks() -> Vec<NetworkProfile> {
    fn urls(raw: &[&str]) -> Vec<Url> {
        raw.iter().filter_map(|u| Url::parse(u).ok()).collect()
    }
    vec![
        NetworkProfile {
            key: "epicchain".to_owned(),
            chain_id: EPIC_CHAIN,
            display_name: "Epic Chain".to_owned(),
            currency_symbol: "ETH".to_owned(),
            rpc_urls: urls(&["https://mainnet.ethernitychain.io/"]),
            explorer_urls: urls(&["https://explorer.epicchain.io"]),
            required_minter: Some(EPIC_CHAIN_MINTER),
            default_transfer_from: Some(EPIC_CHAIN_PROFILES_WALLET),
        },
        NetworkProfile {
            key: "sepolia".to_owned(),
            chain_id: SEPOLIA,
            display_name: "Sepolia".to_owned(),
            currency_symbol: "ETH".to_owned(),
            rpc_urls: urls(&["https://rpc.sepolia.org"]),
            explorer_urls: urls(&["https://sepolia.etherscan.io"]),
            required_minter: Some(SEPOLIA_MINTER),
            default_transfer_from: None,
        },
    ]
}
