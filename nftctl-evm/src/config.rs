//! Console configuration.
//!
//! Loads configuration from a TOML file with support for environment
//! variable expansion in string values. Variables use `$VAR` or `${VAR}`
//! syntax.
//!
//! # Example Configuration
//!
//! ```toml
//! default_network = "sepolia"
//! receipt_timeout_secs = 30
//! signer_private_key = "$NFTCTL_SIGNER_KEY"
//!
//! [[networks]]
//! key = "sepolia"
//! chain_id = 11155111
//! display_name = "Sepolia"
//! currency_symbol = "ETH"
//! rpc_urls = ["https://rpc.sepolia.org"]
//! required_minter = "0xAf55536b3216FDAeeB975729fAE923d5A4f31a9d"
//! ```
//!
//! # Environment Variables
//!
//! - `NFTCTL_CONFIG` - Path to the configuration file (default:
//!   `console.toml`)
//! - Any `$VAR` referenced from the file, typically the signer key

use std::path::Path;

use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};

use nftctl::networks::{NetworkProfile, NetworkRegistry, RegistryError};
use nftctl::provider::ProviderError;

use crate::provider::EvmWalletProvider;

/// Top-level console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Key of the network that starts active.
    #[serde(default = "default_network")]
    pub default_network: String,

    /// How long to wait for a transaction receipt, in seconds.
    #[serde(default = "default_receipt_timeout")]
    pub receipt_timeout_secs: u64,

    /// Private key for the console signer (hex, with or without `0x`).
    /// Supports `$VAR` / `${VAR}` environment variable expansion.
    #[serde(default)]
    pub signer_private_key: String,

    /// Network profiles; the built-in table is used when empty.
    #[serde(default)]
    pub networks: Vec<NetworkProfile>,
}

fn default_network() -> String {
    "epicchain".to_owned()
}

const fn default_receipt_timeout() -> u64 {
    30
}

/// Error raised while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The network table violates a registry invariant.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// No signer key was configured.
    #[error("signer_private_key is not set")]
    MissingSignerKey,
    /// The signer key does not parse as a private key.
    #[error("signer_private_key is not a valid private key")]
    InvalidSignerKey,
    /// The wallet provider could not be built.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ConsoleConfig {
    /// Loads configuration from the path in the `NFTCTL_CONFIG` environment
    /// variable, falling back to `console.toml` in the current directory.
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("NFTCTL_CONFIG").unwrap_or_else(|_| "console.toml".to_owned());
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file path, expanding `$VAR` /
    /// `${VAR}` references from the process environment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let content = if Path::new(path).exists() {
            std::fs::read_to_string(path)?
        } else {
            String::new()
        };
        let expanded = expand_env_vars(&content);
        Ok(toml::from_str(&expanded)?)
    }

    /// Assembles the network registry this configuration describes.
    ///
    /// # Errors
    ///
    /// Fails if the configured network table violates a registry invariant.
    pub fn registry(&self) -> Result<NetworkRegistry, ConfigError> {
        if self.networks.is_empty() {
            return Ok(NetworkRegistry::known());
        }
        Ok(NetworkRegistry::new(self.networks.clone())?)
    }

    /// Builds the wallet provider, with the default network active.
    ///
    /// # Errors
    ///
    /// Fails if the signer key is missing or invalid, or if a profile has
    /// no usable RPC endpoint.
    pub fn wallet_provider(&self) -> Result<EvmWalletProvider, ConfigError> {
        let key = self.signer_private_key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingSignerKey);
        }
        let signer: PrivateKeySigner = key.parse().map_err(|_| ConfigError::InvalidSignerKey)?;

        let mut profiles = self.registry()?.profiles().to_vec();
        if let Some(pos) = profiles.iter().position(|p| p.key == self.default_network) {
            profiles.swap(0, pos);
        }
        Ok(EvmWalletProvider::new(
            signer,
            &profiles,
            self.receipt_timeout_secs,
        )?)
    }
}

/// Expands `$VAR` and `${VAR}` patterns from the process environment.
/// Unresolved variables are left as-is.
fn expand_env_vars(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(at) = rest.find('$') {
        out.push_str(&rest[..at]);
        rest = &rest[at + 1..];

        let braced = rest.starts_with('{');
        let body = if braced { &rest[1..] } else { rest };
        let end = body
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(body.len());
        let name = &body[..end];

        let closed = !braced || body[end..].starts_with('}');
        if name.is_empty() || !closed {
            out.push('$');
            continue;
        }
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => {
                out.push('$');
                if braced {
                    out.push('{');
                }
                out.push_str(name);
                if braced {
                    out.push('}');
                }
            }
        }
        rest = if braced {
            &body[end + 1..]
        } else {
            &body[end..]
        };
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_the_defaults() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert_eq!(config.default_network, "epicchain");
        assert_eq!(config.receipt_timeout_secs, 30);
        assert!(config.signer_private_key.is_empty());
        assert!(config.networks.is_empty());
    }

    #[test]
    fn default_networks_fall_back_to_the_built_in_table() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        let registry = config.registry().unwrap();
        assert!(registry.get("epicchain").is_ok());
        assert!(registry.get("sepolia").is_ok());
    }

    #[test]
    fn parses_a_full_network_table() {
        let config: ConsoleConfig = toml::from_str(
            r#"
            default_network = "local"
            signer_private_key = "0x0000000000000000000000000000000000000000000000000000000000000001"

            [[networks]]
            key = "local"
            chain_id = 31337
            display_name = "Local Devnet"
            currency_symbol = "ETH"
            rpc_urls = ["http://localhost:8545"]
            "#,
        )
        .unwrap();
        let registry = config.registry().unwrap();
        assert_eq!(registry.profiles().len(), 1);
        assert_eq!(registry.get("local").unwrap().chain_id.get(), 31_337);
        assert!(config.wallet_provider().is_ok());
    }

    #[test]
    fn missing_signer_key_is_reported() {
        let config: ConsoleConfig = toml::from_str("").unwrap();
        assert!(matches!(
            config.wallet_provider(),
            Err(ConfigError::MissingSignerKey)
        ));
    }

    #[test]
    fn bad_signer_key_is_reported() {
        let config: ConsoleConfig =
            toml::from_str("signer_private_key = \"not-a-key\"").unwrap();
        assert!(matches!(
            config.wallet_provider(),
            Err(ConfigError::InvalidSignerKey)
        ));
    }

    #[test]
    fn expands_environment_variables() {
        // set_var is unsafe with threads around; contained to this test
        unsafe {
            std::env::set_var("NFTCTL_TEST_VALUE", "expanded");
        }
        assert_eq!(expand_env_vars("a $NFTCTL_TEST_VALUE b"), "a expanded b");
        assert_eq!(expand_env_vars("a ${NFTCTL_TEST_VALUE} b"), "a expanded b");
        assert_eq!(
            expand_env_vars("$NFTCTL_SURELY_UNSET_VARIABLE"),
            "$NFTCTL_SURELY_UNSET_VARIABLE"
        );
        assert_eq!(expand_env_vars("plain $ sign"), "plain $ sign");
        assert_eq!(expand_env_vars("no variables"), "no variables");
    }
}
