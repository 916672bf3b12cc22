#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Alloy-backed wallet provider for the `nftctl` console.
//!
//! This crate implements [`nftctl::provider::WalletProvider`] over HTTP
//! JSON-RPC with local signers, for hosts that run the console outside a
//! browser. It keeps one composed alloy provider per configured network and
//! models the wallet's switch/add-chain handshake natively: switching to a
//! chain with no registered RPC endpoint reports the chain as unrecognized,
//! and adding the chain registers its endpoints.
//!
//! # Modules
//!
//! - [`provider`] - The [`EvmWalletProvider`](provider::EvmWalletProvider)
//! - [`contract`] - The fixed ERC721 interface the console dispatches
//! - [`config`] - TOML configuration with environment-variable expansion
//! - [`error`] - Lowering of alloy error types into the core error shape

pub mod config;
pub mod contract;
pub mod error;
pub mod provider;

pub use config::ConsoleConfig;
pub use provider::EvmWalletProvider;
