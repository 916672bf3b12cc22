#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Wallet/network session and ERC721 contract-call controller.
//!
//! This crate is the core of an operator console for ERC721 contracts: it
//! manages the wallet connection, the set of configured EVM networks, and a
//! small fixed surface of contract operations (`mint`, `transferFrom`,
//! `approve`, `ownerOf`, `getApproved`) dispatched against an
//! operator-supplied contract address. Presentation (page layout, widgets,
//! toasts) is an external collaborator: it renders controller state and
//! forwards user intent through [`Controller`](controller::Controller).
//!
//! # Architecture
//!
//! - [`networks`] - Network profiles and the profile registry
//! - [`session`] - Wallet connection state and authorization predicates
//! - [`controller`] - Call validation, pre-flight checks, and dispatch
//! - [`classify`] - Mapping of raw provider failures onto a closed taxonomy
//! - [`provider`] - The wallet-provider boundary trait
//! - [`hooks`] - Notification hooks for the presentation layer
//!
//! Chain-specific plumbing lives in `nftctl-evm`, which implements
//! [`provider::WalletProvider`] over alloy HTTP JSON-RPC with local signers.

pub mod call;
pub mod chain;
pub mod classify;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod networks;
pub mod provider;
pub mod session;

pub use call::{CallRequest, CallResult, Erc721Function};
pub use controller::Controller;
pub use error::ClassifiedError;
pub use networks::{NetworkProfile, NetworkRegistry};
pub use provider::{ProviderError, WalletProvider};
pub use session::SessionState;
