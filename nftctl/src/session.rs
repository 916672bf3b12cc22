//! Wallet session state.
//!
//! The session tracks the connection to the injected wallet provider: the
//! connection state, the current account, and the active network key. It is
//! a plain state machine; all provider interaction happens in
//! [`crate::controller`].

use alloy_primitives::Address;
use serde::Serialize;

use crate::call::Erc721Function;
use crate::networks::NetworkProfile;

/// Connection state of the wallet session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// No wallet connected.
    #[default]
    Disconnected,
    /// A connect request is in flight.
    Connecting,
    /// A wallet is connected and an account is available.
    Connected,
}

/// The wallet session owned by the controller.
///
/// The account is present exactly when the state is [`SessionState::Connected`];
/// both fields change together through the transition methods.
#[derive(Debug, Clone)]
pub struct WalletSession {
    state: SessionState,
    account: Option<Address>,
    network: String,
}

impl WalletSession {
    /// Creates a fresh, disconnected session on the given network.
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            state: SessionState::Disconnected,
            account: None,
            network: network.into(),
        }
    }

    /// Current connection state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Connected account, if any.
    #[must_use]
    pub const fn account(&self) -> Option<Address> {
        self.account
    }

    /// Key of the active network.
    #[must_use]
    pub fn network(&self) -> &str {
        &self.network
    }

    /// Marks a connect request as in flight.
    pub const fn begin_connecting(&mut self) {
        self.state = SessionState::Connecting;
    }

    /// Records an approved connection.
    pub const fn connected(&mut self, account: Address) {
        self.state = SessionState::Connected;
        self.account = Some(account);
    }

    /// Clears the connection; a pure local reset.
    pub fn reset(&mut self) {
        self.state = SessionState::Disconnected;
        self.account = None;
    }

    /// Changes the active network key.
    pub fn set_network(&mut self, network: impl Into<String>) {
        self.network = network.into();
    }

    /// Whether the connected account may invoke `function` on `profile`.
    ///
    /// Minting is restricted to the profile's required minter when one is
    /// configured; comparison is on parsed addresses, so letter case never
    /// matters. Every other function only needs a connected wallet.
    #[must_use]
    pub fn is_authorized_for(&self, function: Erc721Function, profile: &NetworkProfile) -> bool {
        let Some(account) = self.account else {
            return false;
        };
        match function {
            Erc721Function::Mint => profile
                .required_minter
                .is_none_or(|minter| minter == account),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::networks::known_networks;
    use alloy_primitives::address;

    fn sepolia() -> NetworkProfile {
        known_networks()
            .into_iter()
            .find(|p| p.key == "sepolia")
            .unwrap()
    }

    #[test]
    fn starts_disconnected() {
        let session = WalletSession::new("sepolia");
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.account().is_none());
        assert_eq!(session.network(), "sepolia");
    }

    #[test]
    fn connect_and_reset_keep_account_and_state_in_step() {
        let mut session = WalletSession::new("sepolia");
        session.begin_connecting();
        assert_eq!(session.state(), SessionState::Connecting);
        let account = address!("Af55536b3216FDAeeB975729fAE923d5A4f31a9d");
        session.connected(account);
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(session.account(), Some(account));
        session.reset();
        assert_eq!(session.state(), SessionState::Disconnected);
        assert!(session.account().is_none());
    }

    #[test]
    fn mint_requires_the_configured_minter() {
        let profile = sepolia();
        let mut session = WalletSession::new("sepolia");
        assert!(!session.is_authorized_for(Erc721Function::Mint, &profile));

        session.connected(address!("beef00000000000000000000000000000000beef"));
        assert!(!session.is_authorized_for(Erc721Function::Mint, &profile));

        session.connected(address!("Af55536b3216FDAeeB975729fAE923d5A4f31a9d"));
        assert!(session.is_authorized_for(Erc721Function::Mint, &profile));
    }

    #[test]
    fn minter_comparison_ignores_letter_case() {
        let profile = sepolia();
        let mut session = WalletSession::new("sepolia");
        // same account, typed in upper-case hex
        let account: Address = "0xAF55536B3216FDAEEB975729FAE923D5A4F31A9D"
            .parse()
            .unwrap();
        session.connected(account);
        assert!(session.is_authorized_for(Erc721Function::Mint, &profile));
    }

    #[test]
    fn mint_is_unrestricted_without_a_required_minter() {
        let mut profile = sepolia();
        profile.required_minter = None;
        let mut session = WalletSession::new("sepolia");
        session.connected(address!("beef00000000000000000000000000000000beef"));
        assert!(session.is_authorized_for(Erc721Function::Mint, &profile));
    }

    #[test]
    fn non_mint_functions_need_only_a_connection() {
        let profile = sepolia();
        let mut session = WalletSession::new("sepolia");
        for function in [
            Erc721Function::TransferFrom,
            Erc721Function::Approve,
            Erc721Function::OwnerOf,
            Erc721Function::GetApproved,
        ] {
            assert!(!session.is_authorized_for(function, &profile));
        }
        session.connected(address!("beef00000000000000000000000000000000beef"));
        for function in [
            Erc721Function::TransferFrom,
            Erc721Function::Approve,
            Erc721Function::OwnerOf,
            Erc721Function::GetApproved,
        ] {
            assert!(session.is_authorized_for(function, &profile));
        }
    }
}
