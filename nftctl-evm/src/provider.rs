//! EVM wallet provider over HTTP JSON-RPC with local signers.
//!
//! [`EvmWalletProvider`] keeps one composed alloy provider per configured
//! network and tracks which one is active. The browser wallet's switch/add
//! handshake maps onto that state: switching to a chain with no registered
//! endpoints reports [`ProviderError::UnrecognizedChain`], and adding the
//! chain builds a provider from the profile's RPC URLs. Local signer keys
//! are always authorized, so the connect flow never prompts.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Duration;

use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller, WalletFiller,
};
use alloy_provider::{Identity, PendingTransactionBuilder, Provider, ProviderBuilder, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use alloy_sol_types::SolCall;
use alloy_transport::layers::FallbackLayer;
use alloy_transport_http::Http;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use url::Url;

use nftctl::call::MutatingCall;
use nftctl::chain::ChainId;
use nftctl::networks::NetworkProfile;
use nftctl::provider::{ProviderError, WalletProvider};

use crate::contract::IMintableErc721;
use crate::error::{lower_contract, lower_pending, lower_transport};

/// Combined filler type for gas, blob gas, nonce, and chain id.
pub type InnerFiller =
    JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>;

/// The fully composed provider type used per network.
///
/// Combines filler layers for gas, nonce, chain id and blob gas with wallet
/// signing, and wraps a [`RootProvider`] for the actual JSON-RPC traffic.
pub type InnerProvider = FillProvider<
    JoinFill<JoinFill<Identity, InnerFiller>, WalletFiller<EthereumWallet>>,
    RootProvider,
>;

/// Wallet provider backed by alloy HTTP providers and a local signer.
pub struct EvmWalletProvider {
    wallet: EthereumWallet,
    accounts: Vec<Address>,
    receipt_timeout: Duration,
    confirmations: u64,
    chains: RwLock<HashMap<ChainId, InnerProvider>>,
    active: RwLock<Option<ChainId>>,
}

impl std::fmt::Debug for EvmWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmWalletProvider")
            .field("accounts", &self.accounts)
            .field("receipt_timeout", &self.receipt_timeout)
            .field("confirmations", &self.confirmations)
            .finish_non_exhaustive()
    }
}

impl EvmWalletProvider {
    /// Creates a provider with one signer and the given network profiles
    /// registered. The first profile starts active.
    ///
    /// # Errors
    ///
    /// Fails if any profile has no usable HTTP RPC endpoint.
    pub fn new(
        signer: PrivateKeySigner,
        profiles: &[NetworkProfile],
        receipt_timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let accounts = vec![signer.address()];
        let wallet = EthereumWallet::from(signer);
        let mut chains = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            chains.insert(
                profile.chain_id,
                build_provider(wallet.clone(), &profile.rpc_urls)?,
            );
            tracing::info!(network = %profile.key, chain = %profile.chain_id, "registered evm network");
        }
        let active = profiles.first().map(|p| p.chain_id);
        Ok(Self {
            wallet,
            accounts,
            receipt_timeout: Duration::from_secs(receipt_timeout_secs),
            confirmations: 1,
            chains: RwLock::new(chains),
            active: RwLock::new(active),
        })
    }

    /// Overrides how many confirmations [`WalletProvider::confirm`] waits
    /// for (default 1).
    #[must_use]
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations;
        self
    }

    /// The provider for the active network, cloned out of the registry so
    /// no lock is held across RPC traffic.
    async fn active_provider(&self) -> Result<InnerProvider, ProviderError> {
        let active = (*self.active.read().await)
            .ok_or_else(|| ProviderError::transport("no active network selected"))?;
        self.chains
            .read()
            .await
            .get(&active)
            .cloned()
            .ok_or(ProviderError::UnrecognizedChain(active))
    }
}

/// Builds an RPC client over the HTTP endpoints, with transport fallback
/// across them. Non-HTTP(S) URLs are skipped.
fn rpc_client(endpoints: &[Url]) -> Result<RpcClient, ProviderError> {
    let transports: Vec<_> = endpoints
        .iter()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| Http::new((*url).clone()))
        .collect();
    let count = NonZeroUsize::new(transports.len())
        .ok_or_else(|| ProviderError::transport("no usable http rpc endpoints"))?;
    let fallback = ServiceBuilder::new()
        .layer(FallbackLayer::default().with_active_transport_count(count))
        .service(transports);
    Ok(RpcClient::new(fallback, false))
}

fn build_provider(wallet: EthereumWallet, endpoints: &[Url]) -> Result<InnerProvider, ProviderError> {
    let client = rpc_client(endpoints)?;
    let filler = JoinFill::new(
        GasFiller,
        JoinFill::new(
            BlobGasFiller::default(),
            JoinFill::new(NonceFiller::default(), ChainIdFiller::default()),
        ),
    );
    Ok(ProviderBuilder::default()
        .filler(filler)
        .wallet(wallet)
        .connect_client(client))
}

fn encode_call(call: &MutatingCall) -> Bytes {
    match call {
        MutatingCall::Mint { to, token_id } => IMintableErc721::mintCall {
            to: *to,
            tokenId: *token_id,
        }
        .abi_encode()
        .into(),
        MutatingCall::TransferFrom { from, to, token_id } => IMintableErc721::transferFromCall {
            from: *from,
            to: *to,
            tokenId: *token_id,
        }
        .abi_encode()
        .into(),
        MutatingCall::Approve { to, token_id } => IMintableErc721::approveCall {
            to: *to,
            tokenId: *token_id,
        }
        .abi_encode()
        .into(),
    }
}

#[async_trait]
impl WalletProvider for EvmWalletProvider {
    /// Local signer keys need no prompt; they are authorized by possession.
    async fn authorized_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(self.accounts.clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        if self.accounts.is_empty() {
            return Err(ProviderError::Unavailable);
        }
        Ok(self.accounts.clone())
    }

    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError> {
        if !self.chains.read().await.contains_key(&chain_id) {
            return Err(ProviderError::UnrecognizedChain(chain_id));
        }
        *self.active.write().await = Some(chain_id);
        tracing::debug!(chain = %chain_id, "switched active network");
        Ok(())
    }

    async fn add_chain(&self, profile: &NetworkProfile) -> Result<(), ProviderError> {
        let provider = build_provider(self.wallet.clone(), &profile.rpc_urls)?;
        self.chains.write().await.insert(profile.chain_id, provider);
        tracing::info!(network = %profile.key, chain = %profile.chain_id, "added evm network");
        Ok(())
    }

    async fn owner_of(&self, contract: Address, token_id: U256) -> Result<Address, ProviderError> {
        let provider = self.active_provider().await?;
        let contract = IMintableErc721::new(contract, provider);
        contract
            .ownerOf(token_id)
            .call()
            .await
            .map_err(lower_contract)
    }

    async fn get_approved(
        &self,
        contract: Address,
        token_id: U256,
    ) -> Result<Address, ProviderError> {
        let provider = self.active_provider().await?;
        let contract = IMintableErc721::new(contract, provider);
        contract
            .getApproved(token_id)
            .call()
            .await
            .map_err(lower_contract)
    }

    async fn submit(
        &self,
        contract: Address,
        from: Address,
        call: &MutatingCall,
    ) -> Result<TxHash, ProviderError> {
        let provider = self.active_provider().await?;
        let tx = TransactionRequest::default()
            .with_to(contract)
            .with_from(from)
            .with_input(encode_call(call));
        let pending = provider
            .send_transaction(tx)
            .await
            .map_err(lower_transport)?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(%tx_hash, "transaction submitted");
        Ok(tx_hash)
    }

    async fn confirm(&self, tx: TxHash) -> Result<(), ProviderError> {
        let provider = self.active_provider().await?;
        let receipt = PendingTransactionBuilder::new(provider.root().clone(), tx)
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await
            .map_err(lower_pending)?;
        if receipt.status() {
            tracing::info!(%tx, "transaction confirmed");
            Ok(())
        } else {
            // mined but reverted; no reason string is available here
            Err(ProviderError::revert(format!("transaction {tx} reverted")))
        }
    }
}
