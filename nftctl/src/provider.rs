//! The wallet-provider boundary.
//!
//! Everything the controller needs from the outside world goes through
//! [`WalletProvider`]: account access, network switching, the fixed ERC721
//! read surface, and transaction submission/confirmation. A browser host
//! backs this with the injected provider object; `nftctl-evm` backs it with
//! alloy HTTP JSON-RPC and local signers.

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::call::MutatingCall;
use crate::chain::ChainId;
use crate::networks::NetworkProfile;

/// EIP-1193: the user rejected the request.
pub const CODE_USER_REJECTED: i64 = 4001;

/// EIP-1193 extension (EIP-3085/3326): the requested chain has not been
/// added to the wallet yet.
pub const CODE_UNRECOGNIZED_CHAIN: i64 = 4902;

/// Raw failure reported by a wallet provider.
///
/// Structured kinds are used where the provider itself knows the cause;
/// everything else keeps the original payload text so the classifier in
/// [`crate::classify`] can inspect it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// No usable wallet provider exists in this environment.
    #[error("no wallet provider is available")]
    Unavailable,
    /// The user declined the prompt.
    #[error("user rejected the request")]
    Rejected,
    /// The wallet does not know the requested chain.
    #[error("chain {0} has not been added to the wallet")]
    UnrecognizedChain(ChainId),
    /// A JSON-RPC error response.
    #[error("provider error {code}: {message}")]
    Rpc {
        /// JSON-RPC / EIP-1193 error code.
        code: i64,
        /// Error message as reported by the provider.
        message: String,
    },
    /// The call or transaction reverted on-chain.
    #[error("execution reverted: {message}")]
    Revert {
        /// Revert reason, possibly empty.
        message: String,
    },
    /// The provider endpoint could not be reached.
    #[error("transport error: {message}")]
    Transport {
        /// Transport-level failure description.
        message: String,
    },
}

impl ProviderError {
    /// Creates an RPC error from a code and message.
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Creates a revert error from a reason string.
    pub fn revert(message: impl Into<String>) -> Self {
        Self::Revert {
            message: message.into(),
        }
    }

    /// Creates a transport error from a description.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Boundary trait over the injected wallet provider.
///
/// All operations are fallible and asynchronous; implementations must not
/// panic on provider absence but report [`ProviderError::Unavailable`].
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the user has already authorized, without prompting.
    async fn authorized_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Requests account access, prompting the user if necessary.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Asks the wallet to switch to the given chain.
    async fn switch_chain(&self, chain_id: ChainId) -> Result<(), ProviderError>;

    /// Asks the wallet to add a network it does not know yet.
    async fn add_chain(&self, profile: &NetworkProfile) -> Result<(), ProviderError>;

    /// Reads `ownerOf(token_id)` on the given contract.
    async fn owner_of(&self, contract: Address, token_id: U256) -> Result<Address, ProviderError>;

    /// Reads `getApproved(token_id)` on the given contract.
    async fn get_approved(
        &self,
        contract: Address,
        token_id: U256,
    ) -> Result<Address, ProviderError>;

    /// Submits a state-changing call signed by `from` and returns the
    /// transaction hash without waiting for it to be mined.
    async fn submit(
        &self,
        contract: Address,
        from: Address,
        call: &MutatingCall,
    ) -> Result<TxHash, ProviderError>;

    /// Awaits on-chain confirmation of a previously submitted transaction.
    async fn confirm(&self, tx: TxHash) -> Result<(), ProviderError>;
}
