//! Lowering of alloy error types into the core provider error.
//!
//! The controller's classifier works on [`ProviderError`], which keeps the
//! original payload text. These functions flatten the alloy error enums into
//! that shape without losing the code or message. They are free functions
//! rather than `From` impls because both types live in other crates.

use alloy_contract::Error as ContractError;
use alloy_json_rpc::RpcError;
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;

use nftctl::provider::{CODE_USER_REJECTED, ProviderError};

/// Lowers a JSON-RPC transport error.
pub(crate) fn lower_transport(err: TransportError) -> ProviderError {
    match err {
        RpcError::ErrorResp(payload) => {
            if payload.code == CODE_USER_REJECTED {
                ProviderError::Rejected
            } else {
                ProviderError::rpc(payload.code, payload.message.into_owned())
            }
        }
        RpcError::Transport(kind) => ProviderError::transport(kind.to_string()),
        other => ProviderError::transport(other.to_string()),
    }
}

/// Lowers a contract-call error, keeping revert payloads intact.
pub(crate) fn lower_contract(err: ContractError) -> ProviderError {
    match err {
        ContractError::TransportError(err) => lower_transport(err),
        ContractError::PendingTransactionError(err) => lower_pending(err),
        other => ProviderError::transport(other.to_string()),
    }
}

/// Lowers a receipt-watching error.
pub(crate) fn lower_pending(err: PendingTransactionError) -> ProviderError {
    match err {
        PendingTransactionError::TransportError(err) => lower_transport(err),
        other => ProviderError::transport(other.to_string()),
    }
}
