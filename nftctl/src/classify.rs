//! Best-effort classification of raw provider failures.
//!
//! Providers and contracts report failures as loosely structured payloads
//! whose wording drifts between wallet and node versions. This module maps
//! them onto the closed [`ClassifiedError`] taxonomy: structured kinds are
//! matched first, then case-insensitive substring tables over the payload
//! text. The tables are module constants, so supporting a new provider
//! wording is a data change, not a new conditional at a call site.
//!
//! [`classify`] is total and pure: any error-shaped input produces a
//! non-empty, bounded message, and nothing here performs I/O or panics.

use alloy_primitives::Address;

use crate::call::{CheckedCall, Erc721Function};
use crate::error::ClassifiedError;
use crate::provider::{CODE_USER_REJECTED, ProviderError};

/// Wordings that indicate an on-chain revert.
const REVERT_MARKERS: &[&str] = &["execution reverted", "revert", "vm exception"];

/// Transfer reverts caused by a missing approval. Checked before
/// [`NOT_OWNER_MARKERS`]: OpenZeppelin's "caller is not owner nor approved"
/// would otherwise match the ownership table.
const NOT_APPROVED_MARKERS: &[&str] = &[
    "not approved",
    "caller is not owner nor approved",
    "caller is not token owner or approved",
];

/// Reverts caused by an ownership mismatch.
const NOT_OWNER_MARKERS: &[&str] = &[
    "incorrect owner",
    "transfer of token that is not own",
    "not the owner",
    "caller is not owner",
];

/// Mint reverts for an id that already exists.
const ALREADY_MINTED_MARKERS: &[&str] = &["already minted", "token already exists"];

/// Mint reverts caused by caller restrictions on the contract.
const UNAUTHORIZED_MINT_MARKERS: &[&str] = &[
    "caller is not the owner",
    "not authorized",
    "unauthorized",
    "accesscontrol",
];

/// The wallet and the console disagree about the active chain.
const NETWORK_MISMATCH_MARKERS: &[&str] = &[
    "network changed",
    "underlying network changed",
    "chain mismatch",
    "chain id mismatch",
    "wrong chain",
];

/// The user dismissed the wallet prompt.
const CANCELLED_MARKERS: &[&str] = &[
    "user rejected",
    "user denied",
    "rejected by user",
    "user cancelled",
];

/// The account cannot cover gas.
const INSUFFICIENT_FUNDS_MARKERS: &[&str] = &["insufficient funds", "insufficient balance"];

/// The endpoint or contract could not be reached at all.
const UNREACHABLE_MARKERS: &[&str] = &[
    "could not detect network",
    "connection refused",
    "failed to fetch",
    "timed out",
    "timeout",
    "network is unreachable",
    "missing response",
];

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}

/// Maps a raw provider failure onto the taxonomy.
///
/// `function` is the operation the operator attempted (pre-flight probe
/// failures are classified as [`Erc721Function::OwnerOf`]), `call` supplies
/// the argument values named in messages, and `active_network` is the
/// display name of the network the console believes is active.
#[must_use]
pub fn classify(
    raw: &ProviderError,
    function: Erc721Function,
    call: &CheckedCall,
    active_network: &str,
) -> ClassifiedError {
    match raw {
        ProviderError::Unavailable => return ClassifiedError::WalletUnavailable,
        ProviderError::Rejected => return ClassifiedError::UserRejected,
        ProviderError::Rpc { code, .. } if *code == CODE_USER_REJECTED => {
            return ClassifiedError::UserRejected;
        }
        ProviderError::UnrecognizedChain(_) => {
            return ClassifiedError::NetworkMismatch {
                expected: active_network.to_owned(),
            };
        }
        _ => {}
    }

    let payload = raw.to_string();
    let haystack = payload.to_lowercase();

    if matches!(raw, ProviderError::Revert { .. }) || contains_any(&haystack, REVERT_MARKERS) {
        return classify_revert(function, call, &haystack);
    }
    if contains_any(&haystack, NETWORK_MISMATCH_MARKERS) {
        return ClassifiedError::NetworkMismatch {
            expected: active_network.to_owned(),
        };
    }
    if contains_any(&haystack, CANCELLED_MARKERS) {
        return ClassifiedError::UserRejected;
    }
    if contains_any(&haystack, INSUFFICIENT_FUNDS_MARKERS) {
        return ClassifiedError::InsufficientFunds;
    }
    if matches!(raw, ProviderError::Transport { .. }) || contains_any(&haystack, UNREACHABLE_MARKERS)
    {
        return ClassifiedError::ContractUnreachable;
    }
    ClassifiedError::unclassified(&payload)
}

/// Maps a failure of the connect prompt itself, where no contract call is
/// in play.
#[must_use]
pub fn classify_connect(raw: &ProviderError) -> ClassifiedError {
    match raw {
        ProviderError::Unavailable => ClassifiedError::WalletUnavailable,
        ProviderError::Rejected => ClassifiedError::UserRejected,
        ProviderError::Rpc { code, .. } if *code == CODE_USER_REJECTED => {
            ClassifiedError::UserRejected
        }
        other => {
            let payload = other.to_string();
            if contains_any(&payload.to_lowercase(), CANCELLED_MARKERS) {
                ClassifiedError::UserRejected
            } else {
                ClassifiedError::unclassified(&payload)
            }
        }
    }
}

/// Branches a revert by the attempted function.
fn classify_revert(
    function: Erc721Function,
    call: &CheckedCall,
    haystack: &str,
) -> ClassifiedError {
    let token_id = call.token_id();
    match function {
        // For lookups (and the pre-flight probe) any revert means the
        // token has never been minted.
        Erc721Function::OwnerOf | Erc721Function::GetApproved => {
            ClassifiedError::TokenNotFound { token_id }
        }
        Erc721Function::TransferFrom => {
            if contains_any(haystack, NOT_APPROVED_MARKERS) {
                ClassifiedError::NotApproved
            } else if contains_any(haystack, NOT_OWNER_MARKERS) {
                ClassifiedError::NotOwner {
                    claimed: transfer_from_address(call),
                    token_id,
                }
            } else {
                ClassifiedError::TransferFailed { token_id }
            }
        }
        Erc721Function::Approve => {
            if contains_any(haystack, NOT_OWNER_MARKERS) {
                ClassifiedError::NotOwner {
                    claimed: None,
                    token_id,
                }
            } else {
                ClassifiedError::ApproveFailed { token_id }
            }
        }
        Erc721Function::Mint => {
            if contains_any(haystack, ALREADY_MINTED_MARKERS) {
                ClassifiedError::AlreadyMinted { token_id }
            } else if contains_any(haystack, UNAUTHORIZED_MINT_MARKERS) {
                ClassifiedError::Unauthorized { required: None }
            } else {
                ClassifiedError::MintFailed { token_id }
            }
        }
    }
}

const fn transfer_from_address(call: &CheckedCall) -> Option<Address> {
    match call {
        CheckedCall::TransferFrom { from, .. } => Some(*from),
        _ => None,
    }
}
