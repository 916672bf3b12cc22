//! The closed error taxonomy surfaced to operators.
//!
//! Every failure an operator can see is one of these kinds. Validation and
//! authorization produce them directly; provider and contract failures are
//! mapped onto them by [`crate::classify`]. The `Display` rendering is the
//! exact text the presentation layer shows.

use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::networks::UnknownNetworkError;

/// Upper bound on rendered text taken from raw provider payloads.
pub const MAX_RAW_MESSAGE_CHARS: usize = 200;

/// A classified, user-facing failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(into = "String")]
pub enum ClassifiedError {
    /// No wallet provider exists in this environment.
    #[error("No wallet provider detected. Install a wallet extension to continue.")]
    WalletUnavailable,
    /// The user declined the prompt or transaction.
    #[error("Transaction cancelled by user")]
    UserRejected,
    /// The requested network key is not in the registry.
    #[error("Unknown network {0:?}")]
    UnknownNetwork(String),
    /// The contract address field is missing or malformed.
    #[error("Enter a valid ERC721 contract address")]
    InvalidContractAddress,
    /// A call argument is missing or malformed.
    #[error("Invalid value for {field}")]
    InvalidArgument {
        /// The offending form field.
        field: String,
    },
    /// The connected wallet may not perform this operation.
    #[error("{}", unauthorized_message(.required))]
    Unauthorized {
        /// The wallet the active network requires, when it names one.
        required: Option<Address>,
    },
    /// The referenced token has not been minted.
    #[error("Token #{token_id} does not exist on this contract")]
    TokenNotFound {
        /// The token id that failed the existence check.
        token_id: U256,
    },
    /// The wallet is not approved to move the token.
    #[error("The connected wallet is not approved to transfer this token")]
    NotApproved,
    /// Ownership mismatch for a transfer or approval.
    #[error("{}", not_owner_message(.claimed, .token_id))]
    NotOwner {
        /// The address that claimed ownership, when known.
        claimed: Option<Address>,
        /// The token in question.
        token_id: U256,
    },
    /// The token id has already been minted.
    #[error("Token #{token_id} is already minted")]
    AlreadyMinted {
        /// The duplicate token id.
        token_id: U256,
    },
    /// A mint reverted for an unrecognized reason.
    #[error("Mint failed for token #{token_id}")]
    MintFailed {
        /// The token id of the attempted mint.
        token_id: U256,
    },
    /// A transfer reverted for an unrecognized reason.
    #[error("Transfer failed for token #{token_id}")]
    TransferFailed {
        /// The token id of the attempted transfer.
        token_id: U256,
    },
    /// An approval reverted for an unrecognized reason.
    #[error("Approval failed for token #{token_id}")]
    ApproveFailed {
        /// The token id of the attempted approval.
        token_id: U256,
    },
    /// The wallet is on a different chain than the console.
    #[error("Wrong network: please switch to {expected}")]
    NetworkMismatch {
        /// Display name of the network the console expects.
        expected: String,
    },
    /// The account cannot cover gas for the transaction.
    #[error("Insufficient funds for gas")]
    InsufficientFunds,
    /// The RPC endpoint or the contract could not be reached.
    #[error("Could not connect to the contract. Check the address and network.")]
    ContractUnreachable,
    /// Nothing matched; the raw message is passed through, bounded.
    #[error("{0}")]
    Unclassified(String),
}

impl ClassifiedError {
    /// Wraps a raw provider message, truncating it so the UI never renders
    /// an unbounded error blob.
    #[must_use]
    pub fn unclassified(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::Unclassified("Unknown provider error".to_owned());
        }
        if raw.chars().count() > MAX_RAW_MESSAGE_CHARS {
            let mut truncated: String = raw.chars().take(MAX_RAW_MESSAGE_CHARS).collect();
            truncated.push('…');
            return Self::Unclassified(truncated);
        }
        Self::Unclassified(raw.to_owned())
    }
}

fn unauthorized_message(required: &Option<Address>) -> String {
    match required {
        Some(required) => format!("Minting requires connection to wallet {required}"),
        None => "Connect an authorized wallet to use this operation".to_owned(),
    }
}

fn not_owner_message(claimed: &Option<Address>, token_id: &U256) -> String {
    match claimed {
        Some(claimed) => format!("{claimed} does not own token #{token_id}"),
        None => format!("The connected wallet does not own token #{token_id}"),
    }
}

impl From<ClassifiedError> for String {
    fn from(err: ClassifiedError) -> Self {
        err.to_string()
    }
}

impl From<UnknownNetworkError> for ClassifiedError {
    fn from(err: UnknownNetworkError) -> Self {
        Self::UnknownNetwork(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn unauthorized_names_the_required_wallet() {
        let err = ClassifiedError::Unauthorized {
            required: Some(address!("B9d5c93ec9abA93180ddD00a628e8FAcc3103039")),
        };
        assert_eq!(
            err.to_string(),
            "Minting requires connection to wallet 0xB9d5c93ec9abA93180ddD00a628e8FAcc3103039"
        );
    }

    #[test]
    fn token_not_found_names_the_token() {
        let err = ClassifiedError::TokenNotFound {
            token_id: U256::from(999),
        };
        assert_eq!(err.to_string(), "Token #999 does not exist on this contract");
    }

    #[test]
    fn not_owner_names_the_claimant_and_token() {
        let err = ClassifiedError::NotOwner {
            claimed: Some(address!("e7cbdd4E7fa9A11E60D6F5590aFD75265245B054")),
            token_id: U256::from(3),
        };
        let text = err.to_string();
        assert!(text.contains("0xe7cbdd4E7fa9A11E60D6F5590aFD75265245B054"));
        assert!(text.contains("token #3"));
    }

    #[test]
    fn unclassified_is_bounded_and_non_empty() {
        let long = "x".repeat(5000);
        let ClassifiedError::Unclassified(text) = ClassifiedError::unclassified(&long) else {
            panic!("expected unclassified");
        };
        assert_eq!(text.chars().count(), MAX_RAW_MESSAGE_CHARS + 1);
        assert!(text.ends_with('…'));

        let empty = ClassifiedError::unclassified("   ");
        assert!(!empty.to_string().is_empty());
    }

    #[test]
    fn serializes_as_its_message() {
        let err = ClassifiedError::InsufficientFunds;
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            "\"Insufficient funds for gas\""
        );
    }
}
