//! Contract-call value objects and local validation.
//!
//! A [`CallRequest`] carries the operator's raw input: the contract address
//! and arguments exactly as typed. [`CallRequest::check`] turns it into a
//! typed [`CheckedCall`] or fails with a local [`ClassifiedError`] before
//! any network traffic happens. [`CallResult`] is the per-function outcome
//! slot the presentation layer renders.

use std::fmt;

use alloy_primitives::{Address, TxHash, U256};
use serde::Serialize;

use crate::error::ClassifiedError;

/// The fixed set of ERC721 functions the console dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Erc721Function {
    /// `mint(address,uint256)`
    Mint,
    /// `transferFrom(address,address,uint256)`
    TransferFrom,
    /// `approve(address,uint256)`
    Approve,
    /// `ownerOf(uint256)`
    OwnerOf,
    /// `getApproved(uint256)`
    GetApproved,
}

impl Erc721Function {
    /// All dispatchable functions, in display order.
    pub const ALL: [Self; 5] = [
        Self::Mint,
        Self::TransferFrom,
        Self::Approve,
        Self::OwnerOf,
        Self::GetApproved,
    ];

    /// The Solidity-style name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mint => "mint",
            Self::TransferFrom => "transferFrom",
            Self::Approve => "approve",
            Self::OwnerOf => "ownerOf",
            Self::GetApproved => "getApproved",
        }
    }

    /// Whether dispatching this function submits a transaction.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::Mint | Self::TransferFrom | Self::Approve)
    }

    /// Whether this function only makes sense for an existing token and
    /// therefore gets an `ownerOf` pre-flight probe.
    #[must_use]
    pub const fn needs_existing_token(self) -> bool {
        matches!(self, Self::TransferFrom | Self::Approve | Self::GetApproved)
    }
}

impl fmt::Display for Erc721Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contract invocation as described by the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Target contract address, raw as typed.
    pub contract: String,
    /// Which function to invoke.
    pub function: Erc721Function,
    /// Ordered raw arguments (addresses and/or decimal token ids).
    pub args: Vec<String>,
}

impl CallRequest {
    /// Builds a request from raw operator input.
    pub fn new<I, S>(contract: impl Into<String>, function: Erc721Function, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contract: contract.into(),
            function,
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates the request locally, with no provider round-trip.
    ///
    /// # Errors
    ///
    /// Fails with [`ClassifiedError::InvalidContractAddress`] or
    /// [`ClassifiedError::InvalidArgument`] naming the offending field.
    pub fn check(&self) -> Result<(Address, CheckedCall), ClassifiedError> {
        let contract: Address = self
            .contract
            .trim()
            .parse()
            .map_err(|_| ClassifiedError::InvalidContractAddress)?;

        let call = match self.function {
            Erc721Function::Mint => {
                expect_args(&self.args, 2)?;
                CheckedCall::Mint {
                    to: parse_address(&self.args[0], "to address")?,
                    token_id: parse_token_id(&self.args[1])?,
                }
            }
            Erc721Function::TransferFrom => {
                expect_args(&self.args, 3)?;
                CheckedCall::TransferFrom {
                    from: parse_address(&self.args[0], "from address")?,
                    to: parse_address(&self.args[1], "to address")?,
                    token_id: parse_token_id(&self.args[2])?,
                }
            }
            Erc721Function::Approve => {
                expect_args(&self.args, 2)?;
                CheckedCall::Approve {
                    to: parse_address(&self.args[0], "to address")?,
                    token_id: parse_token_id(&self.args[1])?,
                }
            }
            Erc721Function::OwnerOf => {
                expect_args(&self.args, 1)?;
                CheckedCall::OwnerOf {
                    token_id: parse_token_id(&self.args[0])?,
                }
            }
            Erc721Function::GetApproved => {
                expect_args(&self.args, 1)?;
                CheckedCall::GetApproved {
                    token_id: parse_token_id(&self.args[0])?,
                }
            }
        };
        Ok((contract, call))
    }
}

fn expect_args(args: &[String], n: usize) -> Result<(), ClassifiedError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(ClassifiedError::InvalidArgument {
            field: "argument count".to_owned(),
        })
    }
}

fn parse_address(raw: &str, field: &str) -> Result<Address, ClassifiedError> {
    raw.trim().parse().map_err(|_| ClassifiedError::InvalidArgument {
        field: field.to_owned(),
    })
}

/// Token ids are accepted as non-negative decimal strings only.
fn parse_token_id(raw: &str) -> Result<U256, ClassifiedError> {
    let raw = raw.trim();
    let invalid = || ClassifiedError::InvalidArgument {
        field: "token id".to_owned(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(raw, 10).map_err(|_| invalid())
}

/// A validated call with typed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckedCall {
    /// `mint(to, tokenId)`
    Mint {
        /// Recipient of the newly minted token.
        to: Address,
        /// Token to mint.
        token_id: U256,
    },
    /// `transferFrom(from, to, tokenId)`
    TransferFrom {
        /// Current holder the token moves away from.
        from: Address,
        /// Recipient.
        to: Address,
        /// Token to transfer.
        token_id: U256,
    },
    /// `approve(to, tokenId)`
    Approve {
        /// Address being approved.
        to: Address,
        /// Token the approval covers.
        token_id: U256,
    },
    /// `ownerOf(tokenId)`
    OwnerOf {
        /// Token to look up.
        token_id: U256,
    },
    /// `getApproved(tokenId)`
    GetApproved {
        /// Token to look up.
        token_id: U256,
    },
}

impl CheckedCall {
    /// The token id every variant carries.
    #[must_use]
    pub const fn token_id(&self) -> U256 {
        match self {
            Self::Mint { token_id, .. }
            | Self::TransferFrom { token_id, .. }
            | Self::Approve { token_id, .. }
            | Self::OwnerOf { token_id }
            | Self::GetApproved { token_id } => *token_id,
        }
    }

    /// The state-changing form of this call, if it has one.
    #[must_use]
    pub const fn mutating(&self) -> Option<MutatingCall> {
        match self {
            Self::Mint { to, token_id } => Some(MutatingCall::Mint {
                to: *to,
                token_id: *token_id,
            }),
            Self::TransferFrom { from, to, token_id } => Some(MutatingCall::TransferFrom {
                from: *from,
                to: *to,
                token_id: *token_id,
            }),
            Self::Approve { to, token_id } => Some(MutatingCall::Approve {
                to: *to,
                token_id: *token_id,
            }),
            Self::OwnerOf { .. } | Self::GetApproved { .. } => None,
        }
    }
}

/// A state-changing ERC721 call, ready for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutatingCall {
    /// `mint(to, tokenId)`
    Mint {
        /// Recipient of the newly minted token.
        to: Address,
        /// Token to mint.
        token_id: U256,
    },
    /// `transferFrom(from, to, tokenId)`
    TransferFrom {
        /// Current holder.
        from: Address,
        /// Recipient.
        to: Address,
        /// Token to transfer.
        token_id: U256,
    },
    /// `approve(to, tokenId)`
    Approve {
        /// Address being approved.
        to: Address,
        /// Token the approval covers.
        token_id: U256,
    },
}

/// Outcome of the most recent call per function identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CallResult {
    /// Submitted, confirmation outstanding.
    Pending {
        /// Transaction hash.
        tx: TxHash,
    },
    /// Mined and confirmed.
    Confirmed {
        /// Transaction hash.
        tx: TxHash,
    },
    /// A read call completed.
    Read {
        /// Rendered return value (e.g. a checksummed address).
        value: String,
    },
    /// The call failed; the error has been classified.
    Failed {
        /// Classified, user-facing error.
        error: ClassifiedError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const CONTRACT: &str = "0x239993F94E2C20dD8568a40b6D45Df5c3375cf02";

    #[test]
    fn checks_a_mint_request() {
        let request = CallRequest::new(
            CONTRACT,
            Erc721Function::Mint,
            ["0xe7cbdd4E7fa9A11E60D6F5590aFD75265245B054", "7"],
        );
        let (contract, call) = request.check().unwrap();
        assert_eq!(contract, address!("239993F94E2C20dD8568a40b6D45Df5c3375cf02"));
        assert_eq!(
            call,
            CheckedCall::Mint {
                to: address!("e7cbdd4E7fa9A11E60D6F5590aFD75265245B054"),
                token_id: U256::from(7),
            }
        );
    }

    #[test]
    fn checks_a_transfer_request() {
        let request = CallRequest::new(
            CONTRACT,
            Erc721Function::TransferFrom,
            [
                "0xe7cbdd4E7fa9A11E60D6F5590aFD75265245B054",
                "0x1111111111111111111111111111111111111111",
                "3",
            ],
        );
        let (_, call) = request.check().unwrap();
        assert!(matches!(call, CheckedCall::TransferFrom { token_id, .. } if token_id == U256::from(3)));
    }

    #[test]
    fn trims_whitespace_before_parsing() {
        let request = CallRequest::new(
            format!("  {CONTRACT} "),
            Erc721Function::OwnerOf,
            [" 42 "],
        );
        let (_, call) = request.check().unwrap();
        assert_eq!(call.token_id(), U256::from(42));
    }

    #[test]
    fn rejects_a_bad_contract_address() {
        for contract in ["", "0x1234", "not-an-address"] {
            let request = CallRequest::new(contract, Erc721Function::OwnerOf, ["1"]);
            assert_eq!(
                request.check().unwrap_err(),
                ClassifiedError::InvalidContractAddress
            );
        }
    }

    #[test]
    fn rejects_bad_token_ids() {
        for token_id in ["", "-1", "1.5", "0x10", "seven", "1 2"] {
            let request = CallRequest::new(CONTRACT, Erc721Function::OwnerOf, [token_id]);
            let err = request.check().unwrap_err();
            assert!(
                matches!(err, ClassifiedError::InvalidArgument { ref field } if field == "token id"),
                "{token_id:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn rejects_an_overflowing_token_id() {
        let request = CallRequest::new(CONTRACT, Erc721Function::OwnerOf, ["9".repeat(80)]);
        assert!(matches!(
            request.check().unwrap_err(),
            ClassifiedError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn rejects_a_bad_recipient() {
        let request = CallRequest::new(CONTRACT, Erc721Function::Mint, ["nope", "1"]);
        assert!(
            matches!(request.check().unwrap_err(), ClassifiedError::InvalidArgument { ref field } if field == "to address")
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let request = CallRequest::new(CONTRACT, Erc721Function::Mint, ["1"]);
        assert!(matches!(
            request.check().unwrap_err(),
            ClassifiedError::InvalidArgument { .. }
        ));
        let request = CallRequest::new(
            CONTRACT,
            Erc721Function::OwnerOf,
            ["1", "2"],
        );
        assert!(request.check().is_err());
    }

    #[test]
    fn mutating_form_exists_only_for_writes() {
        let (_, read) = CallRequest::new(CONTRACT, Erc721Function::GetApproved, ["1"])
            .check()
            .unwrap();
        assert!(read.mutating().is_none());
        let (_, write) = CallRequest::new(
            CONTRACT,
            Erc721Function::Approve,
            ["0x1111111111111111111111111111111111111111", "1"],
        )
        .check()
        .unwrap();
        assert!(write.mutating().is_some());
    }

    #[test]
    fn function_names_match_the_contract_surface() {
        let names: Vec<_> = Erc721Function::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            names,
            ["mint", "transferFrom", "approve", "ownerOf", "getApproved"]
        );
    }
}
