//! End-to-end reads over the alloy HTTP transport against a mocked
//! JSON-RPC endpoint.

use alloy_primitives::{Address, U256, address, b256};
use alloy_signer_local::PrivateKeySigner;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use nftctl::call::{CallRequest, CallResult, Erc721Function};
use nftctl::chain::ChainId;
use nftctl::controller::Controller;
use nftctl::error::ClassifiedError;
use nftctl::networks::{NetworkProfile, NetworkRegistry};
use nftctl::provider::WalletProvider;
use nftctl_evm::EvmWalletProvider;

const CONTRACT: &str = "0x239993F94E2C20dD8568a40b6D45Df5c3375cf02";
const OWNER: Address = address!("e7cbdd4E7fa9A11E60D6F5590aFD75265245B054");

/// Answers every JSON-RPC request with a fixed result, echoing the id.
struct RpcResponder {
    result: Value,
}

impl Respond for RpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or(json!(1));
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": self.result,
        }))
    }
}

/// Answers every JSON-RPC request with an error, echoing the id.
struct RpcErrorResponder {
    code: i64,
    message: &'static str,
}

impl Respond for RpcErrorResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or(json!(1));
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": self.code, "message": self.message },
        }))
    }
}

fn signer() -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&b256!(
        "0000000000000000000000000000000000000000000000000000000000000001"
    ))
    .unwrap()
}

fn local_profile(rpc: &str) -> NetworkProfile {
    NetworkProfile {
        key: "local".to_owned(),
        chain_id: ChainId::new(31_337),
        display_name: "Local Devnet".to_owned(),
        currency_symbol: "ETH".to_owned(),
        rpc_urls: vec![Url::parse(rpc).unwrap()],
        explorer_urls: vec![],
        required_minter: None,
        default_transfer_from: None,
    }
}

fn controller_for(server_uri: &str) -> Controller<EvmWalletProvider> {
    let profile = local_profile(server_uri);
    let provider = EvmWalletProvider::new(signer(), std::slice::from_ref(&profile), 30).unwrap();
    Controller::new(provider, NetworkRegistry::new(vec![profile]).unwrap())
}

/// 32-byte ABI encoding of an address return value.
fn abi_address(address: Address) -> String {
    format!("0x000000000000000000000000{address:x}")
}

#[tokio::test]
async fn owner_of_decodes_an_address_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(RpcResponder {
            result: json!(abi_address(OWNER)),
        })
        .mount(&server)
        .await;

    let ctl = controller_for(&server.uri());
    let result = ctl
        .dispatch(CallRequest::new(CONTRACT, Erc721Function::OwnerOf, ["7"]))
        .await;
    assert_eq!(
        result,
        CallResult::Read {
            value: OWNER.to_string()
        }
    );
}

#[tokio::test]
async fn a_reverted_probe_reads_as_token_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(RpcErrorResponder {
            code: 3,
            message: "execution reverted: ERC721: invalid token ID",
        })
        .mount(&server)
        .await;

    let ctl = controller_for(&server.uri());
    let result = ctl
        .dispatch(CallRequest::new(
            CONTRACT,
            Erc721Function::GetApproved,
            ["999"],
        ))
        .await;
    assert_eq!(
        result,
        CallResult::Failed {
            error: ClassifiedError::TokenNotFound {
                token_id: U256::from(999)
            }
        }
    );
}

#[tokio::test]
async fn owner_of_goes_through_the_provider_directly() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(RpcResponder {
            result: json!(abi_address(OWNER)),
        })
        .mount(&server)
        .await;

    let profile = local_profile(&server.uri());
    let provider = EvmWalletProvider::new(signer(), std::slice::from_ref(&profile), 30).unwrap();
    let owner = provider
        .owner_of(CONTRACT.parse().unwrap(), U256::from(7))
        .await
        .unwrap();
    assert_eq!(owner, OWNER);
}

#[tokio::test]
async fn an_unreachable_endpoint_reads_as_contract_unreachable() {
    // grab a port that nothing listens on anymore
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let ctl = controller_for(&uri);
    let result = ctl
        .dispatch(CallRequest::new(CONTRACT, Erc721Function::OwnerOf, ["1"]))
        .await;
    assert_eq!(
        result,
        CallResult::Failed {
            error: ClassifiedError::ContractUnreachable
        }
    );
}
