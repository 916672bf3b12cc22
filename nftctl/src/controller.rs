//! The wallet/network session and contract-call controller.
//!
//! One [`Controller`] owns the session, the network registry, and the
//! per-function result slots. Hosts hold it behind an `Arc`, render the
//! state it exposes, and feed operator intent into its operations; there is
//! no ambient singleton. All methods take `&self` and suspend only at
//! provider I/O, so overlapping dispatches are allowed: each function
//! identifier keeps exactly one result slot and overlapping calls resolve
//! last-write-wins. A submitted transaction cannot be retracted;
//! re-dispatching the same function starts an independent flow rather than
//! cancelling the old one.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use tokio::sync::RwLock;

use crate::call::{CallRequest, CallResult, CheckedCall, Erc721Function};
use crate::classify::{classify, classify_connect};
use crate::error::ClassifiedError;
use crate::hooks::{ConsoleHooks, NoHooks, Notice};
use crate::networks::{NetworkProfile, NetworkRegistry};
use crate::provider::{CODE_UNRECOGNIZED_CHAIN, ProviderError, WalletProvider};
use crate::session::{SessionState, WalletSession};

/// The console controller.
pub struct Controller<P> {
    provider: P,
    registry: NetworkRegistry,
    hooks: Arc<dyn ConsoleHooks>,
    session: RwLock<WalletSession>,
    results: RwLock<HashMap<Erc721Function, CallResult>>,
}

impl<P: std::fmt::Debug> std::fmt::Debug for Controller<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("provider", &self.provider)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<P: WalletProvider> Controller<P> {
    /// Creates a controller over `provider` with the first registry profile
    /// as the active network.
    pub fn new(provider: P, registry: NetworkRegistry) -> Self {
        let default_network = registry
            .profiles()
            .first()
            .map(|p| p.key.clone())
            .unwrap_or_default();
        Self {
            provider,
            registry,
            hooks: Arc::new(NoHooks),
            session: RwLock::new(WalletSession::new(default_network)),
            results: RwLock::new(HashMap::new()),
        }
    }

    /// Installs presentation hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn ConsoleHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// The network registry this controller serves.
    #[must_use]
    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> WalletSession {
        self.session.read().await.clone()
    }

    /// Current connection state.
    pub async fn session_state(&self) -> SessionState {
        self.session.read().await.state()
    }

    /// Connected account, if any.
    pub async fn account(&self) -> Option<Address> {
        self.session.read().await.account()
    }

    /// Profile of the active network.
    pub async fn active_network(&self) -> Option<NetworkProfile> {
        let key = self.session.read().await.network().to_owned();
        self.registry.get(&key).ok().cloned()
    }

    /// Snapshot of the per-function result slots.
    pub async fn results(&self) -> HashMap<Erc721Function, CallResult> {
        self.results.read().await.clone()
    }

    /// The remembered result for one function, if any call ran.
    pub async fn result_of(&self, function: Erc721Function) -> Option<CallResult> {
        self.results.read().await.get(&function).cloned()
    }

    /// Reconnects a session the provider has already authorized, without
    /// prompting. Intended for startup; probe failures are logged and leave
    /// the session disconnected.
    pub async fn restore_if_already_authorized(&self) -> Option<Address> {
        match self.provider.authorized_accounts().await {
            Ok(accounts) => {
                let account = *accounts.first()?;
                self.session.write().await.connected(account);
                tracing::info!(%account, "restored wallet session");
                Some(account)
            }
            Err(err) => {
                tracing::debug!(%err, "wallet probe failed during startup");
                None
            }
        }
    }

    /// Requests account access from the provider, prompting the user.
    ///
    /// # Errors
    ///
    /// Fails with [`ClassifiedError::WalletUnavailable`] when no provider
    /// exists and [`ClassifiedError::UserRejected`] when the prompt is
    /// declined; the session is left as it was.
    pub async fn connect(&self) -> Result<Address, ClassifiedError> {
        let prior = self.session.read().await.clone();
        self.session.write().await.begin_connecting();
        let outcome = self.provider.request_accounts().await;
        match outcome {
            Ok(accounts) if !accounts.is_empty() => {
                let account = accounts[0];
                self.session.write().await.connected(account);
                tracing::info!(%account, "wallet connected");
                self.hooks.on_notice(&Notice::success(format!(
                    "Connected to {}",
                    short_address(account)
                )));
                Ok(account)
            }
            Ok(_) => {
                // zero accounts from the provider means no authorization
                self.session.write().await.reset();
                self.fail_connect(ClassifiedError::UserRejected)
            }
            Err(err) => {
                *self.session.write().await = prior;
                self.fail_connect(classify_connect(&err))
            }
        }
    }

    fn fail_connect(&self, error: ClassifiedError) -> Result<Address, ClassifiedError> {
        tracing::warn!(%error, "wallet connect failed");
        self.hooks.on_notice(&Notice::error(error.to_string()));
        Err(error)
    }

    /// Clears the session and the result slots. A pure local reset; the
    /// provider has no revocation primitive to call.
    pub async fn disconnect(&self) {
        self.session.write().await.reset();
        self.results.write().await.clear();
        tracing::info!("wallet disconnected");
        self.hooks
            .on_notice(&Notice::success("Disconnected from wallet"));
    }

    /// Makes `key` the active network and asks the wallet to switch to its
    /// chain, adding the chain first if the wallet does not know it.
    ///
    /// The add-then-switch retry happens at most once. Any other provider
    /// failure during the switch is logged and non-fatal: the console stays
    /// usable and later calls surface provider-level failures themselves.
    ///
    /// # Errors
    ///
    /// Fails only with [`ClassifiedError::UnknownNetwork`] for a key that is
    /// not in the registry.
    pub async fn select_network(&self, key: &str) -> Result<(), ClassifiedError> {
        let profile = self.registry.get(key)?.clone();
        match self.provider.switch_chain(profile.chain_id).await {
            Ok(()) => {}
            Err(
                ProviderError::UnrecognizedChain(_)
                | ProviderError::Rpc {
                    code: CODE_UNRECOGNIZED_CHAIN,
                    ..
                },
            ) => {
                if let Err(err) = self.provider.add_chain(&profile).await {
                    tracing::warn!(network = %profile.key, %err, "adding network to wallet failed");
                } else if let Err(err) = self.provider.switch_chain(profile.chain_id).await {
                    tracing::warn!(network = %profile.key, %err, "network switch failed after add");
                }
            }
            Err(err) => {
                tracing::warn!(network = %profile.key, %err, "network switch failed");
            }
        }
        self.session.write().await.set_network(&profile.key);
        tracing::info!(network = %profile.key, chain = %profile.chain_id, "network selected");
        Ok(())
    }

    /// Validates and dispatches one contract call, recording the outcome in
    /// the function's result slot.
    ///
    /// Local validation and the authorization check run before any provider
    /// traffic; `transferFrom`, `approve` and `getApproved` then get an
    /// `ownerOf` pre-flight probe so a call against a nonexistent token
    /// never submits a transaction. Every failure lands in the slot as
    /// [`CallResult::Failed`] with exactly one error notice; no failure
    /// disturbs the session or the registry.
    pub async fn dispatch(&self, request: CallRequest) -> CallResult {
        let function = request.function;
        tracing::info!(%function, contract = %request.contract, "dispatching contract call");
        let result = match self.run_call(&request).await {
            Ok(result) => {
                self.hooks.on_notice(&Notice::success(format!(
                    "{function} executed successfully"
                )));
                result
            }
            Err(error) => {
                tracing::warn!(%function, %error, "contract call failed");
                self.hooks.on_notice(&Notice::error(error.to_string()));
                CallResult::Failed { error }
            }
        };
        self.store(function, result.clone()).await;
        result
    }

    async fn run_call(&self, request: &CallRequest) -> Result<CallResult, ClassifiedError> {
        let function = request.function;
        let (contract, call) = request.check()?;
        let session = self.session.read().await.clone();
        let profile = self.registry.get(session.network())?.clone();
        let network = profile.display_name.as_str();

        if function.is_mutating() && !session.is_authorized_for(function, &profile) {
            let required = match function {
                Erc721Function::Mint => profile.required_minter,
                _ => None,
            };
            return Err(ClassifiedError::Unauthorized { required });
        }

        if function.needs_existing_token()
            && let Err(err) = self.provider.owner_of(contract, call.token_id()).await
        {
            // a reverted probe means the token was never minted; transport
            // noise keeps its own classification
            return Err(classify(&err, Erc721Function::OwnerOf, &call, network));
        }

        match call.mutating() {
            Some(mutating) => {
                let Some(from) = session.account() else {
                    return Err(ClassifiedError::Unauthorized { required: None });
                };
                let tx = self
                    .provider
                    .submit(contract, from, &mutating)
                    .await
                    .map_err(|e| classify(&e, function, &call, network))?;
                tracing::info!(%function, %tx, "transaction submitted");
                self.store(function, CallResult::Pending { tx }).await;
                self.provider
                    .confirm(tx)
                    .await
                    .map_err(|e| classify(&e, function, &call, network))?;
                tracing::info!(%function, %tx, "transaction confirmed");
                Ok(CallResult::Confirmed { tx })
            }
            None => {
                let value = match call {
                    CheckedCall::GetApproved { token_id } => {
                        self.provider.get_approved(contract, token_id).await
                    }
                    _ => self.provider.owner_of(contract, call.token_id()).await,
                }
                .map_err(|e| classify(&e, function, &call, network))?;
                Ok(CallResult::Read {
                    value: value.to_string(),
                })
            }
        }
    }

    async fn store(&self, function: Erc721Function, result: CallResult) {
        self.hooks.on_result(function, &result);
        self.results.write().await.insert(function, result);
    }
}

/// Abbreviates an address for notices, `0x1234...abcd` style.
fn short_address(address: Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
