use dioxus::prelude::*;

use atm_common::{AtmConfig, TransferInput};

use super::session_state::SessionState;

/// Actions the UI can send to the session coroutine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// Prompt the wallet for account access.
    Connect,
    /// Re-query the contract balance.
    RefreshBalance,
    /// Deposit the configured fixed amount.
    Deposit,
    /// Withdraw the configured fixed amount.
    Withdraw,
    /// Transfer with the values typed into the prompts.
    Transfer(TransferInput),
}

impl SessionAction {
    /// Status line shown while the action is in flight.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Self::Connect => "Waiting for wallet approval...",
            Self::RefreshBalance => "Fetching balance...",
            Self::Deposit => "Depositing...",
            Self::Withdraw => "Withdrawing...",
            Self::Transfer(_) => "Transferring...",
        }
    }
}

/// Get a handle to send actions to the session coroutine.
pub fn use_session_action() -> Coroutine<SessionAction> {
    use_coroutine_handle::<SessionAction>()
}

/// Start the session coroutine.
///
/// In WASM builds it owns the `SessionController`, binds `window.ethereum`
/// and processes actions one at a time. Elsewhere it is a no-op sink.
pub fn use_session_coroutine(state: Signal<SessionState>, config: AtmConfig) {
    #[cfg(target_family = "wasm")]
    {
        use_coroutine(move |rx: UnboundedReceiver<SessionAction>| {
            wasm_impl::session_loop(rx, state, config.clone())
        });
    }

    #[cfg(not(target_family = "wasm"))]
    {
        let _ = (state, config);
        tracing::warn!("not running in WASM; session actions are no-ops");
        use_coroutine(|mut rx: UnboundedReceiver<SessionAction>| async move {
            use futures::StreamExt;
            while let Some(action) = rx.next().await {
                tracing::debug!("Session action (native stub): {:?}", action);
            }
        });
    }
}

// ─── WASM implementation ────────────────────────────────────────────────────

#[cfg(target_family = "wasm")]
mod wasm_impl {
    use dioxus::prelude::*;
    use futures::StreamExt;

    use atm_common::{AtmConfig, AtmError, SessionController};

    use super::SessionAction;
    use crate::components::injected_provider::InjectedProvider;
    use crate::components::prompts::alert;
    use crate::components::session_state::SessionState;

    /// Log a message to the browser console.
    fn clog(msg: &str) {
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
    }

    /// Main session loop. Actions are handled strictly in order, so at most
    /// one wallet round-trip is outstanding.
    pub async fn session_loop(
        mut rx: UnboundedReceiver<SessionAction>,
        mut state: Signal<SessionState>,
        config: AtmConfig,
    ) {
        clog(&format!("[ATM] contract {}", config.contract_address));
        let mut controller = SessionController::new(config);
        controller.initialize(InjectedProvider::detect()).await;
        publish(&controller, &mut state, None);

        while let Some(action) = rx.next().await {
            publish(&controller, &mut state, Some(action.busy_label()));

            let result = match action {
                SessionAction::Connect => {
                    let connected = controller.request_connection().await.map(drop);
                    if connected.is_ok() {
                        controller.ensure_balance().await;
                    }
                    connected
                }
                SessionAction::RefreshBalance => controller.refresh_balance().await.map(drop),
                SessionAction::Deposit => controller.deposit().await.map(drop),
                SessionAction::Withdraw => controller.withdraw().await.map(drop),
                SessionAction::Transfer(input) => controller.transfer(input).await.map(drop),
            };

            if let Err(AtmError::NoProvider) = result {
                alert(&format!(
                    "{} wallet is required to connect",
                    controller.config().wallet_name
                ));
            }

            publish(&controller, &mut state, None);
        }
    }

    fn publish(
        controller: &SessionController<InjectedProvider>,
        state: &mut Signal<SessionState>,
        busy: Option<&'static str>,
    ) {
        let mut current = state.write();
        current.view = controller.view();
        current.busy = busy;
    }
}
