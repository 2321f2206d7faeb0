use dioxus::prelude::*;

use atm_common::{AtmConfig, SessionView};

use super::prompts::prompt_transfer;
use super::session_api::{use_session_action, SessionAction};
use super::session_state::use_session_state;

/// Connect button, or the connected account with its balance and actions.
#[component]
pub fn AccountPanel() -> Element {
    let session_state = use_session_state();
    let config = use_context::<AtmConfig>();
    let actions = use_session_action();

    let state = session_state.read().clone();
    let busy = state.is_busy();
    let wallet = config.wallet_name.clone();
    let amount = config.fixed_amount.clone();

    match state.view {
        SessionView::Loading => rsx! {
            p { class: "hint", "Checking for a wallet..." }
        },
        SessionView::NoProvider => rsx! {
            p { "Please install {wallet} to use this ATM." }
        },
        SessionView::Disconnected => rsx! {
            button {
                disabled: busy,
                onclick: move |_| actions.send(SessionAction::Connect),
                "Connect {wallet} wallet"
            }
            if let Some(label) = state.busy {
                p { class: "busy", "{label}" }
            }
        },
        SessionView::Connected { account, balance } => {
            let balance = balance.unwrap_or_default();
            rsx! {
                div { class: "account-panel",
                    p { "Your Account: {account}" }
                    p { "Your Balance: {balance}" }
                    button {
                        disabled: busy,
                        onclick: move |_| actions.send(SessionAction::Deposit),
                        "Deposit {amount} ETH"
                    }
                    button {
                        disabled: busy,
                        onclick: move |_| actions.send(SessionAction::Withdraw),
                        "Withdraw {amount} ETH"
                    }
                    button {
                        disabled: busy,
                        onclick: move |_| actions.send(SessionAction::Transfer(prompt_transfer())),
                        "Transfer"
                    }
                    button {
                        class: "secondary",
                        disabled: busy,
                        onclick: move |_| actions.send(SessionAction::RefreshBalance),
                        "Refresh balance"
                    }
                    if let Some(label) = state.busy {
                        p { class: "busy", "{label}" }
                    }
                }
            }
        }
    }
}
