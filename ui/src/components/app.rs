use dioxus::prelude::*;

use atm_common::AtmConfig;

use super::about::About;
use super::account_panel::AccountPanel;
use super::config;
use super::session_api::use_session_coroutine;
use super::session_state::SessionState;

const STYLE: &str = include_str!("../../assets/style.css");

#[component]
pub fn App() -> Element {
    let config: AtmConfig = use_hook(config::resolve);
    use_context_provider(|| config.clone());
    let session_state = use_context_provider(|| Signal::new(SessionState::new()));
    use_session_coroutine(session_state, config.clone());

    rsx! {
        document::Style { {STYLE} }
        main { class: "container",
            header {
                h1 { "Welcome to the Metacrafters Crypto Portal!" }
            }
            AccountPanel {}
            About {
                wallet_name: config.wallet_name.clone(),
                fixed_amount: config.fixed_amount.clone(),
            }
        }
    }
}
