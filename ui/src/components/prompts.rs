//! Blocking browser dialogs.

use atm_common::TransferInput;

/// Show a blocking alert.
#[allow(dead_code)] // used in WASM builds only (session_api::wasm_impl)
pub fn alert(message: &str) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    #[cfg(not(target_family = "wasm"))]
    tracing::warn!("alert: {message}");
}

/// Ask for a line of text. `None` if the dialog was dismissed.
pub fn prompt(message: &str) -> Option<String> {
    #[cfg(target_family = "wasm")]
    {
        web_sys::window()
            .and_then(|window| window.prompt_with_message(message).ok())
            .flatten()
    }

    #[cfg(not(target_family = "wasm"))]
    {
        tracing::debug!("prompt (native stub): {message}");
        None
    }
}

/// Collect transfer recipient and amount, one prompt each.
pub fn prompt_transfer() -> TransferInput {
    TransferInput {
        recipient: prompt("Enter recipient address:"),
        amount: prompt("Enter amount to transfer in ETH:"),
    }
}
