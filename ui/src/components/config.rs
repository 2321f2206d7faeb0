//! Session configuration for the page.
//!
//! Compile-time overrides: `ATM_CONTRACT_ADDRESS`, `ATM_FIXED_AMOUNT`,
//! `ATM_POLL_INTERVAL_MS`. The contract can also be switched at runtime with
//! a `?contract=0x...` query parameter.

use atm_common::AtmConfig;

/// Resolve the configuration for this page load.
pub fn resolve() -> AtmConfig {
    let contract = contract_override();
    config_from(
        contract.as_deref().or(option_env!("ATM_CONTRACT_ADDRESS")),
        option_env!("ATM_FIXED_AMOUNT"),
        option_env!("ATM_POLL_INTERVAL_MS"),
    )
}

/// Build a config from optional overrides. Invalid values are logged and
/// replaced by the default.
pub fn config_from(
    contract: Option<&str>,
    fixed_amount: Option<&str>,
    poll_interval_ms: Option<&str>,
) -> AtmConfig {
    let mut config = match contract.filter(|s| !s.trim().is_empty()) {
        Some(address) => AtmConfig::for_contract(address).unwrap_or_else(|e| {
            tracing::error!("{e}; using the default contract");
            AtmConfig::default()
        }),
        None => AtmConfig::default(),
    };

    if let Some(amount) = fixed_amount.filter(|s| !s.trim().is_empty()) {
        match config.clone().with_fixed_amount(amount) {
            Ok(updated) => config = updated,
            Err(e) => tracing::error!("ATM_FIXED_AMOUNT: {e}"),
        }
    }

    if let Some(millis) = poll_interval_ms.filter(|s| !s.trim().is_empty()) {
        match millis.trim().parse::<u32>() {
            Ok(millis) => config = config.with_receipt_poll_interval_ms(millis),
            Err(e) => tracing::error!("ATM_POLL_INTERVAL_MS {millis:?}: {e}"),
        }
    }

    config
}

#[cfg(target_family = "wasm")]
fn contract_override() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|qs| {
            web_sys::UrlSearchParams::new_with_str(&qs)
                .ok()?
                .get("contract")
        })
}

#[cfg(not(target_family = "wasm"))]
fn contract_override() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use atm_common::config::DEFAULT_CONTRACT_ADDRESS;

    #[test]
    fn no_overrides_gives_default() {
        assert_eq!(config_from(None, None, None), AtmConfig::default());
        assert_eq!(config_from(Some("  "), Some(""), None), AtmConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let config = config_from(
            Some("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            Some("0.5"),
            Some("250"),
        );
        assert_ne!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.fixed_amount, "0.5");
        assert_eq!(config.receipt_poll_interval_ms, 250);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(Some("atm"), Some("lots"), Some("soon"));
        assert_eq!(config, AtmConfig::default());
    }
}
