use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::AtmError;
use crate::units::parse_ether;

/// Address the ATM contract lands at on a fresh local Hardhat node.
pub const DEFAULT_CONTRACT_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// Amount moved by the deposit and withdraw buttons, in ether.
pub const DEFAULT_FIXED_AMOUNT: &str = "1";

pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u32 = 1_000;

pub const DEFAULT_WALLET_NAME: &str = "MetaMask";

/// Session configuration. Fixed for the lifetime of the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtmConfig {
    pub contract_address: Address,
    pub fixed_amount: String,
    pub receipt_poll_interval_ms: u32,
    pub wallet_name: String,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS,
            fixed_amount: DEFAULT_FIXED_AMOUNT.to_string(),
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            wallet_name: DEFAULT_WALLET_NAME.to_string(),
        }
    }
}

impl AtmConfig {
    /// Default configuration pointed at another contract address.
    pub fn for_contract(address: &str) -> Result<Self, AtmError> {
        let contract_address = address
            .trim()
            .parse::<Address>()
            .map_err(|e| AtmError::Config(format!("contract address {address:?}: {e}")))?;
        Ok(Self {
            contract_address,
            ..Self::default()
        })
    }

    /// Replace the deposit/withdraw amount. The amount must parse as ether.
    pub fn with_fixed_amount(mut self, amount: &str) -> Result<Self, AtmError> {
        parse_ether(amount).map_err(|e| AtmError::Config(e.to_string()))?;
        self.fixed_amount = amount.trim().to_string();
        Ok(self)
    }

    pub fn with_receipt_poll_interval_ms(mut self, millis: u32) -> Self {
        self.receipt_poll_interval_ms = millis;
        self
    }

    /// The deposit/withdraw amount in wei.
    pub fn fixed_amount_wei(&self) -> Result<U256, AtmError> {
        parse_ether(&self.fixed_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_deployment() {
        let config = AtmConfig::default();
        assert_eq!(
            config.contract_address.to_string().to_lowercase(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
        assert_eq!(config.fixed_amount, "1");
        assert_eq!(
            config.fixed_amount_wei().unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn contract_override() {
        let config =
            AtmConfig::for_contract("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512").unwrap();
        assert_ne!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
        assert!(matches!(
            AtmConfig::for_contract("not-an-address"),
            Err(AtmError::Config(_))
        ));
    }

    #[test]
    fn fixed_amount_must_parse() {
        let config = AtmConfig::default().with_fixed_amount("0.1").unwrap();
        assert_eq!(config.fixed_amount, "0.1");
        assert!(AtmConfig::default().with_fixed_amount("one").is_err());
    }
}
