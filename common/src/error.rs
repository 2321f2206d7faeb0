use alloy_primitives::B256;
use thiserror::Error;

use crate::rpc::ProviderError;

/// Errors from wallet session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    #[error("no wallet provider injected")]
    NoProvider,

    #[error("no account connected")]
    NotConnected,

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("invalid recipient address {0:?}")]
    InvalidRecipient(String),

    #[error("transfer cancelled: invalid recipient or amount")]
    TransferCancelled,

    #[error("transaction {0} reverted")]
    Reverted(B256),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AtmError {
    /// True when the wallet user declined the request.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Provider(err) if err.is_user_rejection())
    }
}

impl From<alloy_sol_types::Error> for AtmError {
    fn from(err: alloy_sol_types::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for AtmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
