//! EIP-1193 wire types shared by every provider implementation.

use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_CALL: &str = "eth_call";
pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

/// Block tag passed with every `eth_call`.
pub const LATEST_BLOCK: &str = "latest";

/// The user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// The requested account or method has not been authorized.
pub const UNAUTHORIZED: i64 = 4100;
/// JSON-RPC internal error, used by wallets for execution failures.
pub const INTERNAL_ERROR: i64 = -32603;

/// Error object a provider rejects a request with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED_REQUEST, "User rejected the request.")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_REQUEST
    }
}

/// Call object for `eth_call` and `eth_sendTransaction`.
///
/// Gas, nonce and fees are left to the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub from: String,
    pub to: Address,
    pub data: Bytes,
}

/// The subset of a transaction receipt the session cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `1` for success, `0` for revert. Pre-Byzantium receipts omit it.
    #[serde(default)]
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status != U64::ZERO)
    }
}
