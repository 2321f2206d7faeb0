use alloy_primitives::{Bytes, B256};
use serde_json::{json, Value};

use crate::error::AtmError;
use crate::rpc::{
    ProviderError, TransactionReceipt, TransactionRequest, ETH_ACCOUNTS, ETH_CALL,
    ETH_GET_TRANSACTION_RECEIPT, ETH_REQUEST_ACCOUNTS, ETH_SEND_TRANSACTION, LATEST_BLOCK,
};

/// Abstraction over EIP-1193 wallet providers (injected browser wallet, mock).
///
/// Only `request` and `provider_name` are required; the typed helpers decode
/// the JSON results of the handful of methods the session uses. Handles are
/// cheap to clone and share the underlying provider.
#[allow(async_fn_in_trait)]
pub trait WalletProvider: Clone {
    /// Forward a raw `request({ method, params })`.
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;

    /// Human-readable provider name (e.g. "MetaMask", "mock").
    fn provider_name(&self) -> &str;

    /// Wait between receipt polls. Providers without a timer return at once.
    async fn pause(&self, _millis: u32) {}

    /// Accounts already authorized for this origin. Never prompts.
    async fn accounts(&self) -> Result<Vec<String>, AtmError> {
        let value = self.request(ETH_ACCOUNTS, json!([])).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Ask the user to authorize accounts. Prompts in the wallet.
    async fn request_accounts(&self) -> Result<Vec<String>, AtmError> {
        let value = self.request(ETH_REQUEST_ACCOUNTS, json!([])).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a read-only call against the latest block.
    async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, AtmError> {
        let value = self.request(ETH_CALL, json!([tx, LATEST_BLOCK])).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Hand a transaction to the wallet for signing and broadcast.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, AtmError> {
        let value = self.request(ETH_SEND_TRANSACTION, json!([tx])).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Receipt for a transaction, or `None` while it is still pending.
    async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, AtmError> {
        let value = self
            .request(ETH_GET_TRANSACTION_RECEIPT, json!([hash]))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}
