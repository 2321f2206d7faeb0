//! In-memory wallet provider for development and tests.
//!
//! Simulates both collaborators: the wallet (authorized accounts, connection
//! approval) and the ATM contract (per-account balances). Every request is
//! recorded so tests can assert on the exact remote traffic. Transactions
//! confirm after a configurable number of empty receipt polls.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use alloy_primitives::{keccak256, Bytes, B256, U256, U64};
use alloy_sol_types::{SolInterface, SolValue};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::contract::Assessment::AssessmentCalls;
use crate::provider::WalletProvider;
use crate::rpc::{
    ProviderError, TransactionReceipt, TransactionRequest, ETH_ACCOUNTS, ETH_CALL,
    ETH_GET_TRANSACTION_RECEIPT, ETH_REQUEST_ACCOUNTS, ETH_SEND_TRANSACTION, UNAUTHORIZED,
};

const INVALID_PARAMS: i64 = -32602;
const UNSUPPORTED_METHOD: i64 = 4200;

/// Mock provider. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    state: Rc<RefCell<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Accounts returned by `eth_accounts`.
    authorized: Vec<String>,
    /// Accounts granted when the user approves `eth_requestAccounts`.
    wallet_accounts: Vec<String>,
    reject_connections: bool,
    /// Contract balances keyed by lowercase account.
    balances: HashMap<String, U256>,
    calls: Vec<String>,
    failing: HashSet<String>,
    receipts: HashMap<B256, TransactionReceipt>,
    polls_until_mined: u32,
    polls_left: HashMap<B256, u32>,
    revert_next: bool,
    nonce: u64,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// An account that is already authorized for this origin.
    pub fn with_authorized(self, account: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.authorized.push(account.to_string());
            state.wallet_accounts.push(account.to_string());
        }
        self
    }

    /// An account the wallet holds but only hands out after approval.
    pub fn with_wallet_account(self, account: &str) -> Self {
        self.state
            .borrow_mut()
            .wallet_accounts
            .push(account.to_string());
        self
    }

    /// Make the user decline every connection prompt.
    pub fn rejecting_connections(self) -> Self {
        self.state.borrow_mut().reject_connections = true;
        self
    }

    pub fn with_balance(self, account: &str, wei: U256) -> Self {
        self.state
            .borrow_mut()
            .balances
            .insert(account.to_lowercase(), wei);
        self
    }

    /// Number of `null` receipt polls before a transaction is mined.
    pub fn with_polls_until_mined(self, polls: u32) -> Self {
        self.state.borrow_mut().polls_until_mined = polls;
        self
    }

    /// Fail every subsequent request for `method`.
    pub fn fail(&self, method: &str) {
        self.state.borrow_mut().failing.insert(method.to_string());
    }

    pub fn recover(&self, method: &str) {
        self.state.borrow_mut().failing.remove(method);
    }

    /// Mine the next transaction with a failed status.
    pub fn revert_next(&self) {
        self.state.borrow_mut().revert_next = true;
    }

    /// Methods requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|m| m.as_str() == method)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn balance_of(&self, account: &str) -> U256 {
        self.state
            .borrow()
            .balances
            .get(&account.to_lowercase())
            .copied()
            .unwrap_or_default()
    }
}

impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(method.to_string());
        if state.failing.contains(method) {
            return Err(ProviderError::internal(format!("{method} failed")));
        }

        match method {
            ETH_ACCOUNTS => Ok(json!(state.authorized)),
            ETH_REQUEST_ACCOUNTS => {
                if state.reject_connections {
                    return Err(ProviderError::user_rejected());
                }
                state.authorized = state.wallet_accounts.clone();
                Ok(json!(state.authorized))
            }
            ETH_CALL => state.call(&first_param(&params)?),
            ETH_SEND_TRANSACTION => state.send(&first_param(&params)?),
            ETH_GET_TRANSACTION_RECEIPT => Ok(state.receipt(first_param(&params)?)),
            other => Err(ProviderError::new(
                UNSUPPORTED_METHOD,
                format!("unsupported method {other}"),
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

impl MockState {
    fn balance(&self, account: &str) -> U256 {
        self.balances
            .get(&account.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    fn call(&self, tx: &TransactionRequest) -> Result<Value, ProviderError> {
        match decode(tx)? {
            AssessmentCalls::getBalance(_) => {
                let output = Bytes::from(self.balance(&tx.from).abi_encode());
                Ok(json!(output))
            }
            _ => Err(ProviderError::internal("eth_call to a mutating function")),
        }
    }

    fn send(&mut self, tx: &TransactionRequest) -> Result<Value, ProviderError> {
        let from = tx.from.to_lowercase();
        if !self.authorized.iter().any(|a| a.to_lowercase() == from) {
            return Err(ProviderError::new(UNAUTHORIZED, "account not authorized"));
        }

        let reverted = std::mem::take(&mut self.revert_next);
        if !reverted {
            match decode(tx)? {
                AssessmentCalls::getBalance(_) => {}
                AssessmentCalls::deposit(call) => {
                    *self.balances.entry(from).or_default() += call.amount;
                }
                AssessmentCalls::withdraw(call) => {
                    self.debit(&from, call.amount)?;
                }
                AssessmentCalls::transfer(call) => {
                    self.debit(&from, call.amount)?;
                    let to = call.to.to_string().to_lowercase();
                    *self.balances.entry(to).or_default() += call.amount;
                }
            }
        }

        self.nonce += 1;
        let hash = keccak256(self.nonce.to_be_bytes());
        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(self.nonce)),
            status: Some(if reverted { U64::ZERO } else { U64::from(1) }),
        };
        self.receipts.insert(hash, receipt);
        self.polls_left.insert(hash, self.polls_until_mined);
        Ok(json!(hash))
    }

    fn debit(&mut self, account: &str, amount: U256) -> Result<(), ProviderError> {
        let balance = self.balances.entry(account.to_string()).or_default();
        if *balance < amount {
            return Err(ProviderError::internal(
                "execution reverted: Insufficient balance",
            ));
        }
        *balance -= amount;
        Ok(())
    }

    fn receipt(&mut self, hash: B256) -> Value {
        if let Some(left) = self.polls_left.get_mut(&hash) {
            if *left > 0 {
                *left -= 1;
                return Value::Null;
            }
        }
        self.receipts
            .get(&hash)
            .map_or(Value::Null, |receipt| json!(receipt))
    }
}

fn first_param<T: DeserializeOwned>(params: &Value) -> Result<T, ProviderError> {
    let param = params
        .get(0)
        .cloned()
        .ok_or_else(|| ProviderError::new(INVALID_PARAMS, "missing params"))?;
    serde_json::from_value(param).map_err(|e| ProviderError::new(INVALID_PARAMS, e.to_string()))
}

fn decode(tx: &TransactionRequest) -> Result<AssessmentCalls, ProviderError> {
    AssessmentCalls::abi_decode(&tx.data, true)
        .map_err(|e| ProviderError::internal(format!("bad calldata: {e}")))
}
