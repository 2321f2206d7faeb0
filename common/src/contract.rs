//! Handle to the deployed ATM contract.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolValue};

use crate::config::AtmConfig;
use crate::error::AtmError;
use crate::provider::WalletProvider;
use crate::rpc::{TransactionReceipt, TransactionRequest};

sol! {
    #![sol(extra_derives(Debug))]

    /// Interface of the ATM ("Assessment") contract.
    #[sol(all_derives)]
    interface Assessment {
        /// Balance held by the contract for the caller.
        function getBalance() external view returns (uint256);

        /// Credit the caller's balance.
        function deposit(uint256 amount) external payable;

        /// Debit the caller's balance.
        function withdraw(uint256 amount) external;

        /// Move part of the caller's balance to another account.
        function transfer(address to, uint256 amount) external;
    }
}

/// Local object bound to the contract address, the connected account and the
/// provider that signs on its behalf.
#[derive(Clone, Debug)]
pub struct ContractHandle<P> {
    provider: P,
    address: Address,
    signer: String,
    poll_interval_ms: u32,
}

impl<P: WalletProvider> ContractHandle<P> {
    /// Bind the configured contract for `account`. Returns `None` without a
    /// provider.
    pub fn bind(provider: Option<&P>, account: &str, config: &AtmConfig) -> Option<Self> {
        let provider = provider?;
        Some(Self {
            provider: provider.clone(),
            address: config.contract_address,
            signer: account.to_string(),
            poll_interval_ms: config.receipt_poll_interval_ms,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> &str {
        &self.signer
    }

    fn request_for(&self, data: Vec<u8>) -> TransactionRequest {
        TransactionRequest {
            from: self.signer.clone(),
            to: self.address,
            data: Bytes::from(data),
        }
    }

    /// Query `getBalance()` for the bound account, in wei.
    pub async fn get_balance(&self) -> Result<U256, AtmError> {
        let tx = self.request_for(Assessment::getBalanceCall {}.abi_encode());
        let output = self.provider.call(&tx).await?;
        Ok(U256::abi_decode(&output, true)?)
    }

    pub async fn deposit(&self, amount: U256) -> Result<PendingTransaction<P>, AtmError> {
        self.send(Assessment::depositCall { amount }.abi_encode())
            .await
    }

    pub async fn withdraw(&self, amount: U256) -> Result<PendingTransaction<P>, AtmError> {
        self.send(Assessment::withdrawCall { amount }.abi_encode())
            .await
    }

    pub async fn transfer(
        &self,
        to: Address,
        amount: U256,
    ) -> Result<PendingTransaction<P>, AtmError> {
        self.send(Assessment::transferCall { to, amount }.abi_encode())
            .await
    }

    async fn send(&self, data: Vec<u8>) -> Result<PendingTransaction<P>, AtmError> {
        let hash = self.provider.send_transaction(&self.request_for(data)).await?;
        tracing::debug!("Submitted transaction {hash}");
        Ok(PendingTransaction {
            provider: self.provider.clone(),
            hash,
            poll_interval_ms: self.poll_interval_ms,
        })
    }
}

/// A submitted transaction that has not been confirmed yet.
#[must_use = "a pending transaction does nothing until waited on"]
#[derive(Debug)]
pub struct PendingTransaction<P> {
    provider: P,
    hash: B256,
    poll_interval_ms: u32,
}

impl<P: WalletProvider> PendingTransaction<P> {
    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// Poll for the receipt until the transaction is included.
    ///
    /// There is no timeout: a transaction that is never mined keeps the
    /// caller waiting.
    pub async fn wait(self) -> Result<TransactionReceipt, AtmError> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(self.hash).await? {
                if !receipt.succeeded() {
                    return Err(AtmError::Reverted(self.hash));
                }
                return Ok(receipt);
            }
            self.provider.pause(self.poll_interval_ms).await;
        }
    }
}

/// Parse a user-typed recipient into a contract address.
pub fn parse_recipient(input: &str) -> Result<Address, AtmError> {
    input
        .trim()
        .parse::<Address>()
        .map_err(|_| AtmError::InvalidRecipient(input.to_string()))
}

#[cfg(test)]
mod tests {
    use alloy_primitives::keccak256;
    use alloy_sol_types::SolInterface;

    use super::*;

    fn selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    #[test]
    fn selectors_match_solidity_signatures() {
        assert_eq!(Assessment::getBalanceCall::SELECTOR, selector("getBalance()"));
        assert_eq!(Assessment::depositCall::SELECTOR, selector("deposit(uint256)"));
        assert_eq!(Assessment::withdrawCall::SELECTOR, selector("withdraw(uint256)"));
        assert_eq!(
            Assessment::transferCall::SELECTOR,
            selector("transfer(address,uint256)")
        );
    }

    #[test]
    fn transfer_calldata_layout() {
        let to = parse_recipient("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").unwrap();
        let data = Assessment::transferCall {
            to,
            amount: U256::from(5u64),
        }
        .abi_encode();

        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[16..36], to.as_slice());
        assert_eq!(data[67], 5);

        match Assessment::AssessmentCalls::abi_decode(&data, true).unwrap() {
            Assessment::AssessmentCalls::transfer(call) => {
                assert_eq!(call.to, to);
                assert_eq!(call.amount, U256::from(5u64));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn recipient_must_be_an_address() {
        assert!(parse_recipient(" 0x70997970C51812dc3A010C7d01b50e0d17dc79C8 ").is_ok());
        assert!(matches!(
            parse_recipient("bob"),
            Err(AtmError::InvalidRecipient(r)) if r == "bob"
        ));
        assert!(parse_recipient("0x1234").is_err());
    }
}
