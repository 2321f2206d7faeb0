//! Wallet session controller.
//!
//! Owns the session state union and forwards user intent to the wallet and
//! the contract. Every remote failure is caught here: it is logged, the
//! previous state is left untouched and the error is handed back so the UI
//! can decide whether to tell the user.

use tracing::{error, info, warn};

use crate::config::AtmConfig;
use crate::contract::{parse_recipient, ContractHandle, PendingTransaction};
use crate::error::AtmError;
use crate::provider::WalletProvider;
use crate::rpc::TransactionReceipt;
use crate::session::{Session, SessionView};
use crate::units::{format_ether, parse_ether};

/// Recipient and amount as typed into the transfer prompts. `None` means the
/// prompt was dismissed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferInput {
    pub recipient: Option<String>,
    pub amount: Option<String>,
}

impl TransferInput {
    pub fn new(recipient: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            recipient: Some(recipient.into()),
            amount: Some(amount.into()),
        }
    }

    /// Both fields, trimmed, or `None` if either is missing or blank.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let recipient = self.recipient.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let amount = self.amount.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((recipient, amount))
    }
}

/// Which mutating contract call an action performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Movement {
    Deposit,
    Withdraw,
}

pub struct SessionController<P> {
    config: AtmConfig,
    provider: Option<P>,
    session: Session<P>,
}

impl<P: WalletProvider> SessionController<P> {
    pub fn new(config: AtmConfig) -> Self {
        Self {
            config,
            provider: None,
            session: Session::Unloaded,
        }
    }

    pub fn config(&self) -> &AtmConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    /// Mount sequence: provider check, silent account lookup, first balance.
    pub async fn initialize(&mut self, injected: Option<P>) {
        self.detect_provider(injected);
        if self.provider.is_none() {
            return;
        }
        // Failures are already logged; the connect button stays available.
        let _ = self.fetch_authorized_account().await;
        self.ensure_balance().await;
    }

    /// Record whether a wallet was injected into the page.
    pub fn detect_provider(&mut self, injected: Option<P>) {
        match &injected {
            Some(provider) => info!("Found wallet provider: {}", provider.provider_name()),
            None => info!("No wallet provider injected"),
        }
        self.session = Session::provider_checked(injected.is_some());
        self.provider = injected;
    }

    /// Look up accounts this origin is already authorized for, without
    /// prompting. Returns the connected account if there was one.
    pub async fn fetch_authorized_account(&mut self) -> Result<Option<String>, AtmError> {
        let provider = self.provider.clone().ok_or(AtmError::NoProvider)?;
        let accounts = match provider.accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                error!("Error fetching authorized accounts: {err}");
                return Err(err);
            }
        };
        match accounts.into_iter().next() {
            Some(account) => {
                self.handle_account(account.clone())?;
                Ok(Some(account))
            }
            None => {
                info!("No account found");
                Ok(None)
            }
        }
    }

    /// Prompt the user in the wallet for account access.
    pub async fn request_connection(&mut self) -> Result<String, AtmError> {
        let Some(provider) = self.provider.clone() else {
            warn!("{} wallet is required to connect", self.config.wallet_name);
            return Err(AtmError::NoProvider);
        };
        let accounts = match provider.request_accounts().await {
            Ok(accounts) => accounts,
            Err(err) => {
                error!("Error connecting account: {err}");
                return Err(err);
            }
        };
        let Some(account) = accounts.into_iter().next() else {
            info!("No account found");
            return Err(AtmError::NotConnected);
        };
        self.handle_account(account.clone())?;
        Ok(account)
    }

    /// Build a contract handle for the connected account. `None` without a
    /// provider or account.
    pub fn bind_contract(&self) -> Option<ContractHandle<P>> {
        let account = self.session.account()?;
        ContractHandle::bind(self.provider.as_ref(), account, &self.config)
    }

    /// Connect-then-bind transition.
    fn handle_account(&mut self, account: String) -> Result<(), AtmError> {
        let contract = ContractHandle::bind(self.provider.as_ref(), &account, &self.config)
            .ok_or(AtmError::NoProvider)?;
        info!("Account connected: {account}");
        self.session.connect(account, contract)
    }

    /// Query the contract balance. A failed query keeps the last value.
    pub async fn refresh_balance(&mut self) -> Result<String, AtmError> {
        let contract = self.contract()?;
        match contract.get_balance().await {
            Ok(wei) => {
                let balance = format_ether(wei);
                self.session.record_balance(balance.clone());
                Ok(balance)
            }
            Err(err) => {
                error!("Error fetching balance: {err}");
                Err(err)
            }
        }
    }

    /// Fetch the balance once after connecting if none is displayed yet.
    pub async fn ensure_balance(&mut self) {
        if self.session.account().is_some() && self.session.balance().is_none() {
            let _ = self.refresh_balance().await;
        }
    }

    /// Deposit the configured fixed amount, then refresh the balance.
    pub async fn deposit(&mut self) -> Result<String, AtmError> {
        self.move_fixed_amount(Movement::Deposit).await
    }

    /// Withdraw the configured fixed amount, then refresh the balance.
    pub async fn withdraw(&mut self) -> Result<String, AtmError> {
        self.move_fixed_amount(Movement::Withdraw).await
    }

    async fn move_fixed_amount(&mut self, movement: Movement) -> Result<String, AtmError> {
        let contract = self.contract()?;
        let label = match movement {
            Movement::Deposit => "depositing",
            Movement::Withdraw => "withdrawing",
        };
        let submitted = async {
            let amount = self.config.fixed_amount_wei()?;
            let pending = match movement {
                Movement::Deposit => contract.deposit(amount).await?,
                Movement::Withdraw => contract.withdraw(amount).await?,
            };
            confirm(pending).await
        };
        if let Err(err) = submitted.await {
            error!("Error {label} ETH: {err}");
            return Err(err);
        }
        self.refresh_balance().await
    }

    /// Transfer to another account, then refresh the balance.
    ///
    /// A missing recipient or amount aborts before any remote call.
    pub async fn transfer(&mut self, input: TransferInput) -> Result<String, AtmError> {
        let contract = self.contract()?;
        let Some((recipient, amount)) = input.fields() else {
            info!("Transfer cancelled: Invalid recipient or amount");
            return Err(AtmError::TransferCancelled);
        };
        let submitted = async {
            let to = parse_recipient(recipient)?;
            let wei = parse_ether(amount)?;
            confirm(contract.transfer(to, wei).await?).await
        };
        if let Err(err) = submitted.await {
            error!("Error transferring ETH: {err}");
            return Err(err);
        }
        self.refresh_balance().await
    }

    fn contract(&self) -> Result<ContractHandle<P>, AtmError> {
        self.session.contract().cloned().ok_or(AtmError::NotConnected)
    }
}

async fn confirm<P: WalletProvider>(
    pending: PendingTransaction<P>,
) -> Result<TransactionReceipt, AtmError> {
    let hash = pending.hash();
    let receipt = pending.wait().await?;
    match receipt.block_number {
        Some(block) => info!("Transaction {hash} confirmed in block {block}"),
        None => info!("Transaction {hash} confirmed"),
    }
    Ok(receipt)
}
