use serde::{Deserialize, Serialize};

use crate::contract::ContractHandle;
use crate::error::AtmError;

/// Wallet session state.
///
/// `Unloaded → NoProvider | Disconnected → Connected`. A contract handle only
/// exists together with the account it was bound for.
#[derive(Clone, Debug)]
pub enum Session<P> {
    Unloaded,
    NoProvider,
    Disconnected,
    Connected(Connection<P>),
}

/// An authorized account with its bound contract.
#[derive(Clone, Debug)]
pub struct Connection<P> {
    pub account: String,
    pub contract: ContractHandle<P>,
    /// Last successfully fetched balance, formatted in ether.
    pub balance: Option<String>,
}

/// Coarse position in the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Unloaded,
    NoProvider,
    Disconnected,
    Connected,
    ConnectedWithBalance,
}

/// Render snapshot of a session, published to the UI after every action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionView {
    #[default]
    Loading,
    NoProvider,
    Disconnected,
    Connected {
        account: String,
        balance: Option<String>,
    },
}

impl<P> Default for Session<P> {
    fn default() -> Self {
        Self::Unloaded
    }
}

impl<P> Session<P> {
    /// State after the one-time provider check on mount.
    pub fn provider_checked(present: bool) -> Self {
        if present {
            Self::Disconnected
        } else {
            Self::NoProvider
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Unloaded => SessionPhase::Unloaded,
            Self::NoProvider => SessionPhase::NoProvider,
            Self::Disconnected => SessionPhase::Disconnected,
            Self::Connected(conn) if conn.balance.is_some() => SessionPhase::ConnectedWithBalance,
            Self::Connected(_) => SessionPhase::Connected,
        }
    }

    pub fn connection(&self) -> Option<&Connection<P>> {
        match self {
            Self::Connected(conn) => Some(conn),
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&str> {
        self.connection().map(|conn| conn.account.as_str())
    }

    pub fn contract(&self) -> Option<&ContractHandle<P>> {
        self.connection().map(|conn| &conn.contract)
    }

    pub fn balance(&self) -> Option<&str> {
        self.connection().and_then(|conn| conn.balance.as_deref())
    }

    /// Enter `Connected` with a freshly bound contract.
    ///
    /// Only valid once a provider has been found. Re-connecting the same
    /// account keeps the displayed balance.
    pub fn connect(&mut self, account: String, contract: ContractHandle<P>) -> Result<(), AtmError> {
        let balance = match self {
            Self::Unloaded | Self::NoProvider => return Err(AtmError::NoProvider),
            Self::Disconnected => None,
            Self::Connected(conn) if conn.account == account => conn.balance.take(),
            Self::Connected(_) => None,
        };
        *self = Self::Connected(Connection {
            account,
            contract,
            balance,
        });
        Ok(())
    }

    /// Store a successfully fetched balance. Ignored unless connected.
    pub fn record_balance(&mut self, balance: String) -> bool {
        match self {
            Self::Connected(conn) => {
                conn.balance = Some(balance);
                true
            }
            _ => false,
        }
    }

    pub fn view(&self) -> SessionView {
        match self {
            Self::Unloaded => SessionView::Loading,
            Self::NoProvider => SessionView::NoProvider,
            Self::Disconnected => SessionView::Disconnected,
            Self::Connected(conn) => SessionView::Connected {
                account: conn.account.clone(),
                balance: conn.balance.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtmConfig;
    use crate::mock::MockProvider;

    const ALICE: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const BOB: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";

    fn handle(account: &str) -> ContractHandle<MockProvider> {
        let provider = MockProvider::new();
        ContractHandle::bind(Some(&provider), account, &AtmConfig::default()).unwrap()
    }

    #[test]
    fn provider_check_picks_branch() {
        let session = Session::<MockProvider>::provider_checked(false);
        assert_eq!(session.phase(), SessionPhase::NoProvider);
        assert_eq!(session.view(), SessionView::NoProvider);

        let session = Session::<MockProvider>::provider_checked(true);
        assert_eq!(session.phase(), SessionPhase::Disconnected);
    }

    #[test]
    fn connect_requires_provider() {
        let mut session = Session::NoProvider;
        assert_eq!(
            session.connect(ALICE.into(), handle(ALICE)),
            Err(AtmError::NoProvider)
        );
        assert_eq!(session.phase(), SessionPhase::NoProvider);

        let mut session = Session::default();
        assert!(session.connect(ALICE.into(), handle(ALICE)).is_err());
        assert_eq!(session.phase(), SessionPhase::Unloaded);
    }

    #[test]
    fn connect_binds_contract_with_account() {
        let mut session = Session::provider_checked(true);
        session.connect(ALICE.into(), handle(ALICE)).unwrap();

        assert_eq!(session.phase(), SessionPhase::Connected);
        assert_eq!(session.account(), Some(ALICE));
        assert_eq!(session.contract().map(|c| c.signer()), Some(ALICE));
        assert_eq!(session.balance(), None);
    }

    #[test]
    fn balance_only_recorded_when_connected() {
        let mut session = Session::<MockProvider>::provider_checked(true);
        assert!(!session.record_balance("1.0".into()));
        assert_eq!(session.view(), SessionView::Disconnected);

        session.connect(ALICE.into(), handle(ALICE)).unwrap();
        assert!(session.record_balance("1.0".into()));
        assert_eq!(session.phase(), SessionPhase::ConnectedWithBalance);
        assert_eq!(
            session.view(),
            SessionView::Connected {
                account: ALICE.into(),
                balance: Some("1.0".into()),
            }
        );
    }

    #[test]
    fn reconnect_keeps_balance_for_same_account_only() {
        let mut session = Session::provider_checked(true);
        session.connect(ALICE.into(), handle(ALICE)).unwrap();
        session.record_balance("2.0".into());

        session.connect(ALICE.into(), handle(ALICE)).unwrap();
        assert_eq!(session.balance(), Some("2.0"));

        session.connect(BOB.into(), handle(BOB)).unwrap();
        assert_eq!(session.account(), Some(BOB));
        assert_eq!(session.balance(), None);
    }
}
