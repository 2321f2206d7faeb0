pub mod config;
pub mod contract;
pub mod controller;
pub mod error;
pub mod mock;
pub mod provider;
pub mod rpc;
pub mod session;
pub mod units;

pub use config::AtmConfig;
pub use controller::{SessionController, TransferInput};
pub use error::AtmError;
pub use provider::WalletProvider;
pub use session::{Session, SessionPhase, SessionView};
