//! Headless controller of the hot-wallet link panel of a hypergrid operator.
//!
//! The panel fetches the operator backend's wallet directory, keeps the
//! user's selection of signer addresses and hands the final set to an
//! [`OperatorNoteWriter`] that updates the signers note on chain.

pub mod client;
pub mod config;
pub mod delegate;
pub mod error;
pub mod http;
pub mod logger;
pub mod model;
pub mod runtime;
pub mod state;
pub mod task;

pub use client::{WalletBackend, WalletClient};
pub use config::Config;
pub use delegate::{OperatorNoteUpdate, OperatorNoteWriter};
pub use error::{Error, TransactionError, ValidationError};
pub use model::{Address, OperatorIdentity, TxHash, WalletRecord};
pub use state::{LinkPhase, Msg, View, WalletLinkPanel};
pub use task::Task;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
