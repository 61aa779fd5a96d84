use async_trait::async_trait;

use crate::{
    error::TransactionError,
    model::{Address, OperatorIdentity, TxHash},
};

/// Target state of the operator's signers note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNoteUpdate {
    pub operator_address: Address,
    pub operator_entry_name: String,
    pub hot_wallet_addresses: Vec<Address>,
}

impl OperatorNoteUpdate {
    pub fn new(operator: &OperatorIdentity, hot_wallet_addresses: Vec<Address>) -> Self {
        Self {
            operator_address: operator.address,
            operator_entry_name: operator.entry_name.clone(),
            hot_wallet_addresses,
        }
    }
}

/// Writes the signers note on chain. Signing and RPC live behind this seam.
#[async_trait]
pub trait OperatorNoteWriter: Send + Sync {
    /// Broadcast the update, resolving once the transaction is sent.
    async fn send(&self, update: &OperatorNoteUpdate) -> Result<TxHash, TransactionError>;
    /// Resolve once `tx` is confirmed.
    async fn confirm(&self, tx: &TxHash) -> Result<(), TransactionError>;
}
