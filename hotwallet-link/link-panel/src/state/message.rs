use crate::{
    error::{Error, TransactionError},
    model::{Address, TxHash, WalletRecord},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletAction {
    Generate,
    Import,
}

/// All panel messages
#[derive(Debug, Clone)]
pub enum Msg {
    // Directory
    RefreshWallets,
    WalletsLoaded(Result<Option<Vec<WalletRecord>>, Error>),

    // Selection
    ToggleWallet(Address),

    // Wallet management
    GenerateWallet,
    ImportShowForm,
    ImportCancel,
    ImportUpdatePrivateKey(String),
    ImportUpdateName(String),
    ImportSubmit,
    WalletActionDone(WalletAction, Result<(), Error>),

    // Signers note update
    LinkSubmit,
    LinkSent(Result<TxHash, TransactionError>),
    LinkConfirmed(TxHash, Result<(), TransactionError>),
    LinkSettled(TxHash), // post-confirmation delay elapsed
    LinkDismiss,
}
