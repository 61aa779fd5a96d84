use std::sync::Arc;
use std::time::Duration;

use crate::{
    client::WalletBackend,
    config::{Config, SelectionSync},
    delegate::OperatorNoteWriter,
    error::Error,
    model::{OperatorIdentity, TxHash, WalletRecord},
};

pub use message::{Msg, WalletAction};
pub use views::{Directory, ImportForm, SelectionState};

pub mod message;
pub mod update;
pub mod views;


/// Current view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Directory,
    ImportForm,
}

/// Progress of the signers note update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPhase {
    #[default]
    Idle,
    Sending,
    Confirming(TxHash),
    Confirmed(TxHash),
    Failed,
}

impl LinkPhase {
    /// A transaction is in flight; submitting again is not allowed.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Sending | Self::Confirming(_))
    }

    pub fn transaction_hash(&self) -> Option<&TxHash> {
        match self {
            Self::Confirming(tx) | Self::Confirmed(tx) => Some(tx),
            _ => None,
        }
    }
}

/// Invoked once per confirmed link, after the refresh delay.
pub type OnWalletsLinked = Arc<dyn Fn() + Send + Sync>;

/// Panel linking hot wallets to an operator's signers note.
pub struct WalletLinkPanel {
    backend: Arc<dyn WalletBackend>,
    writer: Arc<dyn OperatorNoteWriter>,
    operator: Option<OperatorIdentity>,
    on_wallets_linked: Option<OnWalletsLinked>,
    refresh_delay: Duration,
    selection_sync: SelectionSync,

    wallets: Vec<WalletRecord>,
    selection: SelectionState,
    import_form: ImportForm,
    current_view: View,
    /// Directory fetch in flight.
    loading: bool,
    /// Generate/import command in flight.
    processing: bool,
    phase: LinkPhase,
    warning: Option<Error>,
}

impl WalletLinkPanel {
    pub fn new(
        backend: Arc<dyn WalletBackend>,
        writer: Arc<dyn OperatorNoteWriter>,
        config: &Config,
    ) -> Self {
        Self {
            backend,
            writer,
            operator: None,
            on_wallets_linked: None,
            refresh_delay: config.refresh_delay(),
            selection_sync: config.selection_sync,
            wallets: Vec::new(),
            selection: SelectionState::default(),
            import_form: ImportForm::default(),
            current_view: View::Directory,
            loading: false,
            processing: false,
            phase: LinkPhase::Idle,
            warning: None,
        }
    }

    pub fn with_operator(mut self, operator: OperatorIdentity) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn with_on_wallets_linked(mut self, callback: OnWalletsLinked) -> Self {
        self.on_wallets_linked = Some(callback);
        self
    }

    /// The operator identity comes from the hosting context and may change.
    pub fn set_operator(&mut self, operator: Option<OperatorIdentity>) {
        self.operator = operator;
    }

    /// Initial directory fetch.
    pub fn load(&mut self) -> crate::task::Task<Msg> {
        self.update(Msg::RefreshWallets)
    }

    pub fn operator(&self) -> Option<&OperatorIdentity> {
        self.operator.as_ref()
    }

    pub fn wallets(&self) -> &[WalletRecord] {
        &self.wallets
    }

    pub fn directory(&self) -> Directory<'_> {
        Directory::new(&self.wallets)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn import_form(&self) -> &ImportForm {
        &self.import_form
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn phase(&self) -> LinkPhase {
        self.phase
    }

    pub fn warning(&self) -> Option<&Error> {
        self.warning.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        self.operator.is_some() && !self.phase.is_busy()
    }

    /// The selection no longer matches what is linked on chain.
    pub fn has_pending_changes(&self) -> bool {
        self.selection.differs_from_chain(&self.wallets)
    }
}
