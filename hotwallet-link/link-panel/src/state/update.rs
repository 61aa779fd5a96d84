use super::{message::Msg, LinkPhase, View, WalletAction, WalletLinkPanel};
use crate::{
    delegate::OperatorNoteUpdate,
    error::{Error, TransactionError, ValidationError},
    model::{Address, TxHash, WalletRecord},
    task::Task,
};
use tracing::{debug, error, info, warn};

// Update routing logic
impl WalletLinkPanel {
    #[rustfmt::skip]
    pub fn update(&mut self, message: Msg) -> Task<Msg> {
        debug!("received message");
        match message {
            // Directory
            Msg::RefreshWallets => return self.on_refresh_wallets(),
            Msg::WalletsLoaded(res) => self.on_wallets_loaded(res),

            // Selection
            Msg::ToggleWallet(address) => self.on_toggle_wallet(address),

            // Wallet management
            Msg::GenerateWallet => return self.on_generate_wallet(),
            Msg::ImportShowForm => self.current_view = View::ImportForm,
            Msg::ImportCancel => self.on_import_cancel(),
            Msg::ImportUpdatePrivateKey(value) => self.import_form.on_update_private_key(value),
            Msg::ImportUpdateName(value) => self.import_form.on_update_name(value),
            Msg::ImportSubmit => return self.on_import_submit(),
            Msg::WalletActionDone(action, res) => return self.on_wallet_action_done(action, res),

            // Signers note update
            Msg::LinkSubmit => return self.on_link_submit(),
            Msg::LinkSent(res) => return self.on_link_sent(res),
            Msg::LinkConfirmed(tx, res) => return self.on_link_confirmed(tx, res),
            Msg::LinkSettled(tx) => return self.on_link_settled(tx),
            Msg::LinkDismiss => self.on_link_dismiss(),
        }
        Task::none()
    }

    fn on_refresh_wallets(&mut self) -> Task<Msg> {
        // In-flight fetches are not cancelled: the last one to resolve wins.
        self.loading = true;
        self.warning = None;
        let backend = self.backend.clone();
        Task::perform(
            async move { backend.fetch_wallets().await },
            Msg::WalletsLoaded,
        )
    }

    fn on_wallets_loaded(&mut self, res: Result<Option<Vec<WalletRecord>>, Error>) {
        self.loading = false;
        match res {
            Ok(Some(wallets)) => {
                info!("Loaded {} wallets", wallets.len());
                self.wallets = wallets;
                self.selection
                    .on_wallets_loaded(&self.wallets, self.selection_sync);
            }
            Ok(None) => debug!("Directory response without wallet list, keeping current list"),
            Err(e) => {
                error!("Failed to load wallets: {}", e);
                self.warning = Some(e);
            }
        }
    }

    fn on_toggle_wallet(&mut self, address: Address) {
        self.selection.toggle(address);
    }

    fn on_generate_wallet(&mut self) -> Task<Msg> {
        if self.processing {
            debug!("wallet command already in flight");
            return Task::none();
        }
        self.processing = true;
        self.warning = None;
        let backend = self.backend.clone();
        Task::perform(async move { backend.generate_wallet().await }, |res| {
            Msg::WalletActionDone(WalletAction::Generate, res)
        })
    }

    fn on_import_cancel(&mut self) {
        self.current_view = View::Directory;
        self.import_form.clear();
    }

    fn on_import_submit(&mut self) -> Task<Msg> {
        if self.processing {
            debug!("wallet command already in flight");
            return Task::none();
        }
        self.warning = None;
        let (private_key, name) = match self.import_form.validate() {
            Ok(inputs) => inputs,
            Err(e) => {
                self.warning = Some(e.into());
                return Task::none();
            }
        };
        self.processing = true;
        let backend = self.backend.clone();
        Task::perform(
            async move { backend.import_wallet(private_key, name).await },
            |res| Msg::WalletActionDone(WalletAction::Import, res),
        )
    }

    fn on_wallet_action_done(&mut self, action: WalletAction, res: Result<(), Error>) -> Task<Msg> {
        self.processing = false;
        match res {
            Ok(()) => {
                info!("{:?} succeeded, refreshing wallets", action);
                if action == WalletAction::Import {
                    self.import_form.clear();
                    self.current_view = View::Directory;
                }
                self.on_refresh_wallets()
            }
            Err(e) => {
                warn!("{:?} failed: {}", action, e);
                self.warning = Some(e);
                Task::none()
            }
        }
    }

    fn on_link_submit(&mut self) -> Task<Msg> {
        if self.phase.is_busy() {
            debug!("signers note update already in flight");
            return Task::none();
        }
        self.warning = None;
        let Some(operator) = &self.operator else {
            self.warning = Some(ValidationError::OperatorDetailsMissing.into());
            return Task::none();
        };
        let update = OperatorNoteUpdate::new(operator, self.selection.addresses());
        info!(
            "Updating signers note of {} with {} hot wallets",
            update.operator_entry_name,
            update.hot_wallet_addresses.len()
        );
        self.phase = LinkPhase::Sending;
        let writer = self.writer.clone();
        Task::perform(async move { writer.send(&update).await }, Msg::LinkSent)
    }

    fn on_link_sent(&mut self, res: Result<TxHash, TransactionError>) -> Task<Msg> {
        if self.phase != LinkPhase::Sending {
            warn!("unexpected send result in phase {:?}", self.phase);
            return Task::none();
        }
        match res {
            Ok(tx) => {
                info!("Signers note update sent: {}", tx);
                self.phase = LinkPhase::Confirming(tx);
                let writer = self.writer.clone();
                Task::perform(async move { writer.confirm(&tx).await }, move |res| {
                    Msg::LinkConfirmed(tx, res)
                })
            }
            Err(e) => self.on_link_failed(e),
        }
    }

    fn on_link_confirmed(&mut self, tx: TxHash, res: Result<(), TransactionError>) -> Task<Msg> {
        if self.phase != LinkPhase::Confirming(tx) {
            warn!("unexpected confirmation of {} in phase {:?}", tx, self.phase);
            return Task::none();
        }
        match res {
            Ok(()) => {
                info!("Signers note update confirmed: {}", tx);
                self.phase = LinkPhase::Confirmed(tx);
                self.selection.commit();
                // One-shot and not cancellable.
                Task::perform(tokio::time::sleep(self.refresh_delay), move |_| {
                    Msg::LinkSettled(tx)
                })
            }
            Err(e) => self.on_link_failed(e),
        }
    }

    fn on_link_failed(&mut self, e: TransactionError) -> Task<Msg> {
        error!("Signers note update failed: {}", e);
        self.phase = LinkPhase::Failed;
        self.warning = Some(e.into());
        Task::none()
    }

    fn on_link_settled(&mut self, tx: TxHash) -> Task<Msg> {
        debug!("refresh delay elapsed after {}", tx);
        if let Some(callback) = &self.on_wallets_linked {
            callback();
        }
        self.on_refresh_wallets()
    }

    fn on_link_dismiss(&mut self) {
        if matches!(self.phase, LinkPhase::Confirmed(_) | LinkPhase::Failed) {
            self.phase = LinkPhase::Idle;
        }
    }
}
