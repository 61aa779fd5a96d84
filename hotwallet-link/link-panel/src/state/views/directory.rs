use crate::model::WalletRecord;

/// Wallets shown in the directory view, split by who holds the key.
#[derive(Debug, Clone, Copy)]
pub struct Directory<'a> {
    wallets: &'a [WalletRecord],
}

impl<'a> Directory<'a> {
    pub fn new(wallets: &'a [WalletRecord]) -> Self {
        Self { wallets }
    }

    /// Wallets whose key this backend holds.
    pub fn managed(&self) -> Vec<&'a WalletRecord> {
        self.wallets.iter().filter(|w| w.is_managed).collect()
    }

    /// Signers linked on chain whose key lives elsewhere.
    pub fn external(&self) -> Vec<&'a WalletRecord> {
        self.wallets
            .iter()
            .filter(|w| !w.is_managed && w.is_linked_on_chain)
            .collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.wallets.iter().filter(|w| !w.is_displayed()).count()
    }
}
