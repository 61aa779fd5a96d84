use indexmap::{IndexMap, IndexSet};

use crate::{config::SelectionSync, model::Address, model::WalletRecord};

/// Addresses the user wants linked after the next submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: IndexSet<Address>,
    /// Toggles made since the last derivation, address -> wanted membership.
    pending: IndexMap<Address, bool>,
}

impl SelectionState {
    /// Selection of everything currently linked on chain, in list order.
    pub fn derive(wallets: &[WalletRecord]) -> Self {
        Self {
            selected: linked_on_chain(wallets).collect(),
            pending: IndexMap::new(),
        }
    }

    pub fn on_wallets_loaded(&mut self, wallets: &[WalletRecord], sync: SelectionSync) {
        let pending = std::mem::take(&mut self.pending);
        *self = Self::derive(wallets);
        if sync == SelectionSync::Merge {
            for (address, wanted) in pending {
                if wallets.iter().any(|w| w.address == address) {
                    self.set(address, wanted);
                }
            }
        }
    }

    pub fn toggle(&mut self, address: Address) {
        let wanted = !self.selected.contains(&address);
        self.set(address, wanted);
    }

    fn set(&mut self, address: Address, wanted: bool) {
        let changed = if wanted {
            self.selected.insert(address)
        } else {
            self.selected.shift_remove(&address)
        };
        // A second toggle cancels the first one.
        if changed && self.pending.shift_remove(&address).is_none() {
            self.pending.insert(address, wanted);
        }
    }

    /// Drop pending toggles, keeping the current contents.
    pub fn commit(&mut self) {
        self.pending.clear();
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.selected.contains(address)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn has_pending_toggles(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Contents in insertion order.
    pub fn addresses(&self) -> Vec<Address> {
        self.selected.iter().copied().collect()
    }

    /// Whether the selection differs, as a set, from what is linked on chain.
    pub fn differs_from_chain(&self, wallets: &[WalletRecord]) -> bool {
        let linked: IndexSet<Address> = linked_on_chain(wallets).collect();
        linked.len() != self.selected.len() || !linked.iter().all(|a| self.selected.contains(a))
    }
}

fn linked_on_chain(wallets: &[WalletRecord]) -> impl Iterator<Item = Address> + '_ {
    wallets
        .iter()
        .filter(|w| w.is_linked_on_chain)
        .map(|w| w.address)
}
