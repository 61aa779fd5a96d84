use futures::stream::{FuturesUnordered, StreamExt};

use crate::{
    state::{Msg, WalletLinkPanel},
    task::Task,
};

/// Run `task` and everything it leads to until the panel is idle.
///
/// Futures are polled concurrently; their messages are applied in
/// completion order.
pub async fn drive(panel: &mut WalletLinkPanel, task: Task<Msg>) {
    let mut pending: FuturesUnordered<_> = task.into_futures().into_iter().collect();
    while let Some(message) = pending.next().await {
        for next in panel.update(message).into_futures() {
            pending.push(next);
        }
    }
}
