use std::future::Future;

use futures::future::{BoxFuture, FutureExt};

/// A batch of asynchronous actions, each resolving to a message.
///
/// `update` returns one of these instead of performing I/O itself; the host
/// runs the futures and feeds every output back into `update`.
#[must_use = "a Task does nothing unless it is run"]
pub struct Task<T>(Vec<BoxFuture<'static, T>>);

impl<T: Send + 'static> Task<T> {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn perform<A>(
        future: impl Future<Output = A> + Send + 'static,
        f: impl FnOnce(A) -> T + Send + 'static,
    ) -> Self {
        Self(vec![future.map(f).boxed()])
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, T>> {
        self.0
    }
}

impl<T> std::fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Task({} pending)", self.0.len())
    }
}
