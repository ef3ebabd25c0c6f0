//! Request scopes
//!
//! A scope bounds the lifetime of the calls issued under it. Once the scope
//! is cancelled, pending calls are dropped and results that settle afterwards
//! are discarded instead of being applied.

use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    token: CancellationToken,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A nested scope, cancelled together with this one but cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `future` to completion unless the scope is torn down first.
    ///
    /// Returns `None` when the scope was cancelled, including when the future
    /// finished but the scope was cancelled before the result was handed out.
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        let output = tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = future => Some(output),
        };

        if self.token.is_cancelled() {
            log::debug!("Discarding result of a call whose scope was cancelled");
            return None;
        }
        output
    }
}
