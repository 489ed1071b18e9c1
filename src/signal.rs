//! Completion Signal
//!
//! Single responsibility: the rendezvous between the acknowledgment callback
//! and the handshake body.
//!
//! The acknowledgment arrives on a thread the handshake body does not control
//! (the messaging client's own I/O context), while the body runs on its own
//! background task. The signal is the single-slot channel between the two:
//! the callback releases it, the body waits on it.
//!
//! # Semantics
//!
//! - At most one release is meaningful. Releasing an already-released signal
//!   is a no-op, so a duplicate acknowledgment cannot corrupt the handshake.
//! - A release that happens before the body starts waiting is not lost: the
//!   wait completes immediately. This is what makes a client that invokes its
//!   callback synchronously inside `submit_credential` safe.
//! - Cancelling the wait (dropping the future) does not consume a stored
//!   release.

use std::sync::Arc;
use tokio::sync::Notify;

/// Single-slot rendezvous primitive. One waiter, any number of releasers.
///
/// Owned exclusively by the handshake; only the cloneable [`SignalReleaser`]
/// ever leaves it, handed to the acknowledgment callback.
pub(crate) struct CompletionSignal {
    inner: Arc<Notify>,
}

/// The releasing half of a [`CompletionSignal`].
///
/// Safe to call from any thread. Extra releases saturate harmlessly.
#[derive(Clone)]
pub(crate) struct SignalReleaser {
    inner: Arc<Notify>,
}

impl CompletionSignal {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Notify::new()),
        }
    }

    /// Hand out a releaser for the acknowledgment callback.
    pub(crate) fn releaser(&self) -> SignalReleaser {
        SignalReleaser {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Wait until the signal is released, consuming the release.
    pub(crate) async fn wait(&self) {
        self.inner.notified().await;
    }
}

impl SignalReleaser {
    /// Release the signal. No-op if already released and not yet consumed.
    pub(crate) fn release(&self) {
        // notify_one stores at most one permit, which is exactly the
        // saturating {0,1} count the signal needs
        self.inner.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn release_before_wait_completes_immediately() {
        let signal = CompletionSignal::new();
        signal.releaser().release();
        // Must not hang: the release was stored, not dropped
        timeout(Duration::from_secs(1), signal.wait())
            .await
            .expect("stored release should complete the wait");
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_release_saturates() {
        let signal = CompletionSignal::new();
        let releaser = signal.releaser();
        releaser.release();
        releaser.release();

        // First wait consumes the single stored release
        signal.wait().await;

        // Second wait must block: the duplicate did not accumulate
        let second = timeout(Duration::from_millis(50), signal.wait()).await;
        assert!(second.is_err(), "duplicate release must not leave a permit");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn release_from_other_thread_wakes_waiter() {
        let signal = CompletionSignal::new();
        let releaser = signal.releaser();

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            releaser.release();
        });

        timeout(Duration::from_secs(5), signal.wait())
            .await
            .expect("cross-thread release should wake the waiter");
    }
}
