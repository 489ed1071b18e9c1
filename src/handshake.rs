//! Init Handshake Orchestration
//!
//! Single responsibility: run connect → submit-credential → await-acknowledgment
//! off the caller's task, and deliver one terminal outcome back to it.
//!
//! # The Key Abstraction
//!
//! An [`InitHandshake`] is one initialization attempt. `start()` consumes it,
//! so a second run on the same instance is unrepresentable — one attempt, one
//! outcome. The returned [`HandshakeHandle`] is the only way to observe that
//! outcome, and its consuming `complete()` makes double delivery
//! unrepresentable too.
//!
//! # Why This Structure
//!
//! The failure mode this design rules out is the background body swallowing a
//! connect or submission error and telling the listener "done" anyway. Every
//! exit path of the body produces an explicit [`HandshakeOutcome`], sent over
//! a oneshot channel to the caller's task. Nothing is signalled by a shared
//! flag, and no error dies silently inside the spawned task.
//!
//! Three contexts participate:
//!
//! | Context             | Runs                                             |
//! |---------------------|--------------------------------------------------|
//! | caller's task       | `start()`, later `complete()` and the listener   |
//! | background task     | connect, submit, the acknowledgment wait         |
//! | client I/O thread   | the acknowledgment callback (releases the signal)|
//!
//! The only suspension point on the background task is the signal wait; the
//! caller's task never blocks on the handshake.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::client::{AckHandler, CredentialHandle, MessagingClient};
use crate::error::InitError;
use crate::listener::{HandshakeOutcome, InitListener};
use crate::signal::CompletionSignal;

/// Configuration for a handshake attempt.
#[derive(Debug, Clone, Default)]
pub struct HandshakeConfig {
    /// How long to wait for the overlay acknowledgment after submission.
    /// `None` waits indefinitely.
    pub ack_timeout: Option<Duration>,
}

/// One initialization handshake: connect, submit a credential, wait for the
/// overlay to acknowledge it, report exactly one outcome.
///
/// The client is shared with the caller; the credential handle is passed
/// through to it unread. Construction wires up the completion signal that
/// the acknowledgment callback will release.
pub struct InitHandshake {
    client: Arc<dyn MessagingClient>,
    credential: CredentialHandle,
    listener: Box<dyn InitListener>,
    config: HandshakeConfig,
    signal: CompletionSignal,
}

impl InitHandshake {
    /// Create a handshake attempt with an unbounded acknowledgment wait.
    pub fn new(
        client: Arc<dyn MessagingClient>,
        credential: CredentialHandle,
        listener: impl InitListener + 'static,
    ) -> Self {
        Self::with_config(client, credential, listener, HandshakeConfig::default())
    }

    /// Create a handshake attempt with explicit configuration.
    pub fn with_config(
        client: Arc<dyn MessagingClient>,
        credential: CredentialHandle,
        listener: impl InitListener + 'static,
        config: HandshakeConfig,
    ) -> Self {
        Self {
            client,
            credential,
            listener: Box::new(listener),
            config,
            signal: CompletionSignal::new(),
        }
    }

    /// Begin the handshake on a background task.
    ///
    /// Consumes the handshake: rerunning an attempt requires constructing a
    /// new one. Returns immediately; the caller's task stays free until it
    /// chooses to await [`HandshakeHandle::complete`].
    pub fn start(self) -> HandshakeHandle {
        let InitHandshake {
            client,
            credential,
            listener,
            config,
            signal,
        } = self;

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();

        tokio::spawn(async move {
            let outcome = run(client, credential, signal, config, cancel_rx).await;

            match &outcome {
                HandshakeOutcome::Succeeded => info!("Overlay acknowledged credential"),
                HandshakeOutcome::Failed(e) => error!(error = %e, "Init handshake failed"),
                HandshakeOutcome::Cancelled => {
                    warn!("Init handshake cancelled before acknowledgment")
                }
            }

            if outcome_tx.send(outcome).is_err() {
                debug!("Handshake outcome dropped; caller abandoned the handle");
            }
        });

        HandshakeHandle {
            outcome_rx,
            cancel_tx: Some(cancel_tx),
            listener,
        }
    }
}

/// The caller's view of a running handshake.
///
/// Dropping the handle without calling [`complete`](Self::complete) abandons
/// the handshake: the background task resolves to `Cancelled` instead of
/// waiting forever, and with the caller gone no listener fires.
pub struct HandshakeHandle {
    outcome_rx: oneshot::Receiver<HandshakeOutcome>,
    cancel_tx: Option<oneshot::Sender<()>>,
    listener: Box<dyn InitListener>,
}

impl HandshakeHandle {
    /// Abandon the acknowledgment wait.
    ///
    /// The background task resolves to `Cancelled`, and
    /// [`complete`](Self::complete) still delivers that outcome to the
    /// listener exactly once.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the terminal outcome on the caller's task and notify the
    /// listener there.
    ///
    /// Consuming the handle is what guarantees the exactly-once notification.
    pub async fn complete(self) -> HandshakeOutcome {
        // Hold the cancel sender while waiting; dropping it early would read
        // as abandonment to the background task.
        let _cancel_tx = self.cancel_tx;
        let mut listener = self.listener;

        let outcome = match self.outcome_rx.await {
            Ok(outcome) => outcome,
            // The background task died without reporting. Treat the
            // handshake as abandoned rather than invent a success.
            Err(_) => HandshakeOutcome::Cancelled,
        };

        listener.on_outcome(&outcome);
        outcome
    }
}

/// The handshake body. Runs entirely on the background task.
///
/// Every early return is a captured failure; nothing propagates out of the
/// spawned task as a panic or a silently dropped error.
async fn run(
    client: Arc<dyn MessagingClient>,
    credential: CredentialHandle,
    signal: CompletionSignal,
    config: HandshakeConfig,
    cancelled: oneshot::Receiver<()>,
) -> HandshakeOutcome {
    debug!("Connecting to overlay");
    if let Err(e) = client.connect().await {
        // No submission happened, so no acknowledgment can ever release the
        // signal. Skip straight to the outcome instead of waiting on it.
        return HandshakeOutcome::Failed(e);
    }

    let releaser = signal.releaser();
    let on_ack: AckHandler = Box::new(move |_response| releaser.release());

    debug!(credential = %credential.path().display(), "Submitting credential");
    if let Err(e) = client.submit_credential(&credential, on_ack).await {
        return HandshakeOutcome::Failed(e);
    }

    debug!("Awaiting overlay acknowledgment");
    match config.ack_timeout {
        Some(limit) => {
            tokio::select! {
                _ = signal.wait() => HandshakeOutcome::Succeeded,
                _ = cancelled => HandshakeOutcome::Cancelled,
                _ = tokio::time::sleep(limit) => {
                    HandshakeOutcome::Failed(InitError::AckTimeout(limit))
                }
            }
        }
        None => {
            tokio::select! {
                _ = signal.wait() => HandshakeOutcome::Succeeded,
                _ = cancelled => HandshakeOutcome::Cancelled,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_waits_indefinitely() {
        let config = HandshakeConfig::default();
        assert!(config.ack_timeout.is_none());
    }
}
