//! Listener Notification
//!
//! The listener is the caller's single-operation capability for learning how
//! the handshake ended. It is invoked exactly once per handshake, on the
//! caller's task, carrying the terminal outcome.

use crate::error::InitError;

/// Terminal classification of a handshake run.
#[derive(Debug, Clone)]
pub enum HandshakeOutcome {
    /// The overlay acknowledged the credential; the session is ready.
    Succeeded,
    /// Connect or submission failed, or the bounded acknowledgment wait
    /// expired.
    Failed(InitError),
    /// The handshake was cancelled or abandoned before the acknowledgment
    /// arrived.
    Cancelled,
}

impl HandshakeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HandshakeOutcome::Succeeded)
    }
}

/// Receives the terminal outcome of a handshake.
///
/// Callers must branch on the outcome rather than assume success: a notified
/// listener means the handshake *ended*, not that it succeeded.
pub trait InitListener: Send {
    fn on_outcome(&mut self, outcome: &HandshakeOutcome);
}

/// Closures work as listeners directly.
impl<F> InitListener for F
where
    F: FnMut(&HandshakeOutcome) + Send,
{
    fn on_outcome(&mut self, outcome: &HandshakeOutcome) {
        self(outcome)
    }
}
