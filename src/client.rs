//! Messaging Client Capability
//!
//! Single responsibility: define what the handshake needs from the overlay
//! transport. The wire protocol, credential parsing, and connection state all
//! live in the messaging client library; this crate only orchestrates the
//! calls.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Opaque acknowledgment from the overlay.
///
/// Only its arrival matters to the handshake; the payload is carried through
/// untouched for clients that want to inspect it in their own callbacks.
#[derive(Debug, Clone, Default)]
pub struct Response {
    payload: Vec<u8>,
}

impl Response {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Opaque handle to the identity material submitted during the handshake.
///
/// The handshake never reads the bytes behind the handle; the messaging
/// client does. The handle is read-only for the duration of the handshake.
#[derive(Debug, Clone)]
pub struct CredentialHandle {
    path: PathBuf,
}

impl CredentialHandle {
    /// Reference a credential stored at `path` (a key/entity file).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Callback invoked by the client when the overlay acknowledges a credential.
///
/// Fires on an unspecified thread. A well-behaved client invokes it exactly
/// once per successful submission, but the handshake tolerates duplicates.
pub type AckHandler = Box<dyn Fn(Response) + Send + Sync + 'static>;

/// The overlay transport consumed by the handshake.
///
/// The instance is shared with the caller (the handshake does not own it) and
/// must tolerate use from the handshake's background task.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Establish the transport session.
    ///
    /// # Errors
    /// [`InitError::Connection`](crate::InitError::Connection) on any
    /// transport-level failure.
    async fn connect(&self) -> Result<()>;

    /// Transmit the credential to authenticate the session.
    ///
    /// On success, `on_ack` is invoked once the overlay responds —
    /// asynchronously, on a thread of the client's choosing. A synchronous
    /// invocation from inside this call is also legal.
    ///
    /// # Errors
    /// [`InitError::Submission`](crate::InitError::Submission) if the
    /// credential could not be transmitted. In that case `on_ack` is never
    /// invoked.
    async fn submit_credential(
        &self,
        credential: &CredentialHandle,
        on_ack: AckHandler,
    ) -> Result<()>;
}
