//! overlay-init — one-shot initialization handshake for overlay clients
//!
//! A client of the publish/subscribe overlay is not ready the moment its
//! transport connects: the overlay must also accept the client's identity
//! credential. This crate runs that two-step handshake off the caller's task
//! and reports exactly one terminal outcome back to it.
//!
//! # Architecture
//!
//! The crate is organized by concern, with each module having a single
//! responsibility:
//!
//! | Module      | Responsibility                                         |
//! |-------------|--------------------------------------------------------|
//! | `client`    | What the handshake needs from the overlay transport    |
//! | `signal`    | Rendezvous between the ack callback and the body       |
//! | `handshake` | Orchestration: connect → submit → await → report       |
//! | `listener`  | Outcome delivery back on the caller's task             |
//! | `error`     | Error taxonomy                                         |
//!
//! # Key Design Principles
//!
//! ## 1. One Attempt, One Outcome
//!
//! - `InitHandshake::start()` consumes the handshake
//! - `HandshakeHandle::complete()` consumes the handle
//! - The listener therefore fires exactly once per attempt — success,
//!   failure, or cancellation, but always exactly once
//!
//! ## 2. Channels, Not Flags
//!
//! - The acknowledgment callback releases a single-slot signal; the body
//!   waits on it — no shared mutable state between the client's I/O thread
//!   and the background task
//! - The outcome travels over a oneshot channel to the caller's task; there
//!   is no "done" boolean to poll
//!
//! ## 3. No Silent Failures
//!
//! - Connect and submission errors are captured into the outcome, never
//!   printed and forgotten inside the background task
//! - A listener notification means the handshake *ended*; callers branch on
//!   the outcome to learn how
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use overlay_init::{CredentialHandle, InitHandshake};
//!
//! let client: Arc<dyn overlay_init::MessagingClient> = build_client();
//! let credential = CredentialHandle::from_path("/var/lib/overlay/agent.key");
//!
//! let handshake = InitHandshake::new(client, credential, |outcome| {
//!     // runs on this task, exactly once
//!     println!("overlay init: {:?}", outcome);
//! });
//!
//! let handle = handshake.start();
//! // ... the caller's task stays responsive here ...
//! let outcome = handle.complete().await;
//! ```

// Overlay transport capability
pub mod client;

// Error types
pub mod error;

// Orchestration core
pub mod handshake;

// Outcome delivery
pub mod listener;

// Internal rendezvous primitive - owned by the handshake, not exposed
mod signal;

// Re-export the public API
pub use client::{AckHandler, CredentialHandle, MessagingClient, Response};
pub use error::{InitError, Result};
pub use handshake::{HandshakeConfig, HandshakeHandle, InitHandshake};
pub use listener::{HandshakeOutcome, InitListener};
