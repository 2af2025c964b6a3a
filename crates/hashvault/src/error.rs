//! Error types for the credential-encoding service.
//!
//! This module defines the central `Error` enum, which captures all
//! reportable error cases within the encoding pipeline. The HTTP layer maps
//! each variant onto a response status; background tasks report failures
//! through `tracing` instead, since their caller has already been answered.
//!
//! ## Error Cases
//! - `InvalidRequest`: The submission or lookup key token was malformed.
//! - `KeyNotFound`: A lookup or update referenced a key that was never
//!   allocated.
//! - `ChannelError`: An internal handoff failure between tasks (e.g. the
//!   encoding task dropped its ticket channel).

use crate::DigestKey;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the encoding service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The request was invalid: a missing credential field or a key token
    /// that does not parse as a non-negative integer.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// No entry has ever been allocated under this key.
    #[error("No encoding stored under key {key}")]
    KeyNotFound { key: DigestKey },

    /// Internal channel send/receive failure (e.g., a dropped oneshot).
    #[error("Channel error: {context}")]
    ChannelError { context: String },
}
