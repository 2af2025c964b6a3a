//! The synchronous façade over the encoding pipeline.
//!
//! [`EncodingService`] is what the HTTP layer holds in its router state:
//! a cheaply cloneable handle owning the store and the request statistics.
//! `submit` blocks only until the background task has produced its ticket;
//! the fixed encoding delay never sits on the submission path.

use crate::{
    DEFAULT_ENCODE_DELAY, DigestKey, DigestStore, EncodingTicket, Error, RequestStats, Result,
    StatsSnapshot, worker,
};
use core::time::Duration;
use std::sync::Arc;

/// Accepts submissions, answers lookups, and reports request statistics.
///
/// The store and the aggregator are explicitly owned, long-lived values
/// injected here rather than process-wide singletons; tests construct a
/// fresh service per case and get fully isolated state.
#[derive(Debug, Clone)]
pub struct EncodingService {
    store: Arc<DigestStore>,
    stats: Arc<RequestStats>,
    encode_delay: Duration,
}

impl Default for EncodingService {
    fn default() -> Self {
        Self::new(DEFAULT_ENCODE_DELAY)
    }
}

impl EncodingService {
    /// Creates a service with a fresh store and aggregator and the given
    /// background encoding delay.
    pub fn new(encode_delay: Duration) -> Self {
        Self::with_state(
            Arc::new(DigestStore::new()),
            Arc::new(RequestStats::new()),
            encode_delay,
        )
    }

    /// Builds a service around explicitly owned collaborators.
    pub fn with_state(
        store: Arc<DigestStore>,
        stats: Arc<RequestStats>,
        encode_delay: Duration,
    ) -> Self {
        Self {
            store,
            stats,
            encode_delay,
        }
    }

    /// Accepts a credential for background encoding and returns its ticket.
    ///
    /// A missing credential fails with [`Error::InvalidRequest`] before any
    /// work is dispatched; an empty credential is a valid submission. The
    /// await resolves as soon as the spawned task has allocated a key and
    /// handed its ticket back — expected to be fast, with no fixed delay on
    /// this path.
    pub async fn submit(&self, plaintext: Option<String>) -> Result<EncodingTicket> {
        let plaintext = plaintext.ok_or_else(|| Error::InvalidRequest {
            reason: "missing `password` field".to_string(),
        })?;

        let ticket_rx = worker::spawn(Arc::clone(&self.store), plaintext, self.encode_delay);
        ticket_rx.await.map_err(|_| Error::ChannelError {
            context: "encoding task dropped its ticket channel".to_string(),
        })
    }

    /// Looks up the stored value for a key token taken from a lookup URL.
    ///
    /// The token must parse as a non-negative integer
    /// ([`Error::InvalidRequest`] otherwise). A key that was never
    /// allocated fails with [`Error::KeyNotFound`]; an allocated key whose
    /// digest is still pending returns the empty placeholder.
    pub fn lookup(&self, token: &str) -> Result<String> {
        let key = token
            .parse::<DigestKey>()
            .map_err(|err| Error::InvalidRequest {
                reason: format!("invalid key `{token}`: {err}"),
            })?;
        self.store.get(key)
    }

    /// Records one completed inbound request in the aggregator.
    pub fn record_request(&self, elapsed: Duration) {
        self.stats.record(elapsed);
    }

    /// Returns the current request statistics.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
