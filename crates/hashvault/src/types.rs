//! # Shared Types and Constants
//!
//! This module defines the types and constants shared between the domain
//! core and the HTTP surface: the key type used by the store, the ticket
//! returned to submitters, and the statistics snapshot served by the stats
//! endpoint.

use chrono::{SecondsFormat, Utc};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// The key type under which encoded digests are stored.
///
/// Keys are allocated by [`DigestStore`](crate::DigestStore) starting at 1
/// and strictly increasing by one per allocation. They are never reused.
pub type DigestKey = u64;

/// Path prefix under which stored digests can be looked up.
///
/// A ticket's `url` is built as `"{LOOKUP_PATH}/{key}"` and the server
/// mounts its lookup route at the same prefix, so the two cannot drift
/// apart.
pub const LOOKUP_PATH: &str = "/hash";

/// How long a submission waits in the background before the digest is
/// computed and persisted.
pub const DEFAULT_ENCODE_DELAY: Duration = Duration::from_secs(5);

/// The immediate response to a submission: where the digest will appear and
/// when it is expected to be ready.
///
/// Produced exactly once per submission and handed back through a oneshot
/// channel before the encoding work begins. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingTicket {
    /// RFC3339 timestamp after which the digest is expected to be stored.
    pub time_available: String,

    /// Lookup location for the allocated key, e.g. `/hash/42`.
    pub url: String,
}

impl EncodingTicket {
    /// Builds the ticket for a freshly allocated `key`, estimating
    /// readiness as now plus `available_in`.
    pub fn new(key: DigestKey, available_in: Duration) -> Self {
        Self {
            time_available: (Utc::now() + available_in)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            url: format!("{LOOKUP_PATH}/{key}"),
        }
    }
}

/// An immutable copy of the request statistics at a point in time.
///
/// `average` is recomputed from the running totals on every snapshot; it is
/// `0` when no requests have been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Number of requests recorded so far.
    pub total: u64,

    /// Average request duration in microseconds (integer division).
    pub average: u64,
}
