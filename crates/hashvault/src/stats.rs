//! Request-latency aggregation.
//!
//! [`RequestStats`] accumulates a request count and a cumulative duration
//! under one mutex, so a concurrent reader never observes the count
//! incremented without the matching duration added (or vice versa). The
//! derived average is recomputed on demand by [`snapshot`](RequestStats::snapshot).

use crate::StatsSnapshot;
use core::time::Duration;
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct StatsInner {
    count: u64,
    total_micros: u64,
}

/// A concurrency-safe accumulator of request count and total duration.
///
/// The timing layer records every inbound request here, regardless of the
/// request's outcome. This aggregator is independent of the store and the
/// two are never locked together.
#[derive(Debug, Default)]
pub struct RequestStats {
    inner: Mutex<StatsInner>,
}

impl RequestStats {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed request: increments the count and adds the
    /// elapsed wall-clock duration, both under one critical section.
    pub fn record(&self, elapsed: Duration) {
        let mut inner = self.inner.lock();
        inner.count += 1;
        inner.total_micros += elapsed.as_micros() as u64;
    }

    /// Returns an immutable copy of the current totals with the average
    /// recomputed.
    ///
    /// The average is the integer division of total microseconds by the
    /// count, or 0 when nothing has been recorded.
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock();
        let average = if inner.count == 0 {
            0
        } else {
            inner.total_micros / inner.count
        };
        StatsSnapshot {
            total: inner.count,
            average,
        }
    }
}
