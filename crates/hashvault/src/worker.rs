//! The one-shot background encoding task behind every submission.
//!
//! Each task allocates its key synchronously, publishes the ticket through
//! a single-use oneshot handoff, then suspends for the configured delay
//! before computing and persisting the digest. The suspension holds no
//! store lock, so other submissions and lookups proceed freely while the
//! task sleeps. Tasks are fire-and-forget: no handle is retained, and
//! failures past the ticket handoff are only reported through `tracing`.

use crate::{DigestStore, EncodingTicket, encoder};
use core::time::Duration;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Spawns the encoding task for one submission and returns the receiving
/// half of its ticket handoff.
///
/// The receiver resolves as soon as the task has allocated its key; the
/// task itself keeps running long after the submitter has been answered.
pub(crate) fn spawn(
    store: Arc<DigestStore>,
    plaintext: String,
    delay: Duration,
) -> oneshot::Receiver<EncodingTicket> {
    let (ticket_tx, ticket_rx) = oneshot::channel();
    tokio::spawn(encode_and_persist(store, plaintext, delay, ticket_tx));
    ticket_rx
}

async fn encode_and_persist(
    store: Arc<DigestStore>,
    plaintext: String,
    delay: Duration,
    ticket_tx: oneshot::Sender<EncodingTicket>,
) {
    let key = store.insert("");

    if ticket_tx.send(EncodingTicket::new(key, delay)).is_err() {
        tracing::warn!(key, "submitter dropped before receiving its ticket");
    }

    tokio::time::sleep(delay).await;

    let encoded = encoder::encode(&plaintext);
    match store.update(key, encoded) {
        Ok(()) => tracing::debug!(key, "persisted encoded digest"),
        Err(err) => tracing::error!(key, %err, "failed to persist encoded digest"),
    }
}
