use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel,
};
use tokio_util::sync::CancellationToken;

use crate::engine::SearchEngine;
use crate::error::{AppError, AppResult};

use super::debounce::IssuedQuery;
use super::transport::SuggestTransport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestEvent {
    pub seq: u64,
    pub query: String,
    pub suggestions: Vec<String>,
}

/// Requests currently on the wire, keyed by sequence number.
///
/// Entries are owned by an [`InFlightGuard`] and disappear when the request
/// finishes for any reason, including task abort.
#[derive(Debug, Clone, Default)]
pub struct InFlightTable {
    entries: Arc<Mutex<HashMap<u64, CancellationToken>>>,
}

impl InFlightTable {
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, CancellationToken>> {
        // A poisoned map is still structurally sound.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn register(&self, seq: u64) -> InFlightGuard {
        let token = CancellationToken::new();
        self.lock().insert(seq, token.clone());
        InFlightGuard {
            table: self.clone(),
            seq,
            token,
        }
    }

    /// Cancels every request issued before `seq`.
    pub fn cancel_older_than(&self, seq: u64) -> usize {
        let entries = self.lock();
        let mut cancelled = 0;
        for (_, token) in entries.iter().filter(|(entry_seq, _)| **entry_seq < seq) {
            if !token.is_cancelled() {
                token.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    pub fn cancel_all(&self) {
        for token in self.lock().values() {
            token.cancel();
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, seq: u64) -> bool {
        self.lock().contains_key(&seq)
    }
}

struct InFlightGuard {
    table: InFlightTable,
    seq: u64,
    token: CancellationToken,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.table.lock().remove(&self.seq);
    }
}

/// Runs suggestion fetches on the tokio runtime and reports completions.
///
/// Submitting a newer request cancels older ones still in flight; results of
/// cancelled requests are never reported.
pub struct SuggestWorker {
    transport: Arc<dyn SuggestTransport>,
    handle: Handle,
    event_tx: UnboundedSender<SuggestEvent>,
    event_rx: UnboundedReceiver<SuggestEvent>,
    in_flight: InFlightTable,
}

impl SuggestWorker {
    pub fn new(transport: Arc<dyn SuggestTransport>) -> AppResult<Self> {
        let handle = Handle::try_current()
            .map_err(|_| AppError::unsupported("suggestion worker requires a tokio runtime"))?;
        let (event_tx, event_rx) = unbounded_channel();
        Ok(Self {
            transport,
            handle,
            event_tx,
            event_rx,
            in_flight: InFlightTable::default(),
        })
    }

    pub fn in_flight(&self) -> &InFlightTable {
        &self.in_flight
    }

    pub fn submit(&mut self, engine: &SearchEngine, issued: IssuedQuery) {
        let IssuedQuery { seq, query } = issued;
        let superseded = self.in_flight.cancel_older_than(seq);
        if superseded > 0 {
            tracing::trace!(seq, superseded, "cancelled superseded suggestion requests");
        }

        let guard = self.in_flight.register(seq);
        let fetch = self
            .transport
            .fetch(engine, &query, guard.token.clone());
        let event_tx = self.event_tx.clone();
        tracing::debug!(seq, engine = %engine.id, %query, "suggestion request issued");

        self.handle.spawn(async move {
            let suggestions = fetch.await;
            let cancelled = guard.token.is_cancelled();
            drop(guard);
            if cancelled {
                return;
            }
            let _ = event_tx.send(SuggestEvent {
                seq,
                query,
                suggestions,
            });
        });
    }

    pub fn cancel_all(&self) {
        self.in_flight.cancel_all();
    }

    pub async fn recv_result(&mut self) -> Option<SuggestEvent> {
        self.event_rx.recv().await
    }

    pub fn drain_events(&mut self) -> Vec<SuggestEvent> {
        let mut drained = Vec::new();

        loop {
            match self.event_rx.try_recv() {
                Ok(event) => drained.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        drained
    }
}

impl Drop for SuggestWorker {
    fn drop(&mut self) {
        self.in_flight.cancel_all();
    }
}
