use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedQuery {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Blank input: nothing pending, nothing current.
    Cleared,
    Scheduled { due: Instant },
}

#[derive(Debug, Clone)]
struct PendingQuery {
    query: String,
    due: Instant,
}

/// Coalesces query edits into at most one request per quiet period and
/// decides which response is still allowed to land.
///
/// Sequence numbers increase monotonically; only `current` may update the
/// suggestion list, regardless of arrival order.
#[derive(Debug, Clone)]
pub struct DebounceController {
    quiet: Duration,
    pending: Option<PendingQuery>,
    next_seq: u64,
    current: Option<u64>,
}

impl DebounceController {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            next_seq: 1,
            current: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Restarts the quiet period for `text`. Blank text bypasses the timer.
    ///
    /// Either way any in-flight request stops being current.
    pub fn on_query_changed(&mut self, text: &str, now: Instant) -> QueryChange {
        self.current = None;
        if text.trim().is_empty() {
            self.pending = None;
            return QueryChange::Cleared;
        }

        let due = now + self.quiet;
        self.pending = Some(PendingQuery {
            query: text.to_string(),
            due,
        });
        QueryChange::Scheduled { due }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Issues the pending query once its quiet period has elapsed.
    pub fn poll_due(&mut self, now: Instant) -> Option<IssuedQuery> {
        if self.pending.as_ref()?.due > now {
            return None;
        }
        let pending = self.pending.take()?;

        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        self.current = Some(seq);
        Some(IssuedQuery {
            seq,
            query: pending.query,
        })
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.current == Some(seq)
    }

    pub fn current(&self) -> Option<u64> {
        self.current
    }

    /// Drops the pending query and orphans any in-flight request.
    pub fn invalidate(&mut self) {
        self.pending = None;
        self.current = None;
    }
}
