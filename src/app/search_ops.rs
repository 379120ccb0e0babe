use std::time::Instant;

use crate::command::ActionId;
use crate::navigate::search_url;
use crate::suggest::{QueryChange, SuggestEvent};
use crate::widget::SearchBoxEffect;

use super::core::App;

impl App {
    pub(crate) fn apply_search_effect(&mut self, effect: SearchBoxEffect, now: Instant) {
        match effect {
            SearchBoxEffect::QueryChanged(text) => {
                self.search.worker.cancel_all();
                if let QueryChange::Scheduled { due } =
                    self.search.debounce.on_query_changed(&text, now)
                {
                    tracing::trace!(
                        delay_ms = due.saturating_duration_since(now).as_millis() as u64,
                        "suggestion fetch scheduled"
                    );
                }
            }
            SearchBoxEffect::Navigate(text) => self.navigate_search(&text, now),
            SearchBoxEffect::EngineChosen(index) => {
                self.search.debounce.invalidate();
                self.search.worker.cancel_all();
                if self.search.engines.set_preferred_index(index) {
                    let label = self.search.engines.preferred().label.clone();
                    self.state
                        .set_status(ActionId::SelectEngine, format!("search engine: {label}"));
                }
            }
        }
    }

    fn navigate_search(&mut self, text: &str, now: Instant) {
        let url = search_url(self.search.engines.preferred(), text);
        match self.navigator_mut().open(&url) {
            Ok(()) => {
                self.state
                    .set_status(ActionId::Navigate, format!("opened {url}"));
                let effect = self.search.search_box.finish_navigation();
                self.apply_search_effect(effect, now);
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "navigation failed");
                self.state
                    .set_status(ActionId::Navigate, format!("failed to open {url}: {err}"));
            }
        }
    }

    /// Sends the debounced query to the worker once its quiet period is over.
    pub(crate) fn poll_debounce(&mut self, now: Instant) -> bool {
        let Some(issued) = self.search.debounce.poll_due(now) else {
            return false;
        };
        self.search
            .worker
            .submit(self.search.engines.preferred(), issued);
        true
    }

    /// Lands a response if it belongs to the latest issued request.
    pub(crate) fn apply_suggest_event(&mut self, event: SuggestEvent) -> bool {
        if !self.search.debounce.is_current(event.seq) {
            tracing::trace!(seq = event.seq, "discarding superseded suggestions");
            return false;
        }
        let mut suggestions = event.suggestions;
        suggestions.truncate(self.search.max_suggestions);
        tracing::debug!(
            seq = event.seq,
            query = %event.query,
            count = suggestions.len(),
            "suggestions received"
        );
        self.search.search_box.apply_suggestions(suggestions);
        true
    }

    pub(crate) fn drain_suggestions(&mut self) -> bool {
        let mut changed = false;
        for event in self.search.worker.drain_events() {
            changed |= self.apply_suggest_event(event);
        }
        changed
    }

    pub(crate) fn poll_timers(&mut self, now: Instant) -> bool {
        let issued = self.poll_debounce(now);
        let blurred = self.search.search_box.poll_blur(now);
        issued || blurred
    }

    /// Earliest moment a timer needs the loop's attention.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (
            self.search.debounce.deadline(),
            self.search.search_box.blur_deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
