mod search_flow;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::config::Config;
use crate::engine::{PreferenceStore, SearchEngine};
use crate::error::{AppError, AppResult};
use crate::navigate::Navigator;
use crate::suggest::{SuggestEvent, SuggestTransport};

/// Answers `"{query} 1"`, `"{query} 2"` after a delay; `slow` queries take
/// longer. Every call is recorded as `(engine id, query)`.
#[derive(Clone, Default)]
pub(super) struct ScriptedTransport {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedTransport {
    pub(super) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(super) fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|(_, query)| query).collect()
    }
}

impl SuggestTransport for ScriptedTransport {
    fn fetch(
        &self,
        engine: &SearchEngine,
        query: &str,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, Vec<String>> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((engine.id.clone(), query.to_string()));
        let delay = if query.starts_with("slow") {
            Duration::from_millis(500)
        } else {
            Duration::from_millis(20)
        };
        let answers = vec![format!("{query} 1"), format!("{query} 2")];
        Box::pin(async move {
            tokio::select! {
                _ = cancel.cancelled() => Vec::new(),
                _ = tokio::time::sleep(delay) => answers,
            }
        })
    }
}

#[derive(Clone, Default)]
pub(super) struct SharedStore {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl PreferenceStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("store lock").get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .lock()
            .expect("store lock")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub(super) struct FailingStore;

impl PreferenceStore for FailingStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::storage("storage disabled"))
    }
}

#[derive(Clone, Default)]
pub(super) struct RecordingNavigator {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    pub(super) fn opened(&self) -> Vec<String> {
        self.opened.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, url: &str) -> AppResult<()> {
        self.opened.lock().expect("navigator lock").push(url.to_string());
        Ok(())
    }
}

pub(super) struct Harness {
    pub app: App,
    pub transport: ScriptedTransport,
    pub navigator: RecordingNavigator,
}

pub(super) fn harness_with_store(store: Box<dyn PreferenceStore>) -> Harness {
    let transport = ScriptedTransport::default();
    let navigator = RecordingNavigator::default();
    let app = App::with_parts(
        Config::default(),
        store,
        Box::new(navigator.clone()),
        Arc::new(transport.clone()),
    )
    .expect("app should build inside a runtime");
    Harness {
        app,
        transport,
        navigator,
    }
}

pub(super) fn harness() -> Harness {
    harness_with_store(Box::new(SharedStore::default()))
}

pub(super) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub(super) fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

pub(super) fn type_text(app: &mut App, text: &str, now: Instant) {
    for ch in text.chars() {
        app.handle_key_event(key(KeyCode::Char(ch)), now)
            .expect("typing should not fail");
    }
}

pub(super) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

pub(super) async fn next_suggestions(app: &mut App) -> SuggestEvent {
    tokio::time::timeout(Duration::from_secs(5), app.search.worker.recv_result())
        .await
        .expect("suggestions should arrive")
        .expect("worker channel stays open")
}
