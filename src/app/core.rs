use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, SUGGESTION_LIMIT};
use crate::engine::{
    EngineRegistry, EngineSelection, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
use crate::error::{AppError, AppResult};
use crate::navigate::{BrowserNavigator, Navigator};
use crate::suggest::{DebounceController, HttpTransport, SuggestTransport, SuggestWorker};
use crate::widget::SearchBox;

use super::state::AppState;

pub struct SearchSubsystem {
    pub engines: EngineSelection,
    pub search_box: SearchBox,
    pub debounce: DebounceController,
    pub worker: SuggestWorker,
    pub blur_grace: Duration,
    pub max_suggestions: usize,
}

pub struct App {
    pub state: AppState,
    pub search: SearchSubsystem,
    pub config: Config,
    navigator: Box<dyn Navigator>,
}

impl App {
    /// Wires the real preference file, browser, and HTTP transport.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(config: Config) -> AppResult<Self> {
        let store: Box<dyn PreferenceStore> = match config.storage.resolved_preference_path() {
            Some(path) => Box::new(FilePreferenceStore::new(path)),
            None => {
                tracing::warn!("no data directory found, engine preference will not persist");
                Box::new(MemoryPreferenceStore::default())
            }
        };
        let transport = Arc::new(HttpTransport::new(
            &config.suggest,
            config.search.max_suggestions.clamp(1, SUGGESTION_LIMIT),
        )?);
        Self::with_parts(config, store, Box::new(BrowserNavigator), transport)
    }

    pub fn with_parts(
        config: Config,
        store: Box<dyn PreferenceStore>,
        navigator: Box<dyn Navigator>,
        transport: Arc<dyn SuggestTransport>,
    ) -> AppResult<Self> {
        let registry = EngineRegistry::from_configured(config.engines.clone());
        let engines = EngineSelection::load(registry, store);
        tracing::debug!(engine = %engines.preferred().id, "search engine restored");

        Ok(Self {
            state: AppState::new(&config.feeds.wallpaper_host),
            search: SearchSubsystem {
                engines,
                search_box: SearchBox::new(),
                debounce: DebounceController::new(Duration::from_millis(
                    config.search.debounce_ms,
                )),
                worker: SuggestWorker::new(transport)?,
                blur_grace: Duration::from_millis(config.search.blur_grace_ms),
                max_suggestions: config.search.max_suggestions.clamp(1, SUGGESTION_LIMIT),
            },
            config,
            navigator,
        })
    }

    /// Uses `id` for this session without touching the stored preference.
    pub fn override_engine(&mut self, id: &str) -> AppResult<()> {
        if self.search.engines.override_for_session(id) {
            return Ok(());
        }
        let known = self
            .search
            .engines
            .list()
            .iter()
            .map(|engine| engine.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(AppError::invalid_argument(format!(
            "unknown engine `{id}` (known: {known})"
        )))
    }

    pub(crate) fn navigator_mut(&mut self) -> &mut dyn Navigator {
        self.navigator.as_mut()
    }
}
