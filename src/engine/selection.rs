use super::registry::{EngineRegistry, SearchEngine};
use super::store::PreferenceStore;

pub const PREFERRED_ENGINE_KEY: &str = "search-engine";

/// The active engine plus the store that remembers it between sessions.
///
/// `current` always indexes into `registry`.
pub struct EngineSelection {
    registry: EngineRegistry,
    current: usize,
    store: Box<dyn PreferenceStore>,
}

impl EngineSelection {
    /// Reads the stored preference, falling back to the first registry entry
    /// when it is absent or names an unknown engine.
    pub fn load(registry: EngineRegistry, store: Box<dyn PreferenceStore>) -> Self {
        let current = match store.get(PREFERRED_ENGINE_KEY) {
            Some(id) => registry.position(&id).unwrap_or_else(|| {
                tracing::debug!(%id, "stored engine is not registered, using default");
                0
            }),
            None => 0,
        };
        Self {
            registry,
            current,
            store,
        }
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn list(&self) -> &[SearchEngine] {
        self.registry.list()
    }

    pub fn get(&self, id: &str) -> &SearchEngine {
        self.registry.get(id)
    }

    pub fn preferred(&self) -> &SearchEngine {
        &self.registry.list()[self.current]
    }

    pub fn preferred_index(&self) -> usize {
        self.current
    }

    /// Switches the active engine and persists it. A failed write is logged
    /// and the in-memory selection still changes. Unknown ids are ignored.
    pub fn set_preferred(&mut self, id: &str) -> bool {
        let Some(index) = self.registry.position(id) else {
            tracing::debug!(%id, "ignoring selection of unknown engine");
            return false;
        };
        self.current = index;
        if let Err(err) = self.store.set(PREFERRED_ENGINE_KEY, id) {
            tracing::warn!(%id, error = %err, "failed to persist engine preference");
        }
        true
    }

    pub fn set_preferred_index(&mut self, index: usize) -> bool {
        let Some(id) = self.registry.at(index).map(|engine| engine.id.clone()) else {
            return false;
        };
        self.set_preferred(&id)
    }

    /// Session-only override that leaves the stored preference untouched.
    pub fn override_for_session(&mut self, id: &str) -> bool {
        match self.registry.position(id) {
            Some(index) => {
                self.current = index;
                true
            }
            None => false,
        }
    }
}
