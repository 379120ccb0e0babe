mod registry;
mod selection;
mod store;

pub use registry::{EngineRegistry, SearchEngine, SuggestProvider, default_engines};
pub use selection::{EngineSelection, PREFERRED_ENGINE_KEY};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
