use serde::Deserialize;

/// Where an engine's autocomplete candidates come from.
///
/// Routing is per engine so one provider can serve several engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestProvider {
    Google,
    Bing,
    Baidu,
    Yandex,
    None,
}

impl SuggestProvider {
    pub fn id(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::Baidu => "baidu",
            Self::Yandex => "yandex",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchEngine {
    pub id: String,
    pub label: String,
    pub submit_url: String,
    pub query_param: String,
    /// `#rrggbb` or a named terminal color.
    pub accent_color: String,
    pub badge: char,
    pub suggest: SuggestProvider,
}

impl SearchEngine {
    fn builtin(
        id: &str,
        label: &str,
        submit_url: &str,
        query_param: &str,
        accent_color: &str,
        badge: char,
        suggest: SuggestProvider,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            submit_url: submit_url.to_string(),
            query_param: query_param.to_string(),
            accent_color: accent_color.to_string(),
            badge,
            suggest,
        }
    }

    fn is_usable(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.submit_url.trim().is_empty()
            && !self.query_param.trim().is_empty()
    }
}

pub fn default_engines() -> Vec<SearchEngine> {
    vec![
        SearchEngine::builtin(
            "bing",
            "Bing",
            "https://cn.bing.com/search",
            "q",
            "#0c8484",
            'B',
            SuggestProvider::Bing,
        ),
        SearchEngine::builtin(
            "google",
            "Google",
            "https://www.google.com/search",
            "q",
            "#4285f4",
            'G',
            SuggestProvider::Google,
        ),
        SearchEngine::builtin(
            "baidu",
            "Baidu",
            "https://www.baidu.com/s",
            "wd",
            "#2932e1",
            'D',
            SuggestProvider::Baidu,
        ),
        // Served by the Google provider unless reconfigured.
        SearchEngine::builtin(
            "yandex",
            "Yandex",
            "https://yandex.com/search/",
            "text",
            "#fc3f1d",
            'Y',
            SuggestProvider::Google,
        ),
    ]
}

/// Fixed, ordered engine list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRegistry {
    engines: Vec<SearchEngine>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self {
            engines: default_engines(),
        }
    }
}

impl EngineRegistry {
    /// Builds a registry from configured engines, dropping unusable entries and
    /// duplicate ids. Falls back to the built-in list when nothing survives.
    pub fn from_configured(configured: Vec<SearchEngine>) -> Self {
        let mut engines: Vec<SearchEngine> = Vec::with_capacity(configured.len());
        for engine in configured {
            if !engine.is_usable() {
                tracing::warn!(id = %engine.id, "ignoring incomplete engine definition");
                continue;
            }
            if engines.iter().any(|existing| existing.id == engine.id) {
                tracing::warn!(id = %engine.id, "ignoring duplicate engine id");
                continue;
            }
            engines.push(engine);
        }

        if engines.is_empty() {
            return Self::default();
        }
        Self { engines }
    }

    pub fn list(&self) -> &[SearchEngine] {
        &self.engines
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn first(&self) -> &SearchEngine {
        &self.engines[0]
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.engines.iter().position(|engine| engine.id == id)
    }

    /// Looks up `id`, falling back to the first entry.
    pub fn get(&self, id: &str) -> &SearchEngine {
        self.position(id)
            .map(|idx| &self.engines[idx])
            .unwrap_or_else(|| self.first())
    }

    pub fn at(&self, index: usize) -> Option<&SearchEngine> {
        self.engines.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineRegistry, SearchEngine, SuggestProvider, default_engines};

    fn engine(id: &str, submit_url: &str) -> SearchEngine {
        SearchEngine {
            id: id.to_string(),
            label: id.to_uppercase(),
            submit_url: submit_url.to_string(),
            query_param: "q".to_string(),
            accent_color: "white".to_string(),
            badge: 'X',
            suggest: SuggestProvider::None,
        }
    }

    #[test]
    fn default_registry_keeps_declared_order() {
        let registry = EngineRegistry::default();
        let ids: Vec<&str> = registry.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["bing", "google", "baidu", "yandex"]);
        assert_eq!(registry.first().id, "bing");
    }

    #[test]
    fn get_falls_back_to_first_entry_for_unknown_ids() {
        let registry = EngineRegistry::default();
        assert_eq!(registry.get("google").label, "Google");
        assert_eq!(registry.get("altavista").id, "bing");
        assert_eq!(registry.get("").id, "bing");
    }

    #[test]
    fn yandex_is_routed_to_google_suggestions_by_default() {
        let yandex = default_engines()
            .into_iter()
            .find(|e| e.id == "yandex")
            .expect("yandex should be built in");
        assert_eq!(yandex.suggest, SuggestProvider::Google);
        assert_eq!(yandex.query_param, "text");
    }

    #[test]
    fn from_configured_drops_duplicates_and_incomplete_entries() {
        let registry = EngineRegistry::from_configured(vec![
            engine("one", "https://one.example/search"),
            engine("", "https://blank.example/search"),
            engine("one", "https://dup.example/search"),
            engine("two", ""),
            engine("three", "https://three.example/search"),
        ]);
        let ids: Vec<&str> = registry.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["one", "three"]);
        assert_eq!(registry.get("one").submit_url, "https://one.example/search");
    }

    #[test]
    fn from_configured_falls_back_to_defaults_when_empty() {
        assert_eq!(EngineRegistry::from_configured(Vec::new()), EngineRegistry::default());
        assert_eq!(
            EngineRegistry::from_configured(vec![engine("", "")]),
            EngineRegistry::default()
        );
    }
}
