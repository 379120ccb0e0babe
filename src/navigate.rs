use crate::engine::SearchEngine;
use crate::error::AppResult;

/// Builds `submit_url?query_param=<percent-encoded text>`.
pub fn search_url(engine: &SearchEngine, text: &str) -> String {
    let separator = if engine.submit_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        engine.submit_url,
        separator,
        engine.query_param,
        urlencoding::encode(text)
    )
}

/// Hands a URL to whatever displays web pages.
pub trait Navigator: Send {
    fn open(&mut self, url: &str) -> AppResult<()>;
}

/// Opens URLs in the system browser.
#[derive(Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&mut self, url: &str) -> AppResult<()> {
        tracing::info!(%url, "opening in browser");
        open::that_detached(url).map_err(|source| {
            crate::error::AppError::io_with_context(source, format!("failed to open {url}"))
        })
    }
}
