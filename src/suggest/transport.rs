use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::config::SuggestConfig;
use crate::engine::SearchEngine;
use crate::error::{AppError, AppResult};

use super::provider::{endpoint_for, parse_suggestions};

/// Fetches autocomplete candidates for one query.
///
/// Implementations never fail: network errors, timeouts, refusals, and
/// malformed payloads all resolve to an empty list. A cancelled request
/// resolves early, and its result is ignored by the caller.
pub trait SuggestTransport: Send + Sync {
    fn fetch(
        &self,
        engine: &SearchEngine,
        query: &str,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, Vec<String>>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
    proxy_url: Option<String>,
    limit: usize,
}

impl HttpTransport {
    pub fn new(config: &SuggestConfig, limit: usize) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mhome/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| AppError::http(source, "failed to build suggestion client"))?;
        Ok(Self {
            client,
            timeout: Duration::from_millis(config.timeout_ms),
            proxy_url: config.proxy_url.clone(),
            limit: limit.max(1),
        })
    }
}

impl SuggestTransport for HttpTransport {
    fn fetch(
        &self,
        engine: &SearchEngine,
        query: &str,
        cancel: CancellationToken,
    ) -> BoxFuture<'static, Vec<String>> {
        let Some(endpoint) = endpoint_for(engine, query, self.proxy_url.as_deref()) else {
            return Box::pin(async { Vec::new() });
        };
        let client = self.client.clone();
        let timeout = self.timeout;
        let limit = self.limit;
        let engine_id = engine.id.clone();

        Box::pin(async move {
            let request = fetch_body(&client, &endpoint.url);
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::trace!(engine = %engine_id, "suggestion request cancelled");
                    Vec::new()
                }
                outcome = tokio::time::timeout(timeout, request) => match outcome {
                    Ok(Ok(body)) => parse_suggestions(endpoint.shape, &body, limit),
                    Ok(Err(err)) => {
                        tracing::debug!(engine = %engine_id, error = %err, "suggestion request failed");
                        Vec::new()
                    }
                    Err(_) => {
                        tracing::debug!(
                            engine = %engine_id,
                            timeout_ms = timeout.as_millis() as u64,
                            "suggestion request timed out"
                        );
                        Vec::new()
                    }
                },
            }
        })
    }
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> AppResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| AppError::http(source, format!("GET {url}")))?
        .error_for_status()
        .map_err(|source| AppError::http(source, format!("GET {url}")))?;
    response
        .text()
        .await
        .map_err(|source| AppError::http(source, format!("reading body of {url}")))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_util::sync::CancellationToken;

    use crate::config::SuggestConfig;
    use crate::engine::{EngineRegistry, SuggestProvider};

    use super::{HttpTransport, SuggestTransport};

    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0_u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/suggest")
    }

    async fn serve_silently() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });
        format!("http://{addr}/suggest")
    }

    fn transport(proxy_url: String, timeout_ms: u64) -> HttpTransport {
        HttpTransport::new(
            &SuggestConfig {
                timeout_ms,
                proxy_url: Some(proxy_url),
            },
            8,
        )
        .expect("client should build")
    }

    #[tokio::test]
    async fn fetch_parses_proxy_response() {
        let url = serve_once("200 OK", r#"["rust","rust book","rustup"]"#).await;
        let transport = transport(url, 2000);
        let registry = EngineRegistry::default();

        let suggestions = transport
            .fetch(registry.get("bing"), "rus", CancellationToken::new())
            .await;
        assert_eq!(suggestions, vec!["rust", "rust book", "rustup"]);
    }

    #[tokio::test]
    async fn non_success_status_yields_no_suggestions() {
        let url = serve_once("503 Service Unavailable", r#"["rust"]"#).await;
        let transport = transport(url, 2000);
        let registry = EngineRegistry::default();

        let suggestions = transport
            .fetch(registry.get("bing"), "rus", CancellationToken::new())
            .await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_yields_no_suggestions() {
        let url = serve_once("200 OK", r#"{"error":"nope"}"#).await;
        let transport = transport(url, 2000);
        let registry = EngineRegistry::default();

        let suggestions = transport
            .fetch(registry.get("google"), "x", CancellationToken::new())
            .await;
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn silent_provider_times_out_to_empty() {
        let url = serve_silently().await;
        let transport = transport(url, 100);
        let registry = EngineRegistry::default();

        let started = Instant::now();
        let suggestions = transport
            .fetch(registry.get("bing"), "x", CancellationToken::new())
            .await;
        assert!(suggestions.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn cancellation_resolves_without_waiting_for_timeout() {
        let url = serve_silently().await;
        let transport = transport(url, 10_000);
        let registry = EngineRegistry::default();
        let cancel = CancellationToken::new();

        let pending = transport.fetch(registry.get("bing"), "x", cancel.clone());
        cancel.cancel();
        let started = Instant::now();
        assert!(pending.await.is_empty());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn engines_without_provider_resolve_immediately() {
        let transport = HttpTransport::new(&SuggestConfig::default(), 8).expect("client");
        let mut engine = EngineRegistry::default().first().clone();
        engine.suggest = SuggestProvider::None;

        let suggestions = transport
            .fetch(&engine, "anything", CancellationToken::new())
            .await;
        assert!(suggestions.is_empty());
    }
}
