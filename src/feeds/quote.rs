use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quote {
    #[serde(alias = "hitokoto")]
    pub text: String,
    #[serde(default)]
    pub from: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            text: "你若林间溪水，萦绕白杨良辰。".to_string(),
            from: "林若溪&杨辰".to_string(),
        }
    }
}

pub fn parse_quote(body: &str) -> AppResult<Quote> {
    let quote: Quote =
        serde_json::from_str(body).map_err(|source| AppError::json(source, "quote feed"))?;
    if quote.text.trim().is_empty() {
        return Err(AppError::invalid_argument("quote feed returned empty text"));
    }
    Ok(quote)
}

/// Returns `None` when the feed is unreachable or malformed.
pub async fn load_quote(client: &reqwest::Client, url: &str) -> Option<Quote> {
    let outcome = match super::get_text(client, url).await {
        Ok(body) => parse_quote(&body),
        Err(err) => Err(err),
    };
    match outcome {
        Ok(quote) => Some(quote),
        Err(err) => {
            tracing::debug!(%url, error = %err, "quote feed unavailable, keeping default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Quote, parse_quote};

    #[test]
    fn parses_hitokoto_payload() {
        let body = r#"{"id":1,"hitokoto":"山有木兮木有枝","type":"i","from":"越人歌","creator":"x"}"#;
        assert_eq!(
            parse_quote(body).expect("payload parses"),
            Quote {
                text: "山有木兮木有枝".to_string(),
                from: "越人歌".to_string(),
            }
        );
    }

    #[test]
    fn parses_plain_text_payload_without_source() {
        let quote = parse_quote(r#"{"text":"hello"}"#).expect("payload parses");
        assert_eq!(quote.text, "hello");
        assert_eq!(quote.from, "");
    }

    #[test]
    fn rejects_malformed_or_empty_payloads() {
        assert!(parse_quote("[]").is_err());
        assert!(parse_quote(r#"{"hitokoto":"  ","from":"x"}"#).is_err());
    }

    #[test]
    fn default_quote_is_the_page_motto() {
        assert_eq!(Quote::default().from, "林若溪&杨辰");
    }
}
