use serde_json::Value;

use crate::engine::{SearchEngine, SuggestProvider};

/// Payload layouts returned by suggestion endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[query, [[suggestion, ...features], ...]]`
    Nested,
    /// `[query, [suggestion, ...]]`
    Flat,
    /// `{ "g": [{ "q": suggestion }, ...] }`
    KeyedObjects,
    /// `[suggestion, ...]`, or the flat shape.
    Uniform,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestEndpoint {
    pub url: String,
    pub shape: ResponseShape,
}

/// Resolves where to ask for `query` completions for `engine`.
///
/// With a proxy every engine goes through the proxy's uniform endpoint.
/// Returns `None` when the engine has no suggestion source.
pub fn endpoint_for(
    engine: &SearchEngine,
    query: &str,
    proxy_url: Option<&str>,
) -> Option<SuggestEndpoint> {
    let encoded = urlencoding::encode(query);

    if let Some(proxy) = proxy_url {
        let separator = if proxy.contains('?') { '&' } else { '?' };
        let engine_id = urlencoding::encode(&engine.id);
        return Some(SuggestEndpoint {
            url: format!("{proxy}{separator}engine={engine_id}&q={encoded}"),
            shape: ResponseShape::Uniform,
        });
    }

    let (url, shape) = match engine.suggest {
        SuggestProvider::Google => (
            format!("https://www.google.com/complete/search?client=psy-ab&hl=zh-CN&q={encoded}"),
            ResponseShape::Nested,
        ),
        SuggestProvider::Bing => (
            format!("https://api.bing.com/osjson.aspx?query={encoded}"),
            ResponseShape::Flat,
        ),
        SuggestProvider::Yandex => (
            format!("https://suggest.yandex.com/suggest-ff.cgi?part={encoded}"),
            ResponseShape::Flat,
        ),
        SuggestProvider::Baidu => (
            format!("https://www.baidu.com/sugrec?prod=pc&wd={encoded}"),
            ResponseShape::KeyedObjects,
        ),
        SuggestProvider::None => return None,
    };
    Some(SuggestEndpoint { url, shape })
}

/// Extracts at most `limit` suggestions from a provider payload.
///
/// Anything that does not match `shape` yields an empty list.
pub fn parse_suggestions(shape: ResponseShape, body: &str, limit: usize) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(strip_wrappers(body)) else {
        return Vec::new();
    };

    let candidates: Vec<String> = match shape {
        ResponseShape::Nested => second_element(&value)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.as_array()?.first()?.as_str())
                    .map(strip_markup)
                    .collect()
            })
            .unwrap_or_default(),
        ResponseShape::Flat => second_element(&value)
            .map(|entries| owned_strings(entries))
            .unwrap_or_default(),
        ResponseShape::KeyedObjects => value
            .get("g")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("q")?.as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default(),
        ResponseShape::Uniform => match second_element(&value) {
            Some(entries) => owned_strings(entries),
            None => value
                .as_array()
                .map(|entries| owned_strings(entries))
                .unwrap_or_default(),
        },
    };

    candidates
        .into_iter()
        .filter(|candidate| !candidate.trim().is_empty())
        .take(limit)
        .collect()
}

fn owned_strings(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

/// Drops inline HTML tags (Google bolds the completed part) and decodes the
/// few entities those payloads use.
fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => plain.push(ch),
            _ => {}
        }
    }
    plain
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

fn second_element(value: &Value) -> Option<&Vec<Value>> {
    value.as_array()?.get(1)?.as_array()
}

/// Removes an XSSI guard and a `callback(...)` wrapper, if present.
fn strip_wrappers(body: &str) -> &str {
    let mut body = body.trim();
    if let Some(rest) = body.strip_prefix(")]}'") {
        body = rest.trim_start();
    }
    if body.starts_with('[') || body.starts_with('{') {
        return body;
    }

    let body = body.trim_end_matches(';').trim_end();
    match (body.find('('), body.rfind(')')) {
        (Some(open), Some(close)) if open < close => body[open + 1..close].trim(),
        _ => body,
    }
}
