// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translation providers — the network edge of the pipeline.
//
// A provider makes one attempt per chunk and reports failure as an error.
// Falling back to the original text happens in `Translator`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sprachwerk_core::error::{Result, SprachwerkError};
use sprachwerk_core::{ProviderKind, TranslationConfig};
use tracing::{debug, instrument, warn};

/// What a provider handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// The whole text translated in one piece.
    Single(String),
    /// The text was translated in several pieces, one per run of source
    /// lines, in order.
    Segments(Vec<String>),
}

impl Translation {
    /// Collapse into one string, rejoining segments with newlines.
    pub fn into_text(self) -> String {
        match self {
            Self::Single(text) => text,
            Self::Segments(parts) => parts.join("\n"),
        }
    }
}

/// A remote (or stand-in) machine translation backend.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Translate `text` from `source` (or `"auto"`) into `target`.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation>;
}

/// Build the provider selected in configuration.
pub fn provider_from_config(config: &TranslationConfig) -> Result<Arc<dyn TranslationProvider>> {
    match config.provider {
        ProviderKind::Google => Ok(Arc::new(GoogleTranslateProvider::new(config)?)),
        ProviderKind::Disabled => Ok(Arc::new(DisabledProvider)),
    }
}

// ---------------------------------------------------------------------------
// Google Translate
// ---------------------------------------------------------------------------

/// Client for Google's public `translate_a/single` endpoint (`client=gtx`).
///
/// The text travels in a form-encoded POST body so long chunks never hit URL
/// length limits; the routing parameters stay in the query string.
///
/// Response shape: `[[["<translated>", "<source>", ...], ...], ...]`; the
/// translated pieces at `[0][*][0]` are concatenated.
pub struct GoogleTranslateProvider {
    http: reqwest::Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslateProvider {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sprachwerk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| {
                SprachwerkError::Translation(format!("cannot build HTTP client: {err}"))
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            max_chunk_chars: config.max_chunk_chars.max(1),
        })
    }

    async fn translate_chunk(&self, chunk: &str, source: &str, target: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.endpoint);
        let response = self
            .http
            .post(&url)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")])
            .form(&[("q", chunk)])
            .send()
            .await
            .map_err(|err| SprachwerkError::Translation(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SprachwerkError::Translation(format!(
                "provider returned HTTP {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| SprachwerkError::Translation(format!("unreadable response: {err}")))?;

        parse_gtx_response(&body)
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslateProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        debug!(chunks = chunks.len(), "Sending text to provider");

        if let [only] = chunks.as_slice() {
            let translated = self.translate_chunk(&only.text, source, target).await?;
            return Ok(Translation::Single(translated));
        }

        let mut segments = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let translated = self
                .translate_chunk(&chunk.text, source, target)
                .await
                .map_err(|err| {
                    warn!(chunk = index, %err, "Chunk translation failed");
                    err
                })?;
            attach(&mut segments, chunk.join, translated);
        }
        Ok(Translation::Segments(segments))
    }
}

/// Pull the translated text out of a `gtx` JSON body.
fn parse_gtx_response(body: &serde_json::Value) -> Result<String> {
    let segments = body.get(0).and_then(|v| v.as_array()).ok_or_else(|| {
        SprachwerkError::Translation("malformed response: missing segment array".into())
    })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(SprachwerkError::Translation("provider returned empty translation".into()));
    }
    Ok(translated)
}

/// How a chunk attaches to the text before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Join {
    /// Starts a new line.
    NewLine,
    /// Continues the same line after a single space.
    Space,
    /// Continues the same line directly.
    Nothing,
}

/// One request's worth of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chunk {
    pub text: String,
    pub join: Join,
}

/// Split `text` into pieces of at most `max_chars` characters.
///
/// Whole lines are packed together while they fit. A single line longer than
/// `max_chars` is split into pieces of its own, at the last space inside the
/// limit when there is one and mid-word otherwise. Feeding every chunk
/// through [`attach`] and joining the segments with `\n` restores the input.
pub(crate) fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let line_chars = line.chars().count();

        if let Some((mut buf, len)) = current.take() {
            if len + 1 + line_chars <= max_chars {
                buf.push('\n');
                buf.push_str(line);
                current = Some((buf, len + 1 + line_chars));
                continue;
            }
            chunks.push(Chunk {
                text: buf,
                join: Join::NewLine,
            });
        }

        if line_chars <= max_chars {
            current = Some((line.to_string(), line_chars));
            continue;
        }

        split_long_line(line, max_chars, &mut chunks);
    }

    if let Some((buf, _)) = current {
        chunks.push(Chunk {
            text: buf,
            join: Join::NewLine,
        });
    }
    chunks
}

fn split_long_line(line: &str, max_chars: usize, chunks: &mut Vec<Chunk>) {
    let chars: Vec<char> = line.chars().collect();
    let mut start = 0;
    let mut join = Join::NewLine;

    while start < chars.len() {
        let end = start + max_chars;
        if end >= chars.len() {
            chunks.push(Chunk {
                text: chars[start..].iter().collect(),
                join,
            });
            break;
        }

        // A space at `end` itself still leaves a full-length piece.
        let space = chars[start..=end].iter().rposition(|&c| c == ' ');
        match space {
            Some(offset) if offset > 0 && start + offset + 1 < chars.len() => {
                let cut = start + offset;
                chunks.push(Chunk {
                    text: chars[start..cut].iter().collect(),
                    join,
                });
                start = cut + 1;
                join = Join::Space;
            }
            _ => {
                chunks.push(Chunk {
                    text: chars[start..end].iter().collect(),
                    join,
                });
                start = end;
                join = Join::Nothing;
            }
        }
    }
}

/// Add a translated chunk to the segment list: a new segment per line, and
/// pieces of a split line glued back onto the segment they came from.
pub(crate) fn attach(segments: &mut Vec<String>, join: Join, text: String) {
    match (join, segments.last_mut()) {
        (Join::Space, Some(last)) => {
            last.push(' ');
            last.push_str(&text);
        }
        (Join::Nothing, Some(last)) => last.push_str(&text),
        _ => segments.push(text),
    }
}

// ---------------------------------------------------------------------------
// Disabled
// ---------------------------------------------------------------------------

/// Provider used when translation is switched off: every call fails, so the
/// pipeline hands back the original text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProvider;

#[async_trait]
impl TranslationProvider for DisabledProvider {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<Translation> {
        Err(SprachwerkError::TranslationDisabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> TranslationConfig {
        TranslationConfig {
            provider: ProviderKind::Google,
            endpoint: server.uri(),
            timeout_secs: 5,
            max_chunk_chars: 5000,
        }
    }

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    fn rejoin(chunks: Vec<Chunk>) -> String {
        let mut segments = Vec::new();
        for chunk in chunks {
            attach(&mut segments, chunk.join, chunk.text);
        }
        segments.join("\n")
    }

    #[test]
    fn chunking_keeps_short_text_whole() {
        assert_eq!(texts(&chunk_text("Hello world", 5000)), vec!["Hello world"]);
        assert_eq!(texts(&chunk_text("", 10)), vec![""]);
    }

    #[test]
    fn chunking_breaks_at_newlines_and_rejoins() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = chunk_text(text, 10);
        assert_eq!(texts(&chunks), vec!["aaaa\nbbbb", "cccc"]);
        assert!(chunks.iter().all(|c| c.text.chars().count() <= 10));
        assert_eq!(rejoin(chunks), text);
    }

    #[test]
    fn chunking_never_emits_empty_pieces_between_full_lines() {
        assert_eq!(
            texts(&chunk_text("line one\nline two", 8)),
            vec!["line one", "line two"]
        );
    }

    #[test]
    fn chunking_hard_splits_long_lines() {
        let chunks = chunk_text("abcdefghij", 4);
        assert_eq!(texts(&chunks), vec!["abcd", "efgh", "ij"]);
        assert_eq!(chunks[1].join, Join::Nothing);
    }

    #[test]
    fn chunking_prefers_spaces_inside_long_lines() {
        let chunks = chunk_text("alpha beta gamma", 10);
        assert_eq!(texts(&chunks), vec!["alpha beta", "gamma"]);
        assert_eq!(chunks[1].join, Join::Space);
    }

    #[test]
    fn split_long_lines_rejoin_without_new_breaks() {
        let long = "a".repeat(12);
        assert_eq!(rejoin(chunk_text(&long, 5)), long);

        let text = "short\nthe quick brown fox jumps\n\nover  the lazy dog \nend";
        assert_eq!(rejoin(chunk_text(text, 7)), text);
    }

    #[test]
    fn chunking_respects_char_boundaries() {
        let chunks = chunk_text("äöüäöü", 4);
        assert_eq!(texts(&chunks), vec!["äöüä", "öü"]);
    }

    #[test]
    fn segments_rejoin_with_newline() {
        let t = Translation::Segments(vec!["Bonjour".into(), "le monde".into()]);
        assert_eq!(t.into_text(), "Bonjour\nle monde");
        assert_eq!(Translation::Single("Salut".into()).into_text(), "Salut");
    }

    #[test]
    fn parses_multi_segment_gtx_body() {
        let body = json!([
            [["Bonjour. ", "Hello. ", null, null, 10], ["Le monde.", "The world.", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(parse_gtx_response(&body).unwrap(), "Bonjour. Le monde.");
    }

    #[test]
    fn rejects_malformed_gtx_body() {
        assert!(parse_gtx_response(&json!({"error": "quota"})).is_err());
        assert!(parse_gtx_response(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn google_provider_translates_via_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "fr"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("q=Hello+world"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                [["Bonjour le monde", "Hello world", null, null, 10]],
                null,
                "en"
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new(&config_for(&server)).unwrap();
        let result = provider.translate("Hello world", "auto", "fr").await.unwrap();
        assert_eq!(result, Translation::Single("Bonjour le monde".into()));
    }

    #[tokio::test]
    async fn google_provider_reports_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new(&config_for(&server)).unwrap();
        let err = provider.translate("Hello", "auto", "de").await.unwrap_err();
        assert!(matches!(err, SprachwerkError::Translation(ref msg) if msg.contains("429")));
    }

    #[tokio::test]
    async fn google_provider_keeps_long_text_out_of_the_url() {
        let server = MockServer::start().await;
        let long = "word ".repeat(900);
        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .and(body_string_contains("q=word+word"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["Wort", "word"]]])))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GoogleTranslateProvider::new(&config_for(&server)).unwrap();
        provider.translate(long.trim_end(), "auto", "de").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].url.as_str().len() < 200);
    }

    #[tokio::test]
    async fn google_provider_sends_one_request_per_chunk() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["übersetzt", "x"]]])))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.max_chunk_chars = 8;
        let provider = GoogleTranslateProvider::new(&config).unwrap();
        let result = provider.translate("line one\nline two", "auto", "de").await.unwrap();
        assert_eq!(
            result,
            Translation::Segments(vec!["übersetzt".into(), "übersetzt".into()])
        );
    }

    #[tokio::test]
    async fn google_provider_glues_split_lines_back_together() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["Welt", "x"]]])))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.max_chunk_chars = 8;
        let provider = GoogleTranslateProvider::new(&config).unwrap();
        let result = provider.translate("Hello world", "auto", "de").await.unwrap();
        assert_eq!(result, Translation::Segments(vec!["Welt Welt".into()]));
    }

    #[tokio::test]
    async fn disabled_provider_always_fails() {
        let err = DisabledProvider.translate("Hello", "auto", "fr").await.unwrap_err();
        assert!(matches!(err, SprachwerkError::TranslationDisabled));
    }
}
