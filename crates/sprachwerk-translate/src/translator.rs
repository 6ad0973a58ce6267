// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Translator — wraps a provider with the service's fallback rules.

use std::sync::Arc;

use sprachwerk_core::{AUTO_LANGUAGE, resolve_target_language};
use tracing::{debug, instrument, warn};

use crate::provider::TranslationProvider;

/// Translates text, never failing.
///
/// Blank input short-circuits to an empty string without contacting the
/// provider. Any provider error is logged and the original text is returned
/// unchanged.
#[derive(Clone)]
pub struct Translator {
    provider: Arc<dyn TranslationProvider>,
}

impl Translator {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Translate `text` into `target`, letting the provider detect the source.
    ///
    /// An absent or blank target means English.
    #[instrument(skip(self, text), fields(provider = self.provider.name(), text_len = text.len()))]
    pub async fn translate(&self, text: &str, target: Option<&str>) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let target = resolve_target_language(target);
        match self.provider.translate(text, AUTO_LANGUAGE, &target).await {
            Ok(translation) => {
                let translated = translation.into_text();
                debug!(
                    target = %target,
                    chars = translated.chars().count(),
                    "Translation complete"
                );
                translated
            }
            Err(err) => {
                warn!(target = %target, %err, "Translation failed, returning original text");
                text.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{DisabledProvider, Translation};
    use async_trait::async_trait;
    use sprachwerk_core::error::{Result, SprachwerkError};
    use std::sync::Mutex;

    /// Records every call and answers with a canned translation.
    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<(String, String, String)>>,
        reply: Option<Translation>,
    }

    #[async_trait]
    impl TranslationProvider for RecordingProvider {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), source.to_string(), target.to_string()));
            self.reply
                .clone()
                .ok_or_else(|| SprachwerkError::Translation("offline".into()))
        }
    }

    fn translator_with(reply: Option<Translation>) -> (Translator, Arc<RecordingProvider>) {
        let provider = Arc::new(RecordingProvider {
            reply,
            ..Default::default()
        });
        (Translator::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn blank_text_skips_provider() {
        let (translator, provider) = translator_with(Some(Translation::Single("x".into())));
        assert_eq!(translator.translate("   \n\t", Some("fr")).await, "");
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sends_auto_source_and_resolved_target() {
        let (translator, provider) =
            translator_with(Some(Translation::Single("Bonjour le monde".into())));
        let out = translator.translate("Hello world", Some(" FR ")).await;
        assert_eq!(out, "Bonjour le monde");

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "auto");
        assert_eq!(calls[0].2, "fr");
    }

    #[tokio::test]
    async fn missing_target_defaults_to_english() {
        let (translator, provider) = translator_with(Some(Translation::Single("Hi".into())));
        translator.translate("Hallo", None).await;
        assert_eq!(provider.calls.lock().unwrap()[0].2, "en");
    }

    #[tokio::test]
    async fn segments_are_joined_with_newlines() {
        let (translator, _) = translator_with(Some(Translation::Segments(vec![
            "Eins".into(),
            "Zwei".into(),
        ])));
        assert_eq!(translator.translate("One\nTwo", Some("de")).await, "Eins\nZwei");
    }

    #[tokio::test]
    async fn provider_failure_returns_original_text() {
        let (translator, provider) = translator_with(None);
        assert_eq!(translator.translate("Hello world", Some("fr")).await, "Hello world");
        assert_eq!(provider.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn disabled_provider_passes_text_through() {
        let translator = Translator::new(Arc::new(DisabledProvider));
        assert_eq!(translator.provider_name(), "disabled");
        assert_eq!(translator.translate("Guten Tag", Some("en")).await, "Guten Tag");
    }
}
