// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sprachwerk Translate — source-language detection and translation through an
// external provider. Both are advisory: detection degrades to "auto" and
// translation degrades to the original text, so neither can fail a request.

pub mod detect;
pub mod provider;
pub mod translator;

pub use detect::detect_language;
pub use provider::{
    DisabledProvider, GoogleTranslateProvider, Translation, TranslationProvider,
    provider_from_config,
};
pub use translator::Translator;
