// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Source-language detection.

use sprachwerk_core::AUTO_LANGUAGE;
use tracing::debug;

/// Number of leading characters sampled for detection.
pub const SAMPLE_CHARS: usize = 2000;

/// Best-guess language of `text` as an ISO 639-1 code (`"en"`, `"fr"`, ...),
/// falling back to the ISO 639-3 code when no two-letter code exists.
///
/// Only the first [`SAMPLE_CHARS`] characters are examined. Returns
/// [`AUTO_LANGUAGE`] when the sample is blank or no language can be
/// determined; this function never fails.
pub fn detect_language(text: &str) -> String {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();
    if sample.trim().is_empty() {
        return AUTO_LANGUAGE.to_string();
    }

    match whatlang::detect(&sample) {
        Some(info) => {
            let code = short_code(info.lang().code());
            debug!(
                lang = %code,
                confidence = info.confidence(),
                reliable = info.is_reliable(),
                "Language detected"
            );
            code
        }
        None => {
            debug!("Language detection inconclusive");
            AUTO_LANGUAGE.to_string()
        }
    }
}

/// Map an ISO 639-3 code to its ISO 639-1 equivalent where one exists.
fn short_code(iso639_3: &str) -> String {
    // whatlang reports Mandarin as the individual language `cmn`, which has
    // no two-letter code of its own; `zh` belongs to the macrolanguage.
    if iso639_3 == "cmn" {
        return "zh".to_string();
    }
    isolang::Language::from_639_3(iso639_3)
        .and_then(|lang| lang.to_639_1())
        .map(str::to_string)
        .unwrap_or_else(|| iso639_3.to_string())
}
