//! Text normalization and language detection.
//! Phrases and utterances go through the same pipeline so that matching is a
//! plain substring test on normalized text.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

fn whitespace_run() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Arabic harakat, superscript alef and tatweel. Dropped before matching so
/// vocalized transcripts still hit unvocalized dictionary entries.
#[inline]
fn is_arabic_mark(c: char) -> bool {
    matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{0640}')
}

/// Normalize text for phrase matching: NFKC, lower-case, strip Arabic marks,
/// collapse whitespace runs to a single space, trim.
pub fn normalize_for_match(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !is_arabic_mark(*c))
        .collect();
    whitespace_run()
        .replace_all(&folded, " ")
        .trim()
        .to_string()
}

/// Detects the dominant language of `text` using whatlang.
/// Returns an ISO 639-1 code or None if detection is unreliable.
pub fn detect_language(text: &str) -> Option<String> {
    let info = whatlang::detect(text)?;
    if !info.is_reliable() {
        return None;
    }
    Some(lang_to_code(info.lang()))
}

fn lang_to_code(lang: whatlang::Lang) -> String {
    use whatlang::Lang::*;
    match lang {
        Eng => "en",
        Ara => "ar",
        Fra => "fr",
        Deu => "de",
        Spa => "es",
        Tur => "tr",
        Urd => "ur",
        Pes => "fa",
        Hin => "hi",
        Rus => "ru",
        _ => "other",
    }
    .to_string()
}
