//! Phrase-based risk classifier.
//!
//! Scans a normalized utterance against the three dictionary tiers and
//! resolves a single [`RiskLevel`]:
//!
//! 1. any high-tier hit → `High`
//! 2. ≥2 medium hits, or ≥1 medium + ≥1 low → `Medium`
//! 3. ≥1 medium or ≥2 low → `Low` (with evidence)
//! 4. otherwise `Low`, reporting any lone low-tier hit
//!
//! Classification is a pure function of the input and the dictionary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::normalize::normalize_for_match;
use crate::phrases::{DictionaryError, PhraseDictionary};
use crate::risk::{PhraseTier, RiskLevel};

const NO_MATCH_REASON: &str = "No suspicious phrases detected";

/// How a dictionary phrase must sit inside the utterance to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Raw substring anywhere, including inside longer words.
    #[default]
    Substring,
    /// Occurrence must not be flanked by alphanumeric characters.
    WordBoundary,
}

/// Verdict for one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub risk: RiskLevel,
    /// Matched phrases in normalized dictionary form.
    pub matched_phrases: Vec<String>,
    pub reason: String,
}

impl ClassificationResult {
    fn no_match() -> Self {
        Self {
            risk: RiskLevel::Low,
            matched_phrases: Vec::new(),
            reason: NO_MATCH_REASON.to_string(),
        }
    }

    pub fn is_alert(&self) -> bool {
        self.risk == RiskLevel::High
    }
}

/// Per-tier hits for one utterance.
#[derive(Debug, Default)]
struct TierMatches<'d> {
    high: Vec<&'d str>,
    medium: Vec<&'d str>,
    low: Vec<&'d str>,
}

pub struct PhraseRiskClassifier {
    dictionary: Arc<PhraseDictionary>,
    match_mode: MatchMode,
    reason_limit: usize,
}

impl PhraseRiskClassifier {
    pub fn new(dictionary: Arc<PhraseDictionary>) -> Self {
        Self {
            dictionary,
            match_mode: MatchMode::default(),
            reason_limit: ClassifierConfig::DEFAULT_REASON_LIMIT,
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Maximum number of phrases named in `reason`. Clamped to at least 1.
    pub fn with_reason_limit(mut self, limit: usize) -> Self {
        self.reason_limit = limit.max(1);
        self
    }

    /// Build from config, loading the phrase file when one is set.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, DictionaryError> {
        let dictionary = match &config.phrase_file {
            Some(path) => PhraseDictionary::load_from_file(path)?,
            None => PhraseDictionary::builtin(),
        };
        Ok(Self::new(Arc::new(dictionary))
            .with_match_mode(config.match_mode)
            .with_reason_limit(config.reason_limit))
    }

    pub fn dictionary(&self) -> &Arc<PhraseDictionary> {
        &self.dictionary
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Classify one utterance. Total over all inputs.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = normalize_for_match(text);
        if normalized.is_empty() {
            return ClassificationResult::no_match();
        }

        let hits = self.scan(&normalized);
        let high = hits.high.len();
        let medium = hits.medium.len();
        let low = hits.low.len();

        let (risk, matched): (RiskLevel, Vec<&str>) = if high > 0 {
            (RiskLevel::High, hits.high)
        } else if medium >= 2 || (medium >= 1 && low >= 1) {
            (RiskLevel::Medium, concat(hits.medium, hits.low))
        } else if medium >= 1 || low >= 2 {
            (RiskLevel::Low, concat(hits.medium, hits.low))
        } else if low == 1 {
            (RiskLevel::Low, hits.low)
        } else {
            return ClassificationResult::no_match();
        };

        debug!(
            risk = %risk,
            high,
            medium,
            low,
            "utterance classified"
        );

        let reason = self.reason(risk, &matched);
        ClassificationResult {
            risk,
            matched_phrases: matched.into_iter().map(str::to_string).collect(),
            reason,
        }
    }

    fn scan<'d>(&'d self, normalized: &str) -> TierMatches<'d> {
        let collect = |tier: PhraseTier| -> Vec<&'d str> {
            self.dictionary
                .phrases(tier)
                .iter()
                .filter(|p| self.contains(normalized, p))
                .map(String::as_str)
                .collect()
        };
        TierMatches {
            high: collect(PhraseTier::High),
            medium: collect(PhraseTier::Medium),
            low: collect(PhraseTier::Low),
        }
    }

    fn contains(&self, haystack: &str, phrase: &str) -> bool {
        match self.match_mode {
            MatchMode::Substring => haystack.contains(phrase),
            MatchMode::WordBoundary => contains_word(haystack, phrase),
        }
    }

    fn reason(&self, risk: RiskLevel, matched: &[&str]) -> String {
        let listed = matched
            .iter()
            .take(self.reason_limit)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        match risk {
            RiskLevel::High => format!("High-risk phrases detected: {listed}"),
            RiskLevel::Medium => format!("Suspicious phrases detected: {listed}"),
            RiskLevel::Low => format!("Low-risk indicators detected: {listed}"),
        }
    }
}

impl Default for PhraseRiskClassifier {
    fn default() -> Self {
        Self::new(Arc::new(PhraseDictionary::builtin()))
    }
}

fn concat<'d>(mut first: Vec<&'d str>, second: Vec<&'d str>) -> Vec<&'d str> {
    first.extend(second);
    first
}

/// True if `phrase` occurs in `haystack` with no alphanumeric character
/// directly before or after the occurrence.
fn contains_word(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, m)| {
        let end = start + m.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
