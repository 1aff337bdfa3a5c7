//! Phrase dictionary loading and tier lookup.
//! Every phrase is normalized once at construction; the dictionary is never
//! mutated afterwards and is shared between classifiers via `Arc`.

mod builtin;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::normalize::normalize_for_match;
use crate::risk::PhraseTier;

/// On-disk dictionary file format.
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    version: u32,
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

/// Immutable tier → phrase table. Phrases are stored normalized.
#[derive(Debug, Clone)]
pub struct PhraseDictionary {
    version: u32,
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

#[derive(Debug)]
pub enum DictionaryError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    EmptyTier(PhraseTier),
    EmptyPhrase { tier: PhraseTier, raw: String },
}

impl std::fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryError::Io(e) => write!(f, "dictionary IO error: {e}"),
            DictionaryError::Parse(e) => write!(f, "dictionary parse error: {e}"),
            DictionaryError::EmptyTier(tier) => write!(f, "{tier} tier has no phrases"),
            DictionaryError::EmptyPhrase { tier, raw } => {
                write!(f, "{tier} tier phrase {raw:?} is empty after normalization")
            }
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DictionaryError::Io(e) => Some(e),
            DictionaryError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DictionaryError {
    fn from(e: std::io::Error) -> Self {
        DictionaryError::Io(e)
    }
}

impl From<serde_json::Error> for DictionaryError {
    fn from(e: serde_json::Error) -> Self {
        DictionaryError::Parse(e)
    }
}

/// Normalize one tier's phrases, dropping in-tier duplicates (first wins).
fn prepare_tier<S: AsRef<str>>(
    tier: PhraseTier,
    raw: &[S],
) -> Result<Vec<String>, DictionaryError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for phrase in raw {
        let normalized = normalize_for_match(phrase.as_ref());
        if normalized.is_empty() {
            return Err(DictionaryError::EmptyPhrase {
                tier,
                raw: phrase.as_ref().to_string(),
            });
        }
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    if out.is_empty() {
        return Err(DictionaryError::EmptyTier(tier));
    }
    Ok(out)
}

impl PhraseDictionary {
    /// Build a dictionary from raw per-tier phrase lists.
    pub fn from_tiers<S: AsRef<str>>(
        high: &[S],
        medium: &[S],
        low: &[S],
    ) -> Result<Self, DictionaryError> {
        Ok(Self {
            version: 0,
            high: prepare_tier(PhraseTier::High, high)?,
            medium: prepare_tier(PhraseTier::Medium, medium)?,
            low: prepare_tier(PhraseTier::Low, low)?,
        })
    }

    /// The bundled English + Arabic dictionary.
    pub fn builtin() -> Self {
        // The bundled tables are non-empty and contain no blank phrases.
        let mut dict = Self::from_tiers(builtin::HIGH, builtin::MEDIUM, builtin::LOW)
            .unwrap_or_else(|e| panic!("built-in phrase tables are invalid: {e}"));
        dict.version = builtin::VERSION;
        dict
    }

    /// Load a dictionary from a JSON file
    /// (`{"version": 2, "high": [..], "medium": [..], "low": [..]}`).
    pub fn load_from_file(path: &Path) -> Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path)?;
        let file: DictionaryFile = serde_json::from_str(&content)?;
        let mut dict = Self::from_tiers(&file.high, &file.medium, &file.low)?;
        dict.version = file.version;
        debug!(
            path = %path.display(),
            version = dict.version,
            high = dict.high.len(),
            medium = dict.medium.len(),
            low = dict.low.len(),
            "phrase dictionary loaded"
        );
        Ok(dict)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Normalized phrases for `tier`, in dictionary order.
    pub fn phrases(&self, tier: PhraseTier) -> &[String] {
        match tier {
            PhraseTier::High => &self.high,
            PhraseTier::Medium => &self.medium,
            PhraseTier::Low => &self.low,
        }
    }

    /// Total number of phrases across all tiers.
    pub fn len(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PhraseDictionary {
    fn default() -> Self {
        Self::builtin()
    }
}
