//! Deterministic feature extraction

use super::{normalize_query, EraPreference, PatternsConfig, QueryFeatures, QueryPatterns};
use crate::corpus::LawType;
use crate::error::Result;
use std::sync::LazyLock;

static DEFAULT_EXTRACTOR: LazyLock<FeatureExtractor> = LazyLock::new(|| {
    FeatureExtractor::from_config(&PatternsConfig::default())
        .expect("default query patterns are valid")
});

/// Extract features with the built-in patterns. Never fails.
pub fn extract_features(query: &str) -> QueryFeatures {
    DEFAULT_EXTRACTOR.extract(query)
}

/// Pattern-driven feature extractor
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    patterns: QueryPatterns,
}

impl FeatureExtractor {
    pub fn new(patterns: QueryPatterns) -> Self {
        Self { patterns }
    }

    pub fn from_config(config: &PatternsConfig) -> Result<Self> {
        Ok(Self::new(QueryPatterns::from_config(config)?))
    }

    /// Extract features from raw query text
    ///
    /// Absent matches leave the optional fields unset; the intent falls back
    /// to `general`.
    pub fn extract(&self, query: &str) -> QueryFeatures {
        let normalized = normalize_query(query);

        let laws = self.patterns.detect_laws(&normalized);
        let section = self.patterns.detect_section(&normalized);
        let intent = self.patterns.detect_intent(&normalized);

        let preferred_era = match laws.first() {
            Some(law) if law.is_current() => EraPreference::Current,
            Some(_) => EraPreference::Previous,
            None if self.patterns.mentions_previous_era(&normalized) => EraPreference::Previous,
            None => EraPreference::Current,
        };

        let keywords = self.keywords(&normalized, section.as_deref(), &laws);

        let mut features = QueryFeatures {
            law: laws.first().copied(),
            secondary_law: laws.get(1).copied(),
            section,
            intent,
            keywords,
            preferred_era,
            ..QueryFeatures::empty(normalized)
        };
        features.reconcile_laws();

        tracing::debug!(
            law = ?features.law,
            secondary_law = ?features.secondary_law,
            section = ?features.section,
            intent = %features.intent,
            keywords = ?features.keywords,
            "extracted query features"
        );

        features
    }

    fn keywords(&self, normalized: &str, section: Option<&str>, laws: &[LawType]) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();

        for token in normalized.split_whitespace() {
            let token = token.trim_matches(|c: char| !c.is_alphanumeric());
            if token.chars().count() <= self.patterns.max_ignored_token_len
                || self.patterns.is_stopword(token)
                || LawType::from_code(token).is_some()
                || section == Some(token)
                || laws.iter().any(|law| is_name_word(*law, token))
            {
                continue;
            }
            if !keywords.iter().any(|k| k == token) {
                keywords.push(token.to_string());
            }
        }

        keywords
    }
}

/// Whether `token` is a word of the law's full name, e.g. "sanhita"
fn is_name_word(law: LawType, token: &str) -> bool {
    law.full_name()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word.eq_ignore_ascii_case(token))
}
