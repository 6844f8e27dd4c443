//! Query understanding
//!
//! Turns free text into [`QueryFeatures`]: the law(s) named, a section number,
//! a coarse intent, and content keywords. The deterministic extractor here is
//! also the fallback whenever a remote analyzer is unavailable or returns
//! something unusable; both paths produce the same structure.

mod extractor;
mod normalize;
mod patterns;
mod remote;

pub use extractor::{extract_features, FeatureExtractor};
pub use normalize::normalize_query;
pub use patterns::{
    CompiledIntentRule, CompiledLawAlias, IntentRuleConfig, LawAliasConfig, PatternsConfig,
    QueryPatterns,
};
pub use remote::parse_remote_analysis;

use crate::corpus::{LawEra, LawType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse purpose of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    Punishment,
    Definition,
    Procedure,
    Comparison,
    SpecificSection,
    SopForms,
    General,
}

impl QueryIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryIntent::Punishment => "punishment",
            QueryIntent::Definition => "definition",
            QueryIntent::Procedure => "procedure",
            QueryIntent::Comparison => "comparison",
            QueryIntent::SpecificSection => "specific_section",
            QueryIntent::SopForms => "sop_forms",
            QueryIntent::General => "general",
        }
    }

    /// Parse an intent name; anything unrecognized is `General`
    pub fn parse_lenient(value: &str) -> QueryIntent {
        match value.trim().to_ascii_lowercase().as_str() {
            "punishment" => QueryIntent::Punishment,
            "definition" => QueryIntent::Definition,
            "procedure" => QueryIntent::Procedure,
            "comparison" => QueryIntent::Comparison,
            "specific_section" => QueryIntent::SpecificSection,
            "sop_forms" => QueryIntent::SopForms,
            _ => QueryIntent::General,
        }
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which generation of law the query leans towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraPreference {
    #[default]
    Current,
    Previous,
    Both,
}

impl EraPreference {
    /// Whether a law sits on the preferred side. `Both` prefers neither.
    pub fn prefers(self, law: LawType) -> bool {
        match self {
            EraPreference::Current => law.era() == LawEra::Current,
            EraPreference::Previous => law.era() == LawEra::Previous,
            EraPreference::Both => false,
        }
    }

    pub fn parse_lenient(value: &str) -> EraPreference {
        match value.trim().to_ascii_lowercase().as_str() {
            "previous" => EraPreference::Previous,
            "both" => EraPreference::Both,
            _ => EraPreference::Current,
        }
    }
}

/// Whether a query is about law at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryCategory {
    #[default]
    Legal,
    General,
    Mixed,
}

/// Features derived from one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFeatures {
    /// Normalized query text
    pub query: String,
    pub law: Option<LawType>,
    pub secondary_law: Option<LawType>,
    pub section: Option<String>,
    pub intent: QueryIntent,
    pub keywords: Vec<String>,
    pub preferred_era: EraPreference,
    pub category: QueryCategory,
}

impl QueryFeatures {
    /// Features carrying only the query text (general intent, no law, no keywords)
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            law: None,
            secondary_law: None,
            section: None,
            intent: QueryIntent::General,
            keywords: Vec::new(),
            preferred_era: EraPreference::Current,
            category: QueryCategory::Legal,
        }
    }

    /// Two distinct laws set and a comparison intent
    pub fn is_comparison(&self) -> bool {
        self.intent == QueryIntent::Comparison
            && matches!((self.law, self.secondary_law), (Some(a), Some(b)) if a != b)
    }

    /// Laws explicitly named by the query
    pub fn named_laws(&self) -> impl Iterator<Item = LawType> + '_ {
        self.law.into_iter().chain(self.secondary_law)
    }

    pub fn names_law(&self, law: LawType) -> bool {
        self.named_laws().any(|named| named == law)
    }

    /// The (law, section) pair a strict lookup must satisfy, if both are given
    pub fn exact_target(&self) -> Option<(LawType, &str)> {
        match (self.law, self.section.as_deref()) {
            (Some(law), Some(section)) => Some((law, section)),
            _ => None,
        }
    }

    /// Make law and intent fields agree with each other.
    ///
    /// Two distinct laws turn the query into a comparison; a comparison naming a
    /// single law is compared against that law's counterpart.
    pub(crate) fn reconcile_laws(&mut self) {
        if self.secondary_law == self.law {
            self.secondary_law = None;
        }
        if self.law.is_none() {
            self.law = self.secondary_law.take();
        }

        if self.secondary_law.is_some() {
            self.intent = QueryIntent::Comparison;
        } else if self.intent == QueryIntent::Comparison {
            self.secondary_law = self.law.map(LawType::counterpart);
        }

        if self.is_comparison() {
            self.preferred_era = EraPreference::Both;
        }
    }
}
