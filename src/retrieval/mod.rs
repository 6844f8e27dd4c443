//! Statute relevance scoring and selection
//!
//! Every corpus section is scored against the query features, filtered to
//! those with at least one real match, gated on exact (law, section) lookups,
//! then ordered either globally or, for comparison queries, per law with the
//! two rankings interleaved.

mod interleave;
mod ordering;
mod related_terms;
mod scorer;
mod selector;

pub use interleave::interleave;
pub use related_terms::related_terms;
pub use scorer::{score_section, ScoringWeights};
pub use selector::{RankingConfig, SearchOutcome, Selector};

use crate::corpus::{LawSection, LawType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse summary of match strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strongest kind of evidence behind a section's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Content,
    Title,
    Exact,
    Punishment,
    SectionNumber,
}

impl MatchType {
    /// section_number > punishment > exact > title > content
    fn precedence(self) -> u8 {
        match self {
            MatchType::Content => 0,
            MatchType::Title => 1,
            MatchType::Exact => 2,
            MatchType::Punishment => 3,
            MatchType::SectionNumber => 4,
        }
    }

    /// Replace with `other` only if it is stronger evidence
    pub fn upgrade(&mut self, other: MatchType) {
        if other.precedence() > self.precedence() {
            *self = other;
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Content => "content",
            MatchType::Title => "title",
            MatchType::Exact => "exact",
            MatchType::Punishment => "punishment",
            MatchType::SectionNumber => "section_number",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section with its relevance to one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    #[serde(flatten)]
    pub section: LawSection,
    pub relevance_score: u32,
    pub confidence_level: ConfidenceLevel,
    pub match_type: MatchType,
    /// Distinct query keywords found in the title or content
    pub keyword_matches: Vec<String>,
    pub intent_match: bool,
    /// Whether any signal other than era preference matched
    #[serde(skip)]
    pub has_match: bool,
}

impl ScoredSection {
    pub fn law_type(&self) -> LawType {
        self.section.law_type
    }

    pub fn section_number(&self) -> &str {
        &self.section.section_number
    }

    pub fn is_current_law(&self) -> bool {
        self.section.is_current_law
    }

    pub fn is(&self, law: LawType, section_number: &str) -> bool {
        self.section.law_type == law && self.section.section_number == section_number
    }
}
