//! Candidate filtering, gating and final ordering

use super::ordering::rank;
use super::{interleave, score_section, ScoredSection, ScoringWeights};
use crate::corpus::{CorpusIndex, LawType};
use crate::query::QueryFeatures;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result-size and tie-break settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub standard_limit: usize,
    pub comparison_limit: usize,
    /// Score difference below which two sections count as tied
    pub tie_window: u32,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            standard_limit: 8,
            comparison_limit: 10,
            tie_window: 5,
        }
    }
}

/// What a search produced
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<ScoredSection>),
    /// The query named a (law, section) pair that the corpus lacks
    SectionNotFound { law: LawType, section: String },
    NoMatch,
}

impl SearchOutcome {
    pub fn exact_match_failed(&self) -> bool {
        matches!(self, SearchOutcome::SectionNotFound { .. })
    }

    pub fn sections(&self) -> &[ScoredSection] {
        match self {
            SearchOutcome::Found(sections) => sections,
            _ => &[],
        }
    }

    pub fn into_sections(self) -> Vec<ScoredSection> {
        match self {
            SearchOutcome::Found(sections) => sections,
            _ => Vec::new(),
        }
    }
}

/// Scores and ranks corpus sections for a query
#[derive(Debug, Clone)]
pub struct Selector {
    corpus: Arc<CorpusIndex>,
    ranking: RankingConfig,
    weights: ScoringWeights,
}

impl Selector {
    pub fn new(corpus: Arc<CorpusIndex>, ranking: RankingConfig, weights: ScoringWeights) -> Self {
        Self {
            corpus,
            ranking,
            weights,
        }
    }

    /// Selector with default ranking and weights
    pub fn with_defaults(corpus: Arc<CorpusIndex>) -> Self {
        Self::new(corpus, RankingConfig::default(), ScoringWeights::default())
    }

    /// Ranked sections for the query; empty when nothing qualifies
    pub fn search(&self, features: &QueryFeatures) -> Vec<ScoredSection> {
        self.search_outcome(features).into_sections()
    }

    pub fn search_outcome(&self, features: &QueryFeatures) -> SearchOutcome {
        let mut candidates: Vec<ScoredSection> = self
            .corpus
            .sections()
            .iter()
            .map(|section| score_section(features, section, &self.weights))
            .filter(|scored| scored.has_match)
            .collect();

        if let Some((law, section)) = features.exact_target() {
            if !candidates.iter().any(|c| c.is(law, section)) {
                tracing::debug!(law = %law, section, "requested section not in corpus");
                return SearchOutcome::SectionNotFound {
                    law,
                    section: section.to_string(),
                };
            }
            if !features.is_comparison() {
                candidates.retain(|c| c.is(law, section));
            }
        }

        if candidates.is_empty() {
            return SearchOutcome::NoMatch;
        }

        let ranked = match (features.is_comparison(), features.law, features.secondary_law) {
            (true, Some(first), Some(second)) => {
                let (mut a, rest): (Vec<_>, Vec<_>) =
                    candidates.into_iter().partition(|c| c.law_type() == first);
                let mut b: Vec<_> = rest.into_iter().filter(|c| c.law_type() == second).collect();

                rank(&mut a, features.preferred_era, self.ranking.tie_window);
                rank(&mut b, features.preferred_era, self.ranking.tie_window);

                let mut merged = interleave(a, b);
                merged.truncate(self.ranking.comparison_limit);
                merged
            }
            _ => {
                rank(
                    &mut candidates,
                    features.preferred_era,
                    self.ranking.tie_window,
                );
                candidates.truncate(self.ranking.standard_limit);
                candidates
            }
        };

        tracing::debug!(
            results = ranked.len(),
            comparison = features.is_comparison(),
            top = ?ranked.first().map(|s| (s.law_type(), s.section_number().to_string())),
            "selected sections"
        );

        if ranked.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Found(ranked)
        }
    }
}
