//! Per-section relevance scoring
//!
//! Scores are additive over independent signals. The magnitudes live in
//! [`ScoringWeights`]; what matters is their ordering, which the config
//! validator enforces:
//!
//! ```text
//! section_number > every other single weight
//! law_exact      > law_era
//! title_exact    > title_partial > content
//! ```

use super::{related_terms, ConfidenceLevel, MatchType, ScoredSection};
use crate::corpus::LawSection;
use crate::query::{QueryFeatures, QueryIntent};
use serde::{Deserialize, Serialize};

const PUNISHMENT_TERMS: &[&str] = &[
    "punishment",
    "shall be punished",
    "punishable",
    "imprisonment",
    "rigorous imprisonment",
    "simple imprisonment",
    "fine",
    "death",
];

const DEFINITION_TERMS: &[&str] = &["means", "defined as", "is said to"];

const PROCEDURE_TERMS: &[&str] = &[
    "procedure",
    "process",
    "shall",
    "may",
    "application",
    "filing",
];

const SOP_FORMS_TERMS: &[&str] = &["sop", "sops", "s.o.p", "form", "forms", "template", "templates"];

/// Point values for each relevance signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Section belongs to a law named in the query
    pub law_exact: u32,
    /// Section belongs to the preferred era (no law named for it)
    pub law_era: u32,
    /// Section number equals the requested one
    pub section_number: u32,
    /// Keyword is the whole title or appears as "of <kw>" / "<kw> of"
    pub title_exact: u32,
    pub title_partial: u32,
    /// Keyword starts or ends the title
    pub title_edge: u32,
    pub content: u32,
    /// Per occurrence when a keyword repeats in the content
    pub content_repeat: u32,
    pub content_repeat_cap: u32,
    pub intent_punishment: u32,
    pub intent_definition: u32,
    pub intent_procedure: u32,
    pub intent_sop_forms: u32,
    /// Multiplied by the square of the distinct matched keyword count
    pub multi_keyword: u32,
    pub chapter: u32,
    pub related_term: u32,
    /// Current-law bonus when the query named no law
    pub recency: u32,
    pub high_threshold: u32,
    pub medium_threshold: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            law_exact: 50,
            law_era: 30,
            section_number: 100,
            title_exact: 40,
            title_partial: 25,
            title_edge: 10,
            content: 10,
            content_repeat: 3,
            content_repeat_cap: 15,
            intent_punishment: 35,
            intent_definition: 30,
            intent_procedure: 25,
            intent_sop_forms: 10,
            multi_keyword: 5,
            chapter: 5,
            related_term: 3,
            recency: 5,
            high_threshold: 80,
            medium_threshold: 40,
        }
    }
}

/// Score one section against the query features
///
/// Pure: missing titles, content or chapter metadata contribute nothing.
pub fn score_section(
    features: &QueryFeatures,
    section: &LawSection,
    weights: &ScoringWeights,
) -> ScoredSection {
    let title = section
        .section_title
        .trim()
        .trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    let content = section.full_text().to_lowercase();
    let chapter = [section.chapter_title.as_deref(), section.chapter_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase();

    let mut score = 0u32;
    let mut match_type = MatchType::Content;
    let mut forced_high = false;
    let mut has_match = false;
    let mut keyword_matches: Vec<String> = Vec::new();
    let mut intent_match = false;

    // 1. Law identity
    if features.names_law(section.law_type) {
        score += weights.law_exact;
        has_match = true;
    } else if features.preferred_era.prefers(section.law_type) {
        score += weights.law_era;
    }

    // 2. Exact section number
    if features.section.as_deref() == Some(section.section_number.as_str()) {
        score += weights.section_number;
        match_type.upgrade(MatchType::SectionNumber);
        forced_high = true;
        has_match = true;
    }

    // 3. Keywords: title before content
    for keyword in &features.keywords {
        let keyword = keyword.as_str();

        if !title.is_empty() && title.contains(keyword) {
            keyword_matches.push(keyword.to_string());
            if is_boundary_title_match(&title, keyword) {
                score += weights.title_exact;
                match_type.upgrade(MatchType::Exact);
                forced_high = true;
            } else {
                score += weights.title_partial;
                match_type.upgrade(MatchType::Title);
            }
            if title.starts_with(keyword) || title.ends_with(keyword) {
                score += weights.title_edge;
            }
        } else if content.contains(keyword) {
            keyword_matches.push(keyword.to_string());
            score += weights.content;
            let occurrences = content.matches(keyword).count() as u32;
            if occurrences > 1 {
                score += (occurrences * weights.content_repeat).min(weights.content_repeat_cap);
            }
        }

        if !chapter.is_empty() && chapter.contains(keyword) {
            score += weights.chapter;
            has_match = true;
        }

        for term in related_terms(keyword) {
            if title.contains(term) || content.contains(term) {
                score += weights.related_term;
                has_match = true;
            }
        }
    }

    // 4. Intent-conditioned content heuristics
    match features.intent {
        QueryIntent::Punishment => {
            if contains_any_term(&content, PUNISHMENT_TERMS) {
                score += weights.intent_punishment;
                intent_match = true;
                match_type.upgrade(MatchType::Punishment);
                forced_high = true;
            }
        }
        QueryIntent::Definition => {
            if title.contains("definition") || contains_any_term(&content, DEFINITION_TERMS) {
                score += weights.intent_definition;
                intent_match = true;
            }
        }
        QueryIntent::Procedure => {
            if contains_any_term(&content, PROCEDURE_TERMS) {
                score += weights.intent_procedure;
                intent_match = true;
            }
        }
        QueryIntent::SopForms => {
            if contains_any_term(&features.query, SOP_FORMS_TERMS) {
                score += weights.intent_sop_forms;
                intent_match = true;
            }
        }
        QueryIntent::Comparison | QueryIntent::SpecificSection | QueryIntent::General => {}
    }

    // 5. Several distinct keywords in one section
    let distinct = keyword_matches.len() as u32;
    if distinct > 1 {
        score += weights.multi_keyword * distinct * distinct;
    }
    if distinct > 0 {
        has_match = true;
    }

    // 6. Recency tie-break when no law was asked for
    if features.law.is_none() && section.is_current_law {
        score += weights.recency;
    }

    let confidence_level = if forced_high || score >= weights.high_threshold {
        ConfidenceLevel::High
    } else if score >= weights.medium_threshold {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    ScoredSection {
        section: section.clone(),
        relevance_score: score,
        confidence_level,
        match_type,
        keyword_matches,
        intent_match,
        has_match,
    }
}

fn is_boundary_title_match(title: &str, keyword: &str) -> bool {
    title == keyword
        || title.contains(&format!("of {keyword}"))
        || title.contains(&format!("{keyword} of"))
}

/// Whether any term occurs in the text on word boundaries
fn contains_any_term(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| contains_term(text, term))
}

fn contains_term(text: &str, term: &str) -> bool {
    text.match_indices(term).any(|(start, matched)| {
        let before = text[..start].chars().next_back();
        let after = text[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
