//! Grounding context handed to a text generator

use super::conversation::Turn;
use crate::corpus::LawType;
use crate::query::{QueryFeatures, QueryIntent};
use crate::retrieval::{ConfidenceLevel, MatchType, ScoredSection};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Characters of section content kept per grounding section
pub const CONTENT_PREVIEW_CHARS: usize = 500;

/// Keyword matches reported per grounding section
pub const MAX_KEYWORD_MATCHES: usize = 5;

/// History turns included in a rendered prompt by default
pub const DEFAULT_PROMPT_HISTORY_TURNS: usize = 2;

/// One ranked section, trimmed for a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingSection {
    pub rank: usize,
    pub law_type: LawType,
    pub law_name: String,
    pub section_number: String,
    pub section_title: String,
    pub content: String,
    pub relevance_score: u32,
    pub confidence_level: ConfidenceLevel,
    pub match_type: MatchType,
    pub intent_match: bool,
    pub is_current_law: bool,
    pub keyword_matches: Vec<String>,
}

impl GroundingSection {
    fn from_scored(rank: usize, scored: &ScoredSection) -> Self {
        Self {
            rank,
            law_type: scored.law_type(),
            law_name: scored.law_type().full_name().to_string(),
            section_number: scored.section_number().to_string(),
            section_title: scored.section.section_title.clone(),
            content: truncate_chars(&scored.section.full_text(), CONTENT_PREVIEW_CHARS),
            relevance_score: scored.relevance_score,
            confidence_level: scored.confidence_level,
            match_type: scored.match_type,
            intent_match: scored.intent_match,
            is_current_law: scored.is_current_law(),
            keyword_matches: scored
                .keyword_matches
                .iter()
                .take(MAX_KEYWORD_MATCHES)
                .cloned()
                .collect(),
        }
    }
}

/// Counts describing a ranked result, rendered as an answer footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub current_law: usize,
    pub previous_law: usize,
    pub intent: QueryIntent,
    pub comparison: bool,
}

impl AnalysisSummary {
    pub fn new(sections: &[ScoredSection], features: &QueryFeatures) -> Self {
        let count = |level: ConfidenceLevel| {
            sections
                .iter()
                .filter(|s| s.confidence_level == level)
                .count()
        };
        let current_law = sections.iter().filter(|s| s.is_current_law()).count();

        Self {
            total: sections.len(),
            high_confidence: count(ConfidenceLevel::High),
            medium_confidence: count(ConfidenceLevel::Medium),
            current_law,
            previous_law: sections.len() - current_law,
            intent: features.intent,
            comparison: features.is_comparison(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "Analysis summary: found {} relevant sections | {} high confidence, {} medium confidence | {} current law sections, {} previous law sections | Intent: {} | Query type: {}",
            self.total,
            self.high_confidence,
            self.medium_confidence,
            self.current_law,
            self.previous_law,
            self.intent,
            if self.comparison { "Comparison" } else { "Standard" },
        )
    }
}

/// Everything a generator needs to answer from the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingContext {
    pub query: String,
    pub sections: Vec<GroundingSection>,
    pub history: Vec<Turn>,
}

/// Build a grounding context keeping the default number of history turns
pub fn build_grounding_context(
    query: &str,
    ranked: &[ScoredSection],
    history: &[Turn],
) -> GroundingContext {
    GroundingContext::new(query, ranked, history, DEFAULT_PROMPT_HISTORY_TURNS)
}

impl GroundingContext {
    pub fn new(
        query: &str,
        ranked: &[ScoredSection],
        history: &[Turn],
        history_turns: usize,
    ) -> Self {
        let skip = history.len().saturating_sub(history_turns);
        Self {
            query: query.to_string(),
            sections: ranked
                .iter()
                .enumerate()
                .map(|(i, scored)| GroundingSection::from_scored(i + 1, scored))
                .collect(),
            history: history[skip..].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Prompt text for a remote generator
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        let _ = writeln!(
            prompt,
            "You are an AI assistant specialized in Indian law analysis. Analyze the following query and relevant legal sections to provide a comprehensive response."
        );
        let _ = writeln!(prompt, "\nUSER QUERY: \"{}\"", self.query);
        let _ = writeln!(prompt, "\nRELEVANT SECTIONS:");

        for section in &self.sections {
            let _ = writeln!(
                prompt,
                "\n{} - Section {}\nTitle: {}\nContent: {}\nRelevance: {} ({} confidence)",
                section.law_name,
                section.section_number,
                section.section_title,
                section.content,
                section.relevance_score,
                section.confidence_level,
            );
        }

        if !self.history.is_empty() {
            let _ = writeln!(prompt, "\nCONVERSATION HISTORY:");
            for turn in &self.history {
                let _ = writeln!(prompt, "{}: {}\n", turn.role.label(), turn.content);
            }
        }

        let _ = write!(
            prompt,
            "\nProvide a detailed response that:\n\
             1. Directly answers the user's question using information from the relevant sections\n\
             2. Cites specific section numbers when referencing laws\n\
             3. Explains legal concepts in clear, simple language\n\
             4. Highlights key points and practical implications\n\
             5. If comparing laws, clearly shows differences and current applicability\n\n\
             Format your response with markdown headings and bullet points."
        );

        prompt
    }

    /// Answer text built from the sections alone, for when no generator is available
    pub fn render_offline(&self) -> String {
        let mut out = String::from("Relevant provisions:\n");
        for section in &self.sections {
            let status = if section.is_current_law {
                "current law"
            } else {
                "previous law"
            };
            let _ = writeln!(
                out,
                "\n### {} - Section {}: {}\n_{}, {} confidence_\n\n{}",
                section.law_type,
                section.section_number,
                section.section_title,
                status,
                section.confidence_level,
                section.content,
            );
        }
        out
    }
}

/// Truncate to at most `max` characters, never splitting a UTF-8 sequence
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::conversation::Role;
    use crate::corpus::LawSection;
    use crate::query::extract_features;
    use crate::retrieval::{score_section, ScoringWeights};

    fn scored(law: LawType, number: &str, content: &str) -> ScoredSection {
        let section = LawSection::new(law, number, "Punishment for murder", vec![content.to_string()]);
        score_section(
            &extract_features("punishment for murder"),
            &section,
            &ScoringWeights::default(),
        )
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate_chars("abc", 5), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("धारा १०३", 4), "धारा");
    }

    #[test]
    fn test_sections_ranked_and_trimmed() {
        let long = "murder ".repeat(200);
        let ranked = vec![
            scored(LawType::Bns, "103", &long),
            scored(LawType::Ipc, "302", "Whoever commits murder shall be punished."),
        ];
        let context = build_grounding_context("punishment for murder", &ranked, &[]);

        assert_eq!(context.sections.len(), 2);
        assert_eq!(context.sections[0].rank, 1);
        assert_eq!(context.sections[1].rank, 2);
        assert_eq!(context.sections[0].content.chars().count(), CONTENT_PREVIEW_CHARS);
        assert_eq!(
            context.sections[1].law_name,
            "Indian Penal Code (IPC) 1860"
        );
        assert!(context.sections[0].keyword_matches.len() <= MAX_KEYWORD_MATCHES);
    }

    #[test]
    fn test_prompt_keeps_last_two_turns() {
        let history = vec![
            Turn::new(Role::User, "first question"),
            Turn::new(Role::Assistant, "first answer"),
            Turn::new(Role::User, "second question"),
            Turn::new(Role::Assistant, "second answer"),
        ];
        let ranked = vec![scored(LawType::Bns, "103", "Whoever commits murder.")];
        let prompt = build_grounding_context("and the fine?", &ranked, &history).render_prompt();

        assert!(prompt.contains("USER QUERY: \"and the fine?\""));
        assert!(prompt.contains("Bharatiya Nyaya Sanhita (BNS) 2023 - Section 103"));
        assert!(prompt.contains("USER: second question"));
        assert!(prompt.contains("ASSISTANT: second answer"));
        assert!(!prompt.contains("first question"));
    }

    #[test]
    fn test_summary_counts() {
        let ranked = vec![
            scored(LawType::Bns, "103", "shall be punished with death"),
            scored(LawType::Ipc, "302", "shall be punished with death"),
        ];
        let features = extract_features("Compare punishment for murder in BNS and IPC");
        let summary = AnalysisSummary::new(&ranked, &features);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.high_confidence, 2);
        assert_eq!(summary.current_law, 1);
        assert_eq!(summary.previous_law, 1);
        assert!(summary.comparison);
        assert!(summary.render().ends_with("Query type: Comparison"));
    }
}
