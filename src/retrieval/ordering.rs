//! Ranking order for scored sections
//!
//! Sections matching the requested section number always come first. Within
//! that split the key is the relevance score, descending. Scores closer together
//! than the tie window are reordered by confidence, then by whether the
//! section sits on the preferred era. A windowed comparison is not a total
//! order, so the tie-break runs as a separate insertion pass over the
//! score-sorted list instead of inside `sort_by`.

use super::{MatchType, ScoredSection};
use crate::query::EraPreference;

/// Order `sections` in place
pub(crate) fn rank(sections: &mut [ScoredSection], preferred_era: EraPreference, tie_window: u32) {
    sections.sort_by(|a, b| {
        is_number_match(b)
            .cmp(&is_number_match(a))
            .then_with(|| b.relevance_score.cmp(&a.relevance_score))
    });

    let window = tie_window.max(1);
    for i in 1..sections.len() {
        let mut j = i;
        while j > 0
            && is_number_match(&sections[j - 1]) == is_number_match(&sections[j])
            && sections[j - 1].relevance_score.abs_diff(sections[j].relevance_score) < window
            && wins_tie(&sections[j], &sections[j - 1], preferred_era)
        {
            sections.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn is_number_match(section: &ScoredSection) -> bool {
    section.match_type == MatchType::SectionNumber
}

/// Whether `a` should precede `b` when their scores are within the window
fn wins_tie(a: &ScoredSection, b: &ScoredSection, preferred_era: EraPreference) -> bool {
    if a.confidence_level != b.confidence_level {
        return a.confidence_level > b.confidence_level;
    }
    preferred_era.prefers(a.law_type()) && !preferred_era.prefers(b.law_type())
}
