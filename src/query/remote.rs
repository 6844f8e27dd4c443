//! Adapter for query analyses produced by a remote language model

use super::{normalize_query, EraPreference, QueryCategory, QueryFeatures, QueryIntent};
use crate::corpus::LawType;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteAnalysis {
    keywords: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    primary_law: Option<String>,
    #[serde(default)]
    secondary_law: Option<String>,
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    is_comparison: Option<bool>,
    #[serde(default)]
    specific_section: Option<Value>,
    #[serde(default)]
    preferred_law_type: Option<String>,
}

/// Parse a remote analyzer's reply into features
///
/// Returns `None` for anything that is not a JSON object with a `keywords`
/// array; callers then fall back to [`super::extract_features`].
pub fn parse_remote_analysis(raw: &str, query: &str) -> Option<QueryFeatures> {
    let json = json_object_slice(raw)?;
    let analysis: RemoteAnalysis = match serde_json::from_str(json) {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(error = %e, "remote analysis is not usable JSON");
            return None;
        }
    };

    let mut keywords: Vec<String> = Vec::new();
    for keyword in analysis.keywords {
        let keyword = keyword.trim().to_lowercase();
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    let mut intent = analysis
        .intent
        .as_deref()
        .map(QueryIntent::parse_lenient)
        .unwrap_or(QueryIntent::General);
    let law = analysis.primary_law.as_deref().and_then(present).and_then(LawType::from_code);
    let secondary_law = analysis
        .secondary_law
        .as_deref()
        .and_then(present)
        .and_then(LawType::from_code);

    if analysis.is_comparison == Some(true) && law.is_some() {
        intent = QueryIntent::Comparison;
    }

    let section = analysis.specific_section.and_then(|value| match value {
        Value::String(s) => present(&s).map(|s| s.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });
    let section = section.filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));

    let category = match analysis.category.as_deref().map(str::trim) {
        Some("general") => QueryCategory::General,
        Some("mixed") => QueryCategory::Mixed,
        _ => QueryCategory::Legal,
    };

    let mut features = QueryFeatures {
        law,
        secondary_law,
        section,
        intent,
        keywords,
        preferred_era: analysis
            .preferred_law_type
            .as_deref()
            .map(EraPreference::parse_lenient)
            .unwrap_or_default(),
        category,
        ..QueryFeatures::empty(normalize_query(query))
    };
    features.reconcile_laws();
    Some(features)
}

/// Treat empty, "undefined" and "null" as absent
fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    match trimmed {
        "" | "undefined" | "null" | "none" => None,
        _ => Some(trimmed),
    }
}

/// Slice from the first `{` to the last `}`, tolerating prose or code fences around it
fn json_object_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_analysis() {
        let raw = r#"{
            "keywords": ["Murder", "punishment"],
            "category": "legal",
            "primaryLaw": "IPC",
            "secondaryLaw": "undefined",
            "intent": "specific_section",
            "isComparison": false,
            "specificSection": "302",
            "preferredLawType": "previous"
        }"#;

        let features = parse_remote_analysis(raw, "Section 302 IPC").unwrap();
        assert_eq!(features.law, Some(LawType::Ipc));
        assert_eq!(features.secondary_law, None);
        assert_eq!(features.section.as_deref(), Some("302"));
        assert_eq!(features.intent, QueryIntent::SpecificSection);
        assert_eq!(features.keywords, vec!["murder", "punishment"]);
        assert_eq!(features.preferred_era, EraPreference::Previous);
        assert_eq!(features.query, "section 302 ipc");
    }

    #[test]
    fn test_parse_wrapped_in_fences() {
        let raw = "```json\n{\"keywords\": [\"bail\"], \"primaryLaw\": \"BNSS\", \"intent\": \"procedure\"}\n```";
        let features = parse_remote_analysis(raw, "how to get bail").unwrap();
        assert_eq!(features.law, Some(LawType::Bnss));
        assert_eq!(features.intent, QueryIntent::Procedure);
    }

    #[test]
    fn test_comparison_flag() {
        let raw = r#"{"keywords": ["murder"], "primaryLaw": "BNS", "secondaryLaw": "IPC", "intent": "punishment", "isComparison": true}"#;
        let features = parse_remote_analysis(raw, "compare").unwrap();
        assert!(features.is_comparison());
        assert_eq!(features.preferred_era, EraPreference::Both);
    }

    #[test]
    fn test_rejects_unusable_replies() {
        assert!(parse_remote_analysis("I cannot help with that", "q").is_none());
        assert!(parse_remote_analysis(r#"{"intent": "punishment"}"#, "q").is_none());
        assert!(parse_remote_analysis(r#"{"keywords": "murder"}"#, "q").is_none());
        assert!(parse_remote_analysis("}{", "q").is_none());
    }

    #[test]
    fn test_unknown_values_degrade() {
        let raw = r#"{"keywords": [], "primaryLaw": "XYZ", "intent": "chitchat", "specificSection": "abc"}"#;
        let features = parse_remote_analysis(raw, "q").unwrap();
        assert_eq!(features.law, None);
        assert_eq!(features.intent, QueryIntent::General);
        assert_eq!(features.section, None);
    }
}
