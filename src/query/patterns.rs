//! Pattern registry for query feature extraction
//!
//! This module provides:
//! - Ordered intent rules (first match wins, last rule is a catch-all)
//! - Law mention aliases (codes and full-name fragments)
//! - Section-number and law-era patterns
//! - The keyword stopword list
//!
//! Patterns are plain strings in [`PatternsConfig`] so they can be overridden
//! from the configuration file; [`QueryPatterns`] holds them pre-compiled.

use super::QueryIntent;
use crate::corpus::LawType;
use crate::error::{NyayaError, Result};
use ahash::AHashSet;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Intent rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRuleConfig {
    pub intent: QueryIntent,
    pub pattern: String,
}

/// Law mention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawAliasConfig {
    pub law: LawType,
    pub patterns: Vec<String>,
}

/// Query pattern configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    /// Evaluated in order against the normalized query
    pub intent_rules: Vec<IntentRuleConfig>,
    pub law_aliases: Vec<LawAliasConfig>,
    /// First capture group is the section number
    pub section_pattern: String,
    /// Matches phrases asking about the replaced codes ("old law")
    pub previous_era_pattern: String,
    pub stopwords: Vec<String>,
    /// Tokens this short or shorter are never keywords
    pub max_ignored_token_len: usize,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        let rule = |intent, pattern: &str| IntentRuleConfig {
            intent,
            pattern: pattern.to_string(),
        };
        let alias = |law, patterns: &[&str]| LawAliasConfig {
            law,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        };

        Self {
            intent_rules: vec![
                rule(
                    QueryIntent::Punishment,
                    r"\b(punish\w*|penalt(?:y|ies)|sentenc\w*|imprison\w*|fines?|jail|prison)\b",
                ),
                rule(
                    QueryIntent::Definition,
                    r"\b(define[sd]?|definitions?|meaning|what is|what are|what constitutes)\b",
                ),
                rule(
                    QueryIntent::Procedure,
                    r"\b(procedures?|process|how to|how do|how can|steps|file|filing|apply)\b",
                ),
                rule(
                    QueryIntent::Comparison,
                    r"\b(compare|comparison|difference|differences|differ|vs|versus)\b",
                ),
                rule(QueryIntent::SpecificSection, r"\b(?:section|sec)\s*\d+"),
                rule(
                    QueryIntent::SopForms,
                    r"(\bsops?\b|\bs\.o\.p\b|\bforms?\b|\btemplates?\b)",
                ),
                rule(QueryIntent::General, r".*"),
            ],
            law_aliases: vec![
                alias(LawType::Bns, &[r"\bbns\b", r"bharatiya nyaya", r"nyaya sanhita"]),
                alias(
                    LawType::Bnss,
                    &[r"\bbnss\b", r"bharatiya nagarik", r"nagarik suraksha"],
                ),
                alias(
                    LawType::Bsa,
                    &[r"\bbsa\b", r"bharatiya sakshya", r"sakshya adhiniyam"],
                ),
                alias(LawType::Ipc, &[r"\bipc\b", r"indian penal", r"penal code"]),
                alias(
                    LawType::Crpc,
                    &[r"\bcr\.?p\.?c\b", r"criminal procedure", r"code of criminal"],
                ),
                alias(LawType::Iea, &[r"\biea\b", r"evidence act", r"indian evidence"]),
            ],
            section_pattern: r"\b(?:section|sec)\s*(\d+)".to_string(),
            previous_era_pattern:
                r"\b(old|older|previous|former|repealed|earlier)\s+(laws?|codes?|acts?)\b"
                    .to_string(),
            stopwords: [
                "the", "is", "what", "how", "when", "where", "why", "and", "or", "but", "in",
                "on", "at", "to", "for", "of", "with", "by", "under", "are", "was", "were",
                "does", "can", "you", "have", "any", "about", "tell", "explain", "please",
                "between", "this", "that", "there", "which", "who", "law", "laws", "sec",
                "section", "sections", "provision", "provisions", "act", "code",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_ignored_token_len: 2,
        }
    }
}

/// Compiled intent rule
#[derive(Debug, Clone)]
pub struct CompiledIntentRule {
    pub intent: QueryIntent,
    pub regex: Regex,
}

/// Compiled law mention matcher
#[derive(Debug, Clone)]
pub struct CompiledLawAlias {
    pub law: LawType,
    pub patterns: Vec<Regex>,
}

/// Pattern registry with all pre-compiled patterns
#[derive(Debug, Clone)]
pub struct QueryPatterns {
    pub intent_rules: Vec<CompiledIntentRule>,
    pub law_aliases: Vec<CompiledLawAlias>,
    pub section: Regex,
    pub previous_era: Regex,
    pub stopwords: AHashSet<String>,
    pub max_ignored_token_len: usize,
}

impl QueryPatterns {
    /// Build pattern registry from configuration
    pub fn from_config(config: &PatternsConfig) -> Result<Self> {
        let intent_rules = config
            .intent_rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|regex| CompiledIntentRule {
                        intent: rule.intent,
                        regex,
                    })
                    .map_err(|e| {
                        NyayaError::Config(format!(
                            "Invalid intent pattern for '{}': {}",
                            rule.intent, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let law_aliases = config
            .law_aliases
            .iter()
            .map(|alias| {
                let patterns = alias
                    .patterns
                    .iter()
                    .map(|p| {
                        Regex::new(p).map_err(|e| {
                            NyayaError::Config(format!(
                                "Invalid law alias pattern for '{}': {}",
                                alias.law, e
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledLawAlias {
                    law: alias.law,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let section = Regex::new(&config.section_pattern)
            .map_err(|e| NyayaError::Config(format!("Invalid section pattern: {}", e)))?;
        if section.captures_len() < 2 {
            return Err(NyayaError::Config(
                "Section pattern must have a capture group for the number".to_string(),
            ));
        }

        let previous_era = Regex::new(&config.previous_era_pattern)
            .map_err(|e| NyayaError::Config(format!("Invalid previous-era pattern: {}", e)))?;

        Ok(Self {
            intent_rules,
            law_aliases,
            section,
            previous_era,
            stopwords: config.stopwords.iter().map(|s| s.to_lowercase()).collect(),
            max_ignored_token_len: config.max_ignored_token_len,
        })
    }

    /// First intent rule matching the text; `General` if none does
    pub fn detect_intent(&self, text: &str) -> QueryIntent {
        self.intent_rules
            .iter()
            .find(|rule| rule.regex.is_match(text))
            .map(|rule| rule.intent)
            .unwrap_or(QueryIntent::General)
    }

    /// Laws mentioned in the text, ordered by first mention
    pub fn detect_laws(&self, text: &str) -> Vec<LawType> {
        let mut mentions: Vec<(usize, LawType)> = self
            .law_aliases
            .iter()
            .filter_map(|alias| {
                alias
                    .patterns
                    .iter()
                    .filter_map(|p| p.find(text).map(|m| m.start()))
                    .min()
                    .map(|pos| (pos, alias.law))
            })
            .collect();

        mentions.sort_by_key(|(pos, _)| *pos);

        let mut laws = Vec::with_capacity(mentions.len());
        for (_, law) in mentions {
            if !laws.contains(&law) {
                laws.push(law);
            }
        }
        laws
    }

    /// First section number in the text
    pub fn detect_section(&self, text: &str) -> Option<String> {
        self.section
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn mentions_previous_era(&self, text: &str) -> bool {
        self.previous_era.is_match(text)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> QueryPatterns {
        QueryPatterns::from_config(&PatternsConfig::default()).unwrap()
    }

    #[test]
    fn test_default_patterns_compile() {
        let registry = patterns();
        assert_eq!(registry.intent_rules.len(), 7);
        assert_eq!(registry.law_aliases.len(), 6);
    }

    #[test]
    fn test_intent_priority_order() {
        let registry = patterns();
        assert_eq!(
            registry.detect_intent("what is the punishment for theft"),
            QueryIntent::Punishment
        );
        assert_eq!(registry.detect_intent("what is murder"), QueryIntent::Definition);
        assert_eq!(registry.detect_intent("how to file fir"), QueryIntent::Procedure);
        assert_eq!(
            registry.detect_intent("compare murder provisions"),
            QueryIntent::Comparison
        );
        assert_eq!(
            registry.detect_intent("section 420 ipc"),
            QueryIntent::SpecificSection
        );
        assert_eq!(
            registry.detect_intent("do you have any forms"),
            QueryIntent::SopForms
        );
        assert_eq!(registry.detect_intent("hello"), QueryIntent::General);
        assert_eq!(registry.detect_intent(""), QueryIntent::General);
    }

    #[test]
    fn test_define_is_not_fine() {
        let registry = patterns();
        assert_eq!(registry.detect_intent("define theft"), QueryIntent::Definition);
    }

    #[test]
    fn test_detect_laws_in_mention_order() {
        let registry = patterns();
        assert_eq!(
            registry.detect_laws("compare murder in bns and ipc"),
            vec![LawType::Bns, LawType::Ipc]
        );
        assert_eq!(
            registry.detect_laws("indian penal code vs bharatiya nyaya sanhita"),
            vec![LawType::Ipc, LawType::Bns]
        );
        assert_eq!(registry.detect_laws("bnss section 9"), vec![LawType::Bnss]);
        assert!(registry.detect_laws("hello").is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let mut config = PatternsConfig::default();
        config.intent_rules[0].pattern = "(unclosed".to_string();
        assert!(QueryPatterns::from_config(&config).is_err());
    }

    #[test]
    fn test_section_pattern_requires_group() {
        let config = PatternsConfig {
            section_pattern: r"section \d+".to_string(),
            ..PatternsConfig::default()
        };
        assert!(QueryPatterns::from_config(&config).is_err());
    }
}
