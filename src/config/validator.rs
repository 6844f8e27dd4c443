use crate::config::{Config, SCHEMA_VERSION};
use crate::error::{NyayaError, Result, ValidationError};
use crate::query::QueryPatterns;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration, reporting every problem at once
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_corpus(config, &mut errors);
        Self::validate_scoring(config, &mut errors);
        Self::validate_ranking(config, &mut errors);
        Self::validate_assistant(config, &mut errors);
        Self::validate_patterns(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(NyayaError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != SCHEMA_VERSION {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_corpus(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.corpus.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "corpus.data_dir",
                "Corpus directory cannot be empty",
            ));
        }
    }

    /// The weights only work if their relative order holds
    fn validate_scoring(config: &Config, errors: &mut Vec<ValidationError>) {
        let w = &config.scoring;

        let others = [
            ("law_exact", w.law_exact),
            ("law_era", w.law_era),
            ("title_exact", w.title_exact),
            ("title_partial", w.title_partial),
            ("title_edge", w.title_edge),
            ("content", w.content),
            ("content_repeat_cap", w.content_repeat_cap),
            ("intent_punishment", w.intent_punishment),
            ("intent_definition", w.intent_definition),
            ("intent_procedure", w.intent_procedure),
            ("intent_sop_forms", w.intent_sop_forms),
            ("chapter", w.chapter),
            ("related_term", w.related_term),
            ("recency", w.recency),
        ];
        for (name, value) in others {
            if value >= w.section_number {
                errors.push(ValidationError::new(
                    "scoring.section_number",
                    format!(
                        "section_number ({}) must exceed {} ({})",
                        w.section_number, name, value
                    ),
                ));
            }
        }

        if w.law_exact <= w.law_era {
            errors.push(ValidationError::new(
                "scoring.law_exact",
                format!(
                    "law_exact ({}) must exceed law_era ({})",
                    w.law_exact, w.law_era
                ),
            ));
        }

        if w.title_exact <= w.title_partial {
            errors.push(ValidationError::new(
                "scoring.title_exact",
                format!(
                    "title_exact ({}) must exceed title_partial ({})",
                    w.title_exact, w.title_partial
                ),
            ));
        }

        if w.title_partial <= w.content {
            errors.push(ValidationError::new(
                "scoring.title_partial",
                format!(
                    "title_partial ({}) must exceed content ({})",
                    w.title_partial, w.content
                ),
            ));
        }

        if w.high_threshold <= w.medium_threshold {
            errors.push(ValidationError::new(
                "scoring.high_threshold",
                format!(
                    "high_threshold ({}) must exceed medium_threshold ({})",
                    w.high_threshold, w.medium_threshold
                ),
            ));
        }
    }

    fn validate_ranking(config: &Config, errors: &mut Vec<ValidationError>) {
        let ranking = &config.ranking;

        if ranking.standard_limit == 0 {
            errors.push(ValidationError::new(
                "ranking.standard_limit",
                "Standard limit must be greater than 0",
            ));
        }

        if ranking.comparison_limit == 0 {
            errors.push(ValidationError::new(
                "ranking.comparison_limit",
                "Comparison limit must be greater than 0",
            ));
        }

        if ranking.comparison_limit < ranking.standard_limit {
            errors.push(ValidationError::new(
                "ranking.comparison_limit",
                format!(
                    "Comparison limit ({}) cannot be below the standard limit ({})",
                    ranking.comparison_limit, ranking.standard_limit
                ),
            ));
        }
    }

    fn validate_assistant(config: &Config, errors: &mut Vec<ValidationError>) {
        let assistant = &config.assistant;

        let temp = assistant.temperature;
        if !(0.0..=2.0).contains(&temp) {
            errors.push(ValidationError::new(
                "assistant.temperature",
                format!("Temperature must be between 0.0 and 2.0, got {}", temp),
            ));
        }

        if assistant.model.is_empty() {
            errors.push(ValidationError::new(
                "assistant.model",
                "Model name cannot be empty",
            ));
        }
    }

    fn validate_patterns(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.patterns.intent_rules.is_empty() {
            errors.push(ValidationError::new(
                "patterns.intent_rules",
                "At least one intent rule is required",
            ));
        }

        if let Err(e) = QueryPatterns::from_config(&config.patterns) {
            errors.push(ValidationError::new("patterns", e.to_string()));
        }
    }
}
