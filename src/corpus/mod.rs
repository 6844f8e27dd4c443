//! Law corpus index
//!
//! This module provides:
//! - The closed set of indexed codes ([`LawType`]) with their current/previous pairing
//! - A canonical [`LawSection`] shape shared by every dataset
//! - An immutable [`CorpusIndex`] built once from raw JSON datasets
//!
//! The index is an explicit value handed to the selector; there is no
//! process-wide corpus.

mod law;
mod source;

pub use law::{LawEra, LawType, UnknownLaw};

use crate::error::{NyayaError, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use source::SourceRecord;
use std::path::Path;

/// A single addressable section of a legal code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawSection {
    pub law_type: LawType,
    pub is_current_law: bool,
    pub section_number: String,
    pub section_title: String,
    /// Ordered text blocks
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_number: Option<String>,
}

impl LawSection {
    /// Create a section with no chapter metadata
    pub fn new(
        law_type: LawType,
        section_number: impl Into<String>,
        section_title: impl Into<String>,
        content: Vec<String>,
    ) -> Self {
        Self {
            law_type,
            is_current_law: law_type.is_current(),
            section_number: section_number.into(),
            section_title: section_title.into(),
            content,
            chapter_title: None,
            chapter_name: None,
            chapter_number: None,
        }
    }

    pub fn with_chapter(
        mut self,
        number: Option<String>,
        title: Option<String>,
        name: Option<String>,
    ) -> Self {
        self.chapter_number = number;
        self.chapter_title = title;
        self.chapter_name = name;
        self
    }

    /// All content blocks joined with single spaces
    pub fn full_text(&self) -> String {
        self.content.join(" ")
    }
}

/// Raw records for one law, in either source shape
#[derive(Debug, Clone)]
pub struct LawDataset {
    pub law: LawType,
    pub records: Vec<Value>,
}

impl LawDataset {
    pub fn new(law: LawType, records: Vec<Value>) -> Self {
        Self { law, records }
    }

    /// Parse a dataset from JSON text. The top level must be an array.
    pub fn from_json(law: LawType, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| NyayaError::Json {
            source: e,
            context: format!("Failed to parse {} dataset", law),
        })?;

        match value {
            Value::Array(records) => Ok(Self::new(law, records)),
            _ => Err(NyayaError::Corpus(format!(
                "{} dataset must be a JSON array",
                law
            ))),
        }
    }
}

/// Section counts per law
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusStats {
    pub total: usize,
    pub per_law: Vec<(LawType, usize)>,
    pub skipped_records: usize,
    pub duplicate_sections: usize,
}

/// Flattened, immutable view over all six codes
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    sections: Vec<LawSection>,
    by_key: AHashMap<(LawType, String), usize>,
    skipped_records: usize,
    duplicate_sections: usize,
}

impl CorpusIndex {
    /// Build the index from raw datasets, appending in dataset order
    pub fn build(datasets: Vec<LawDataset>) -> Self {
        let mut index = CorpusIndex::default();

        for dataset in datasets {
            let law = dataset.law;
            let before = index.sections.len();

            for record in dataset.records {
                match SourceRecord::classify(record) {
                    Some(source) => {
                        let mapped = source.into_sections(law);
                        index.skipped_records += mapped.skipped;
                        for section in mapped.sections {
                            index.push(section);
                        }
                    }
                    None => {
                        index.skipped_records += 1;
                        tracing::warn!(law = %law, "skipping record of unknown shape");
                    }
                }
            }

            tracing::debug!(
                law = %law,
                sections = index.sections.len() - before,
                "indexed dataset"
            );
        }

        index
    }

    /// Build directly from canonical sections (synthetic corpora, tests)
    pub fn from_sections(sections: Vec<LawSection>) -> Self {
        let mut index = CorpusIndex::default();
        for section in sections {
            index.push(section);
        }
        index
    }

    /// Load `bns.json`, `bnss.json`, ... from a directory
    ///
    /// Missing files are skipped with a warning; unreadable or malformed files
    /// are errors.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(NyayaError::Corpus(format!(
                "Corpus directory not found: {}",
                dir.display()
            )));
        }

        let mut datasets = Vec::new();
        for law in LawType::ALL {
            let path = dir.join(format!("{}.json", law.file_stem()));
            if !path.exists() {
                tracing::warn!(law = %law, path = %path.display(), "dataset file missing");
                continue;
            }

            let content = std::fs::read_to_string(&path).map_err(|e| NyayaError::Io {
                source: e,
                context: format!("Failed to read dataset: {}", path.display()),
            })?;
            datasets.push(LawDataset::from_json(law, &content)?);
        }

        let index = Self::build(datasets);
        tracing::info!(
            sections = index.len(),
            skipped = index.skipped_records,
            "corpus loaded from {}",
            dir.display()
        );
        Ok(index)
    }

    fn push(&mut self, section: LawSection) {
        let key = (section.law_type, section.section_number.clone());
        if self.by_key.contains_key(&key) {
            self.duplicate_sections += 1;
            tracing::warn!(
                law = %section.law_type,
                section = %section.section_number,
                "duplicate section number, keeping the first"
            );
            return;
        }
        self.by_key.insert(key, self.sections.len());
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[LawSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by its identity
    pub fn get(&self, law: LawType, section_number: &str) -> Option<&LawSection> {
        self.by_key
            .get(&(law, section_number.to_string()))
            .map(|&idx| &self.sections[idx])
    }

    pub fn contains(&self, law: LawType, section_number: &str) -> bool {
        self.get(law, section_number).is_some()
    }

    /// All sections of one law, in index order
    pub fn by_law(&self, law: LawType) -> impl Iterator<Item = &LawSection> {
        self.sections.iter().filter(move |s| s.law_type == law)
    }

    pub fn stats(&self) -> CorpusStats {
        let per_law = LawType::ALL
            .into_iter()
            .map(|law| (law, self.by_law(law).count()))
            .collect();

        CorpusStats {
            total: self.sections.len(),
            per_law,
            skipped_records: self.skipped_records,
            duplicate_sections: self.duplicate_sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn datasets() -> Vec<LawDataset> {
        vec![
            LawDataset::new(
                LawType::Bns,
                vec![json!({
                    "chapter_title": "Of offences affecting life",
                    "sections": [
                        {"section_number": "101", "section_title": "Murder", "content": ["Except in the cases hereinafter excepted"]},
                        {"section_number": "103", "section_title": "Punishment for murder", "content": ["shall be punished with death"]}
                    ]
                })],
            ),
            LawDataset::new(
                LawType::Ipc,
                vec![
                    json!({"Section": 302, "section_title": "Punishment for murder", "section_desc": "shall be punished with death"}),
                    json!({"unexpected": true}),
                    json!({"Section": "103", "section_title": "When right of private defence extends", "section_desc": "..."}),
                ],
            ),
        ]
    }

    #[test]
    fn test_build_flattens_in_dataset_order() {
        let index = CorpusIndex::build(datasets());

        assert_eq!(index.len(), 4);
        let order: Vec<_> = index
            .sections()
            .iter()
            .map(|s| (s.law_type, s.section_number.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (LawType::Bns, "101"),
                (LawType::Bns, "103"),
                (LawType::Ipc, "302"),
                (LawType::Ipc, "103"),
            ]
        );
        assert_eq!(index.stats().skipped_records, 1);
    }

    #[test]
    fn test_same_number_distinct_across_laws() {
        let index = CorpusIndex::build(datasets());

        let bns = index.get(LawType::Bns, "103").unwrap();
        let ipc = index.get(LawType::Ipc, "103").unwrap();
        assert_ne!(bns.section_title, ipc.section_title);
        assert!(!index.contains(LawType::Bnss, "103"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let index = CorpusIndex::from_sections(vec![
            LawSection::new(LawType::Bns, "1", "First", vec![]),
            LawSection::new(LawType::Bns, "1", "Second", vec![]),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get(LawType::Bns, "1").unwrap().section_title, "First");
        assert_eq!(index.stats().duplicate_sections, 1);
    }

    #[test]
    fn test_dataset_must_be_array() {
        assert!(LawDataset::from_json(LawType::Bns, "{\"a\": 1}").is_err());
        assert!(LawDataset::from_json(LawType::Bns, "not json").is_err());
        assert_eq!(
            LawDataset::from_json(LawType::Bns, "[]").unwrap().records.len(),
            0
        );
    }
}
