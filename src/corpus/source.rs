//! Adapters for the two raw dataset shapes
//!
//! Current-law datasets group sections under chapters; previous-law datasets
//! are flat per-section records with their own field names. Both are mapped
//! onto [`LawSection`] here so nothing downstream sees the raw shapes.

use super::{LawSection, LawType};
use serde::Deserialize;
use serde_json::Value;

/// A JSON scalar that may arrive as a number or a string ("302" or 302)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Number(n) => n.to_string(),
        }
    }
}

/// Section text: a single string or an ordered list of blocks
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ContentField {
    Text(String),
    Blocks(Vec<Value>),
}

impl ContentField {
    fn into_blocks(self) -> Vec<String> {
        match self {
            ContentField::Text(text) if text.trim().is_empty() => Vec::new(),
            ContentField::Text(text) => vec![text],
            ContentField::Blocks(values) => values
                .into_iter()
                .filter_map(|value| match value {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .filter(|block| !block.trim().is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChapterRecord {
    #[serde(default)]
    chapter_number: Option<Scalar>,
    #[serde(default)]
    chapter_title: Option<String>,
    #[serde(default)]
    chapter_name: Option<String>,
    sections: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ChapterSection {
    #[serde(default)]
    section_number: Option<Scalar>,
    #[serde(default)]
    section_title: Option<String>,
    #[serde(default)]
    content: Option<ContentField>,
}

#[derive(Debug, Deserialize)]
struct FlatRecord {
    #[serde(rename = "Section")]
    section: Scalar,
    #[serde(default)]
    section_title: Option<String>,
    #[serde(default)]
    section_desc: Option<ContentField>,
    #[serde(default)]
    chapter: Option<Scalar>,
    #[serde(default)]
    chapter_title: Option<String>,
}

/// Sections mapped from one record, plus the parts that had to be dropped
#[derive(Debug, Default)]
pub(super) struct MappedRecord {
    pub sections: Vec<LawSection>,
    pub skipped: usize,
}

/// One raw dataset record, classified by shape
#[derive(Debug)]
pub(super) enum SourceRecord {
    Chaptered(Value),
    Flat(Value),
}

impl SourceRecord {
    /// Classify a record by the field that identifies its shape
    pub(super) fn classify(value: Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.contains_key("sections") {
            Some(SourceRecord::Chaptered(value))
        } else if object.contains_key("Section") {
            Some(SourceRecord::Flat(value))
        } else {
            None
        }
    }

    /// Map into canonical sections. Invalid parts are skipped with a warning.
    pub(super) fn into_sections(self, law: LawType) -> MappedRecord {
        match self {
            SourceRecord::Chaptered(value) => chaptered_sections(value, law),
            SourceRecord::Flat(value) => match flat_section(value, law) {
                Some(section) => MappedRecord {
                    sections: vec![section],
                    skipped: 0,
                },
                None => MappedRecord {
                    sections: Vec::new(),
                    skipped: 1,
                },
            },
        }
    }
}

fn chaptered_sections(value: Value, law: LawType) -> MappedRecord {
    let chapter: ChapterRecord = match serde_json::from_value(value) {
        Ok(chapter) => chapter,
        Err(e) => {
            tracing::warn!(law = %law, error = %e, "skipping malformed chapter record");
            return MappedRecord {
                sections: Vec::new(),
                skipped: 1,
            };
        }
    };

    let chapter_number = chapter.chapter_number.map(Scalar::into_string);
    let mut mapped = MappedRecord {
        sections: Vec::with_capacity(chapter.sections.len()),
        skipped: 0,
    };

    for raw in chapter.sections {
        let parsed: ChapterSection = match serde_json::from_value(raw) {
            Ok(section) => section,
            Err(e) => {
                tracing::warn!(law = %law, error = %e, "skipping malformed section");
                mapped.skipped += 1;
                continue;
            }
        };

        let Some(number) = parsed
            .section_number
            .map(Scalar::into_string)
            .filter(|n| !n.is_empty())
        else {
            tracing::warn!(law = %law, "skipping section without a number");
            mapped.skipped += 1;
            continue;
        };

        mapped.sections.push(LawSection {
            law_type: law,
            is_current_law: law.is_current(),
            section_number: number,
            section_title: parsed.section_title.unwrap_or_default(),
            content: parsed
                .content
                .map(ContentField::into_blocks)
                .unwrap_or_default(),
            chapter_title: chapter.chapter_title.clone(),
            chapter_name: chapter.chapter_name.clone(),
            chapter_number: chapter_number.clone(),
        });
    }

    mapped
}

fn flat_section(value: Value, law: LawType) -> Option<LawSection> {
    let record: FlatRecord = match serde_json::from_value(value) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(law = %law, error = %e, "skipping malformed flat record");
            return None;
        }
    };

    let number = record.section.into_string();
    if number.is_empty() {
        tracing::warn!(law = %law, "skipping flat record with empty Section");
        return None;
    }

    Some(LawSection {
        law_type: law,
        is_current_law: law.is_current(),
        section_number: number,
        section_title: record.section_title.unwrap_or_default(),
        content: record
            .section_desc
            .map(ContentField::into_blocks)
            .unwrap_or_default(),
        chapter_title: record.chapter_title,
        chapter_name: None,
        chapter_number: record.chapter.map(Scalar::into_string),
    })
}
