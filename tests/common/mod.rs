//! Synthetic corpus shared by the integration tests
//!
//! Current-law datasets use the chaptered shape, previous-law datasets the
//! flat one, matching the real data files.
#![allow(dead_code)]

use nyaya::corpus::{CorpusIndex, LawDataset, LawType};
use std::path::Path;

pub const BNS: &str = r#"[
  {
    "chapter_number": 2,
    "chapter_title": "General explanations",
    "sections": [
      {
        "section_number": "2",
        "section_title": "Definitions",
        "content": ["In this Sanhita, unless the context otherwise requires,", "\"document\" means any matter expressed or described upon any substance."]
      }
    ]
  },
  {
    "chapter_number": "6",
    "chapter_title": "Of offences affecting the human body",
    "sections": [
      {
        "section_number": "100",
        "section_title": "Culpable homicide",
        "content": "Whoever causes death by doing an act with the intention of causing death commits the offence of culpable homicide."
      },
      {
        "section_number": "101",
        "section_title": "Murder",
        "content": ["Except in the cases hereinafter excepted, culpable homicide is murder."]
      },
      {
        "section_number": 103,
        "section_title": "Punishment for murder",
        "content": ["Whoever commits murder shall be punished with death or imprisonment for life, and shall also be liable to fine."]
      }
    ]
  },
  {
    "chapter_number": "17",
    "chapter_title": "Of offences against property",
    "sections": [
      {
        "section_number": "303",
        "section_title": "Theft",
        "content": "Whoever, intending to take dishonestly any movable property out of the possession of any person without that person's consent, moves that property, is said to commit theft."
      },
      {
        "section_number": "318",
        "section_title": "Cheating",
        "content": "Whoever, by deceiving any person, fraudulently or dishonestly induces the person so deceived to deliver any property, is said to cheat."
      }
    ]
  }
]"#;

pub const IPC: &str = r#"[
  {
    "chapter": 16,
    "chapter_title": "Of offences affecting the human body",
    "Section": 299,
    "section_title": "Culpable homicide",
    "section_desc": "Whoever causes death by doing an act with the intention of causing death commits the offence of culpable homicide."
  },
  {
    "chapter": 16,
    "chapter_title": "Of offences affecting the human body",
    "Section": 300,
    "section_title": "Murder",
    "section_desc": "Except in the cases hereinafter excepted, culpable homicide is murder."
  },
  {
    "chapter": 16,
    "chapter_title": "Of offences affecting the human body",
    "Section": "302",
    "section_title": "Punishment for murder",
    "section_desc": "Whoever commits murder shall be punished with death, or imprisonment for life, and shall also be liable to fine."
  },
  {
    "chapter": 17,
    "chapter_title": "Of offences against property",
    "Section": 378,
    "section_title": "Theft",
    "section_desc": "Whoever, intending to take dishonestly any movable property out of the possession of any person without that person's consent, moves that property, is said to commit theft."
  }
]"#;

pub const BNSS: &str = r#"[
  {
    "chapter_number": "5",
    "chapter_title": "Arrest of persons",
    "sections": [
      {
        "section_number": "35",
        "section_title": "When police may arrest without warrant",
        "content": "Any police officer may without an order from a Magistrate and without a warrant, arrest any person who commits a cognizable offence."
      }
    ]
  },
  {
    "chapter_number": "13",
    "chapter_title": "Information to the police and their powers to investigate",
    "sections": [
      {
        "section_number": "173",
        "section_title": "Information in cognizable cases",
        "content": "Every information relating to the commission of a cognizable offence may be given orally or by electronic communication to an officer in charge of a police station."
      }
    ]
  }
]"#;

pub const CRPC: &str = r#"[
  {
    "chapter": 12,
    "Section": 154,
    "section_title": "Information in cognizable cases",
    "section_desc": "Every information relating to the commission of a cognizable offence, if given orally to an officer in charge of a police station, shall be reduced to writing."
  }
]"#;

pub const BSA: &str = r#"[
  {
    "chapter_number": "2",
    "chapter_title": "Relevancy of facts",
    "sections": [
      {
        "section_number": "4",
        "section_title": "Relevancy of facts forming part of same transaction",
        "content": "Facts which are so connected with a fact in issue as to form part of the same transaction are relevant."
      }
    ]
  }
]"#;

pub const IEA: &str = r#"[
  {
    "Section": "6",
    "section_title": "Relevancy of facts forming part of same transaction",
    "section_desc": ["Facts which are so connected with a fact in issue as to form part of the same transaction are relevant."]
  }
]"#;

fn datasets() -> [(LawType, &'static str); 6] {
    [
        (LawType::Bns, BNS),
        (LawType::Bnss, BNSS),
        (LawType::Bsa, BSA),
        (LawType::Ipc, IPC),
        (LawType::Crpc, CRPC),
        (LawType::Iea, IEA),
    ]
}

/// The synthetic corpus, built in memory
pub fn corpus() -> CorpusIndex {
    let datasets = datasets()
        .into_iter()
        .map(|(law, json)| LawDataset::from_json(law, json).expect("fixture is valid JSON"))
        .collect();
    CorpusIndex::build(datasets)
}

/// Write the synthetic corpus as `<stem>.json` files into `dir`
pub fn write_corpus(dir: &Path) {
    for (law, json) in datasets() {
        std::fs::write(dir.join(format!("{}.json", law.file_stem())), json)
            .expect("Failed to write dataset");
    }
}
