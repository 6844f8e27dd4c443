//! The six legal codes and their current/previous pairing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which generation of criminal law a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LawEra {
    /// Codes enacted in 2023
    Current,
    /// Codes replaced by the 2023 enactments
    Previous,
}

/// One of the six indexed legal codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LawType {
    #[serde(rename = "BNS")]
    Bns,
    #[serde(rename = "BNSS")]
    Bnss,
    #[serde(rename = "BSA")]
    Bsa,
    #[serde(rename = "IPC")]
    Ipc,
    #[serde(rename = "CrPC")]
    Crpc,
    #[serde(rename = "IEA")]
    Iea,
}

impl LawType {
    /// All codes, current laws first
    pub const ALL: [LawType; 6] = [
        LawType::Bns,
        LawType::Bnss,
        LawType::Bsa,
        LawType::Ipc,
        LawType::Crpc,
        LawType::Iea,
    ];

    pub fn is_current(self) -> bool {
        matches!(self, LawType::Bns | LawType::Bnss | LawType::Bsa)
    }

    pub fn era(self) -> LawEra {
        if self.is_current() {
            LawEra::Current
        } else {
            LawEra::Previous
        }
    }

    /// The code this one replaced, or was replaced by
    pub fn counterpart(self) -> LawType {
        match self {
            LawType::Bns => LawType::Ipc,
            LawType::Bnss => LawType::Crpc,
            LawType::Bsa => LawType::Iea,
            LawType::Ipc => LawType::Bns,
            LawType::Crpc => LawType::Bnss,
            LawType::Iea => LawType::Bsa,
        }
    }

    /// Short display code ("BNS", "CrPC", ...)
    pub fn code(self) -> &'static str {
        match self {
            LawType::Bns => "BNS",
            LawType::Bnss => "BNSS",
            LawType::Bsa => "BSA",
            LawType::Ipc => "IPC",
            LawType::Crpc => "CrPC",
            LawType::Iea => "IEA",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            LawType::Bns => "Bharatiya Nyaya Sanhita (BNS) 2023",
            LawType::Bnss => "Bharatiya Nagarik Suraksha Sanhita (BNSS) 2023",
            LawType::Bsa => "Bharatiya Sakshya Adhiniyam (BSA) 2023",
            LawType::Ipc => "Indian Penal Code (IPC) 1860",
            LawType::Crpc => "Code of Criminal Procedure (CrPC) 1973",
            LawType::Iea => "Indian Evidence Act (IEA) 1872",
        }
    }

    /// Conventional dataset file stem ("bns" for `bns.json`)
    pub fn file_stem(self) -> &'static str {
        match self {
            LawType::Bns => "bns",
            LawType::Bnss => "bnss",
            LawType::Bsa => "bsa",
            LawType::Ipc => "ipc",
            LawType::Crpc => "crpc",
            LawType::Iea => "iea",
        }
    }

    /// Parse a code case-insensitively ("crpc", "CrPC", "CRPC")
    pub fn from_code(code: &str) -> Option<LawType> {
        LawType::ALL
            .into_iter()
            .find(|law| law.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl fmt::Display for LawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown law code: {0}")]
pub struct UnknownLaw(pub String);

impl FromStr for LawType {
    type Err = UnknownLaw;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LawType::from_code(s).ok_or_else(|| UnknownLaw(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counterpart_is_involution() {
        for law in LawType::ALL {
            assert_eq!(law.counterpart().counterpart(), law);
            assert_ne!(law.is_current(), law.counterpart().is_current());
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("crpc".parse::<LawType>().unwrap(), LawType::Crpc);
        assert_eq!("CRPC".parse::<LawType>().unwrap(), LawType::Crpc);
        assert_eq!(LawType::from_code(" bns "), Some(LawType::Bns));
        assert!("xyz".parse::<LawType>().is_err());
    }

    #[test]
    fn test_unknown_law_error_message() {
        let err = "xyz".parse::<LawType>().unwrap_err();
        assert_eq!(err, UnknownLaw("xyz".to_string()));
        assert_eq!(err.to_string(), "unknown law code: xyz");
    }

    #[test]
    fn test_serde_uses_display_code() {
        let json = serde_json::to_string(&LawType::Crpc).unwrap();
        assert_eq!(json, "\"CrPC\"");
        let parsed: LawType = serde_json::from_str("\"BNSS\"").unwrap();
        assert_eq!(parsed, LawType::Bnss);
    }
}
