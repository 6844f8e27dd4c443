//! Query text normalization

use std::sync::LazyLock;

use regex::Regex;

/// Law acronym written directly against "section"/"sec" ("bnssection 5")
static GLUED_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(bnss|bns|bsa|ipc|crpc|iea)(section|sec)").expect("glued section regex is valid")
});

/// Acronym or section marker written directly against a digit run ("bns302", "section5")
static DIGIT_GAP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(section|sec|bnss|bns|bsa|ipc|crpc|iea)\.?(\d+)").expect("digit gap regex is valid")
});

/// Lowercase, trim, split glued law/section tokens from digits, collapse whitespace.
///
/// Total and idempotent: any input, including the empty string, yields a string,
/// and normalizing twice gives the same result as normalizing once.
pub fn normalize_query(query: &str) -> String {
    let lowered = query.trim().to_lowercase();
    let unglued = GLUED_SECTION_RE.replace_all(&lowered, "$1 $2");
    let spaced = DIGIT_GAP_RE.replace_all(&unglued, "$1 $2");
    condense_whitespace(&spaced)
}

fn condense_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_query("  What IS Murder?  "), "what is murder?");
    }

    #[test]
    fn test_splits_digits_from_markers() {
        assert_eq!(normalize_query("section5"), "section 5");
        assert_eq!(normalize_query("BNS302"), "bns 302");
        assert_eq!(normalize_query("bnss99 bail"), "bnss 99 bail");
        assert_eq!(normalize_query("sec.420 ipc"), "sec 420 ipc");
    }

    #[test]
    fn test_splits_glued_section_marker() {
        assert_eq!(normalize_query("ipcsection302"), "ipc section 302");
        assert_eq!(normalize_query("bnssection 5"), "bns section 5");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_query("theft \t in\n\n bns"), "theft in bns");
    }

    #[test]
    fn test_empty_and_idempotent() {
        assert_eq!(normalize_query(""), "");
        for q in ["Section5 of BNS", "crpc  438  anticipatory bail", "hello"] {
            let once = normalize_query(q);
            assert_eq!(normalize_query(&once), once);
        }
    }

    #[test]
    fn test_does_not_split_inside_words() {
        assert_eq!(normalize_query("subsection2"), "subsection2");
    }
}
