//! Small legal thesaurus used as a weak relevance signal

const RELATED_TERMS: &[(&str, &[&str])] = &[
    // substantive offences
    ("murder", &["kill", "homicide", "culpable", "causing death", "intentionally"]),
    ("theft", &["steal", "dishonestly", "movable property", "taking"]),
    ("assault", &["hurt", "grievous", "voluntarily", "causing hurt", "criminal force"]),
    ("criminal", &["offence", "crime", "guilty", "liable"]),
    ("property", &["movable", "immovable", "ownership", "possession"]),
    ("conspiracy", &["agreement", "common intention", "abetment"]),
    ("cheating", &["deception", "fraudulently", "induce", "deceive"]),
    ("defamation", &["reputation", "imputation", "harm"]),
    ("kidnapping", &["abduction", "wrongful restraint", "wrongful confinement"]),
    ("rape", &["sexual", "consent", "penetration", "intercourse"]),
    ("robbery", &["extortion", "force", "fear of instant"]),
    ("bribery", &["corruption", "gratification", "public servant"]),
    ("forgery", &["false document", "signature", "fraudulent"]),
    ("dowry", &["marriage", "demand", "harassment", "cruelty"]),
    ("domestic", &["cruelty", "wife", "husband", "matrimonial"]),
    // procedure
    ("arrest", &["apprehend", "detain", "custody", "warrant"]),
    ("bail", &["release", "bond", "surety", "anticipatory"]),
    ("trial", &["proceedings", "prosecution", "accused"]),
    ("appeal", &["higher court", "revision", "review"]),
    ("fir", &["first information", "information in cognizable", "officer in charge"]),
    ("witness", &["testimony", "deposition", "examination", "cross-examination"]),
    ("evidence", &["proof", "document", "testimony", "circumstantial"]),
    // general
    ("jurisdiction", &["territorial", "pecuniary", "concurrent"]),
    ("limitation", &["time limit", "period of limitation", "barred"]),
    ("procedure", &["process", "steps", "manner"]),
    ("rights", &["entitlement", "privilege", "protection"]),
    ("duties", &["obligation", "responsibility", "accountability"]),
];

/// Related terms for a keyword; empty if the keyword is not in the thesaurus
pub fn related_terms(keyword: &str) -> &'static [&'static str] {
    RELATED_TERMS
        .iter()
        .find(|(key, _)| *key == keyword)
        .map(|(_, terms)| *terms)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown() {
        assert!(related_terms("murder").contains(&"culpable"));
        assert!(related_terms("hello").is_empty());
    }
}
