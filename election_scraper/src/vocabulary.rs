use log::debug;
use std::collections::BTreeSet;

use crate::config::ScrapeRules;
use crate::tokens::{is_district_marker, is_separator, tokenize};

/// The party labels printed in a document, lowercased.
///
/// Party names can span several words, so they are told apart from candidate
/// names by membership in this set rather than by their position.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct PartyVocabulary {
    labels: BTreeSet<String>,
}

impl PartyVocabulary {
    pub fn new() -> PartyVocabulary {
        PartyVocabulary::default()
    }

    pub fn from_labels<I, S>(labels: I) -> PartyVocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PartyVocabulary {
            labels: labels
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Pre-scans a whole document.
    pub fn extract<S: AsRef<str>>(lines: &[S], rules: &ScrapeRules) -> PartyVocabulary {
        let mut labels: BTreeSet<String> = BTreeSet::new();
        for line in lines.iter() {
            let tokens = tokenize(line.as_ref());
            if !is_candidate_line(&tokens, rules) {
                continue;
            }
            for (idx, token) in tokens.iter().enumerate().skip(1) {
                if is_separator(token) {
                    labels.insert(tokens[idx - 1].trim().to_lowercase());
                }
            }
        }
        debug!("PartyVocabulary::extract: labels: {:?}", labels);
        PartyVocabulary { labels }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// True if a known party label occurs anywhere in the field.
    pub fn matches(&self, field: &str) -> bool {
        let low = field.trim().to_lowercase();
        if low.is_empty() {
            return false;
        }
        self.labels
            .iter()
            .any(|l| !l.is_empty() && low.contains(l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.labels.iter()
    }
}

fn is_candidate_line(tokens: &[String], rules: &ScrapeRules) -> bool {
    match tokens.first() {
        Some(first) => {
            first.eq_ignore_ascii_case(&rules.house_marker)
                || is_district_marker(first)
                || (first.contains('.')
                    && first.chars().last().map(|c| c.is_ascii_digit()) == Some(true))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_precede_separators() {
        let lines = vec![
            "ALABAMA",
            "1. Smith, DEM ........ Jones, Liberal REP ........",
            "2. Brown, Jr., Green........ 12,000",
            "Robert Wild, Conservative ........ 45",
            "1,234 5,678",
        ];
        let vocab = PartyVocabulary::extract(&lines, &ScrapeRules::default());
        let labels: Vec<&String> = vocab.iter().collect();
        assert_eq!(labels, vec!["dem", "green", "rep"]);
        assert!(!vocab.contains("conservative"));
    }

    #[test]
    fn extraction_is_order_independent() {
        let rules = ScrapeRules::default();
        let a = vec!["1. A, DEM ....", "2. B, REP ....", "3. C, DEM ...."];
        let b = vec!["3. C, DEM ....", "1. A, DEM ....", "2. B, REP ...."];
        assert_eq!(
            PartyVocabulary::extract(&a, &rules),
            PartyVocabulary::extract(&b, &rules)
        );
        assert_eq!(PartyVocabulary::extract(&a, &rules).len(), 2);
    }

    #[test]
    fn house_marker_lines() {
        let lines = vec!["EPRESENTATIVE AT LARGE Doe, Independence .........."];
        let vocab = PartyVocabulary::extract(&lines, &ScrapeRules::default());
        assert!(vocab.contains("independence"));
    }

    #[test]
    fn matching_by_substring() {
        let vocab = PartyVocabulary::from_labels(["dem", "labor"]);
        assert!(vocab.matches("DEM"));
        assert!(vocab.matches("  Democratic-Farmer-Labor "));
        assert!(vocab.matches("Demarco"));
        assert!(!vocab.matches("Smith"));
        assert!(!vocab.matches(""));
        assert!(!PartyVocabulary::new().matches("Smith"));
    }

    #[test]
    fn dotted_first_token_ending_in_digit() {
        let lines = vec!["1.2 Smith, Liberal ........ 400", "p.3 Jones, Reform ........"];
        let vocab = PartyVocabulary::extract(&lines, &ScrapeRules::default());
        let labels: Vec<&String> = vocab.iter().collect();
        assert_eq!(labels, vec!["liberal", "reform"]);
    }
}
