//! Free-text symptom extraction against a fixed keyword vocabulary.
//!
//! Tokens are lowercased, reduced to a lemma, and looked up in the
//! keyword table; hits become canonical symptom tags in first-occurrence
//! order. A typed symptom is only consulted when the text yields nothing.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").unwrap());

/// Fixed lemma → canonical tag table, compiled into the process.
fn default_keywords() -> HashMap<&'static str, &'static str> {
    let mut map = HashMap::new();
    map.insert("fever", "fever");
    map.insert("feverish", "fever");
    map.insert("temperature", "fever");
    map.insert("chill", "fever");
    map.insert("cough", "cough");
    map.insert("headache", "headache");
    map.insert("migraine", "headache");
    map.insert("fatigue", "fatigue");
    map.insert("tired", "fatigue");
    map.insert("exhausted", "fatigue");
    map.insert("weak", "fatigue");
    map.insert("weakness", "fatigue");
    map.insert("nausea", "nausea");
    map.insert("nauseous", "nausea");
    map.insert("vomit", "nausea");
    map.insert("queasy", "nausea");
    map.insert("rash", "rash");
    map.insert("itch", "rash");
    map.insert("itchy", "rash");
    map.insert("hive", "rash");
    map.insert("throat", "sore throat");
    map.insert("swallow", "sore throat");
    map
}

/// Candidate lemmas for a token: the token itself, then simple
/// suffix-stripped forms ("fevers", "coughing", "itched").
fn lemma_candidates(token: &str) -> Vec<String> {
    let mut candidates = vec![token.to_string()];
    for suffix in ["s", "es", "ing", "ed"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() >= 3 {
                candidates.push(stem.to_string());
            }
        }
    }
    candidates
}

pub struct SymptomNormalizer {
    keywords: HashMap<&'static str, &'static str>,
}

impl SymptomNormalizer {
    pub fn new() -> Self {
        Self {
            keywords: default_keywords(),
        }
    }

    /// Map free text to canonical tags, deduped, first occurrence first.
    pub fn extract_tags(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let mut tags: Vec<String> = Vec::new();
        for token in WORD_PATTERN.find_iter(&lower) {
            if let Some(tag) = self.lookup(token.as_str()) {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
        }
        tags
    }

    fn lookup(&self, token: &str) -> Option<&'static str> {
        lemma_candidates(token)
            .iter()
            .find_map(|candidate| self.keywords.get(candidate.as_str()).copied())
    }

    /// Resolve the symptoms for one request: tags from the description
    /// when it has any, else the normalized typed symptom, else nothing.
    ///
    /// The fallback is not validated against the model vocabulary here.
    pub fn resolve(&self, description: Option<&str>, typed: Option<&str>) -> Vec<String> {
        if let Some(text) = description {
            let tags = self.extract_tags(text);
            if !tags.is_empty() {
                return tags;
            }
        }
        match typed.map(|s| s.trim().to_lowercase()) {
            Some(symptom) if !symptom.is_empty() => vec![symptom],
            _ => Vec::new(),
        }
    }
}

impl Default for SymptomNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keyword_yields_single_tag() {
        let normalizer = SymptomNormalizer::new();
        let tags = normalizer.extract_tags("fever and fever again");
        assert_eq!(tags, vec!["fever"]);
    }

    #[test]
    fn tags_keep_first_occurrence_order() {
        let normalizer = SymptomNormalizer::new();
        let tags = normalizer.extract_tags("Coughing all night, then a slight fever");
        assert_eq!(tags, vec!["cough", "fever"]);
    }

    #[test]
    fn suffixed_forms_reduce_to_lemma() {
        let normalizer = SymptomNormalizer::new();
        assert_eq!(normalizer.extract_tags("rashes on both arms"), vec!["rash"]);
        assert_eq!(normalizer.extract_tags("vomiting since morning"), vec!["nausea"]);
        assert_eq!(normalizer.extract_tags("bad headaches"), vec!["headache"]);
    }

    #[test]
    fn synonyms_map_to_canonical_tags() {
        let normalizer = SymptomNormalizer::new();
        assert_eq!(normalizer.extract_tags("migraine again"), vec!["headache"]);
        assert_eq!(
            normalizer.extract_tags("so tired and weak"),
            vec!["fatigue"]
        );
        assert_eq!(
            normalizer.extract_tags("hard to swallow"),
            vec!["sore throat"]
        );
    }

    #[test]
    fn unrelated_text_yields_nothing() {
        let normalizer = SymptomNormalizer::new();
        assert!(normalizer.extract_tags("feeling a bit odd today").is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let normalizer = SymptomNormalizer::new();
        let text = "fever, vomiting, fever, headaches";
        let first = normalizer.extract_tags(text);
        let second = normalizer.extract_tags(text);
        assert_eq!(first, second);
        assert_eq!(first, vec!["fever", "nausea", "headache"]);
    }

    #[test]
    fn description_tags_win_over_typed_symptom() {
        let normalizer = SymptomNormalizer::new();
        let resolved = normalizer.resolve(Some("coughing fits"), Some("fever"));
        assert_eq!(resolved, vec!["cough"]);
    }

    #[test]
    fn typed_symptom_used_when_description_has_no_keywords() {
        let normalizer = SymptomNormalizer::new();
        let resolved = normalizer.resolve(Some("feeling strange"), Some("cough"));
        assert_eq!(resolved, vec!["cough"]);
    }

    #[test]
    fn typed_symptom_is_trimmed_and_lowercased() {
        let normalizer = SymptomNormalizer::new();
        let resolved = normalizer.resolve(None, Some("  Fever "));
        assert_eq!(resolved, vec!["fever"]);
    }

    #[test]
    fn typed_symptom_passes_through_unvalidated() {
        let normalizer = SymptomNormalizer::new();
        // Downstream rejects unknown tags; resolution does not
        let resolved = normalizer.resolve(None, Some("hiccups"));
        assert_eq!(resolved, vec!["hiccups"]);
    }

    #[test]
    fn empty_description_and_typed_yield_nothing() {
        let normalizer = SymptomNormalizer::new();
        assert!(normalizer.resolve(None, None).is_empty());
        assert!(normalizer.resolve(Some(""), Some("   ")).is_empty());
    }
}
