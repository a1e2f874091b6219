//! Signal Extractor — scans normalized resume/JD text and records lexicon
//! term hits, section presence, and experience-duration phrases.
//!
//! Matching is deliberately heuristic, not NLP: PDF extraction routinely
//! merges words ("machinelearning") or drops whitespace, so multi-word terms,
//! employer names, and certification names are matched as contiguous
//! substrings of the whitespace-stripped text, while single-word keywords use
//! whole-token matching to keep short terms ("RAN", "UX") from firing inside
//! unrelated words. Everything here is a pure function of the input text and
//! the injected lexicon.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::Lexicon;

/// The fixed set of recognized resume sections and their header synonyms.
/// `SignalSet::section_presence` always carries exactly these keys.
pub const RECOGNIZED_SECTIONS: &[(&str, &[&str])] = &[
    ("certifications", &["certification", "certificate", "license"]),
    ("education", &["education", "school", "college", "university"]),
    ("experience", &["experience", "work history", "employment"]),
    ("projects", &["project"]),
    ("skills", &["skill"]),
    ("summary", &["summary", "objective", "profile"]),
];

/// Years-of-experience values above this are treated as extraction noise.
const MAX_PLAUSIBLE_YEARS: u32 = 50;

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").unwrap());

/// Which lexicon list a matched term came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Keyword,
    Employer,
    Certification,
}

/// One matched lexicon term: canonical form, occurrence count, and the byte
/// offset of its first occurrence in the normalized text (used to order
/// contributing signals by where they appear in the document).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermHit {
    pub term: String,
    pub kind: TermKind,
    pub count: u32,
    pub first_offset: usize,
}

/// The flat signal set produced by scanning one text blob.
/// Created fresh per analysis call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSet {
    /// Domain → matched terms, sorted by first occurrence. Domains with no
    /// hits are omitted; accessors treat them as zero.
    pub domain_hits: BTreeMap<String, Vec<TermHit>>,
    pub section_presence: BTreeMap<String, bool>,
    pub experience_years: Option<u32>,
    pub raw_token_count: usize,
}

impl SignalSet {
    pub fn hits(&self, domain: &str) -> &[TermHit] {
        self.domain_hits
            .get(domain)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total keyword occurrences for one domain.
    pub fn keyword_hits(&self, domain: &str) -> u32 {
        self.hits(domain)
            .iter()
            .filter(|h| h.kind == TermKind::Keyword)
            .map(|h| h.count)
            .sum()
    }

    /// Distinct keyword terms matched across all domains, canonical form.
    pub fn keyword_terms(&self) -> BTreeSet<&str> {
        self.terms_of_kind(TermKind::Keyword)
    }

    /// Distinct employer names matched across all domains.
    pub fn employer_hits(&self) -> BTreeSet<&str> {
        self.terms_of_kind(TermKind::Employer)
    }

    pub fn section_present(&self, section: &str) -> bool {
        self.section_presence.get(section).copied().unwrap_or(false)
    }

    fn terms_of_kind(&self, kind: TermKind) -> BTreeSet<&str> {
        self.domain_hits
            .values()
            .flatten()
            .filter(|h| h.kind == kind)
            .map(|h| h.term.as_str())
            .collect()
    }
}

/// Scans `text` against `lexicon`. Never fails: empty or garbage input
/// yields an all-zero SignalSet.
pub fn extract(lexicon: &Lexicon, text: &str) -> SignalSet {
    let nt = NormalizedText::new(text);

    let mut domain_hits = BTreeMap::new();
    for (name, domain) in &lexicon.domains {
        let mut hits = Vec::new();
        scan_terms(&nt, &domain.keywords, TermKind::Keyword, &mut hits);
        scan_terms(&nt, &domain.employers, TermKind::Employer, &mut hits);
        scan_terms(&nt, &domain.certifications, TermKind::Certification, &mut hits);
        hits.sort_by_key(|h| h.first_offset);
        if !hits.is_empty() {
            domain_hits.insert(name.clone(), hits);
        }
    }

    let section_presence = RECOGNIZED_SECTIONS
        .iter()
        .map(|(name, synonyms)| {
            let present = synonyms.iter().any(|s| nt.text.contains(s));
            (name.to_string(), present)
        })
        .collect();

    SignalSet {
        domain_hits,
        section_presence,
        experience_years: extract_years(&nt.text),
        raw_token_count: nt.tokens.len(),
    }
}

fn scan_terms(nt: &NormalizedText, terms: &[String], kind: TermKind, out: &mut Vec<TermHit>) {
    for term in terms {
        let normalized_term = normalize(term);
        if normalized_term.is_empty() {
            continue;
        }
        // Multi-word terms, employers, and certifications match as contiguous
        // substrings of the space-stripped text (tolerates merged words);
        // single-word keywords require an exact token.
        let matched = if normalized_term.contains(' ') || kind != TermKind::Keyword {
            nt.find_compact(&normalized_term)
        } else {
            nt.find_token(&normalized_term)
        };
        if let Some((count, first_offset)) = matched {
            out.push(TermHit {
                term: term.clone(),
                kind,
                count,
                first_offset,
            });
        }
    }
}

/// Largest plausible "N years"/"N+ yrs" value in the text, if any.
/// Never inferred from anything else.
fn extract_years(normalized: &str) -> Option<u32> {
    YEARS_RE
        .captures_iter(normalized)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .filter(|y| (1..=MAX_PLAUSIBLE_YEARS).contains(y))
        .max()
}

/// Lowercases, collapses whitespace, and strips punctuation noise while
/// preserving token-significant characters ('+', '#', and inner '.').
fn normalize(text: &str) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || matches!(ch, '+' | '#' | '.') {
            for lc in ch.to_lowercase() {
                current.push(lc);
            }
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    // Sentence-final dots would break whole-token matches ("experience.");
    // leading dots stay so ".net" survives.
    for token in &mut tokens {
        while token.ends_with('.') {
            token.pop();
        }
    }
    tokens.retain(|t| !t.is_empty());
    tokens.join(" ")
}

/// Normalized text plus the derived views the matchers scan over.
struct NormalizedText {
    text: String,
    /// Byte ranges of each token in `text`.
    tokens: Vec<(usize, usize)>,
    /// `text` with spaces removed — the merged-word-tolerant view.
    compact: String,
    /// Compact byte index → byte index in `text`, for offset reporting.
    compact_to_text: Vec<usize>,
}

impl NormalizedText {
    fn new(raw: &str) -> Self {
        let text = normalize(raw);

        let mut tokens = Vec::new();
        let mut offset = 0;
        for token in text.split(' ') {
            if !token.is_empty() {
                tokens.push((offset, offset + token.len()));
            }
            offset += token.len() + 1;
        }

        let mut compact = String::with_capacity(text.len());
        let mut compact_to_text = Vec::with_capacity(text.len());
        for (i, ch) in text.char_indices() {
            if ch != ' ' {
                let before = compact.len();
                compact.push(ch);
                for _ in before..compact.len() {
                    compact_to_text.push(i);
                }
            }
        }

        Self {
            text,
            tokens,
            compact,
            compact_to_text,
        }
    }

    /// Non-overlapping occurrences of `term` (spaces stripped) in the
    /// compact view. Returns (count, first offset in normalized text).
    fn find_compact(&self, term: &str) -> Option<(u32, usize)> {
        let needle: String = term.chars().filter(|c| *c != ' ').collect();
        if needle.is_empty() {
            return None;
        }
        let mut count = 0;
        let mut first = None;
        let mut pos = 0;
        while let Some(i) = self.compact[pos..].find(&needle) {
            let at = pos + i;
            if first.is_none() {
                first = Some(self.compact_to_text[at]);
            }
            count += 1;
            pos = at + needle.len();
        }
        first.map(|f| (count, f))
    }

    /// Exact whole-token occurrences of `term`.
    fn find_token(&self, term: &str) -> Option<(u32, usize)> {
        let mut count = 0;
        let mut first = None;
        for &(start, end) in &self.tokens {
            if &self.text[start..end] == term {
                if first.is_none() {
                    first = Some(start);
                }
                count += 1;
            }
        }
        first.map(|f| (count, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::{DomainLexicon, Lexicon};

    fn test_lexicon() -> Lexicon {
        let mut lexicon = Lexicon::default();
        lexicon.domains.insert(
            "Telecommunications".to_string(),
            DomainLexicon {
                keywords: vec!["RAN".to_string(), "LTE".to_string(), "RF optimization".to_string()],
                employers: vec!["Ericsson".to_string()],
                certifications: vec!["CCNA".to_string()],
                recommended_skills: vec![],
            },
        );
        lexicon.domains.insert(
            "Data Science".to_string(),
            DomainLexicon {
                keywords: vec!["machine learning".to_string(), "TensorFlow".to_string()],
                employers: vec![],
                certifications: vec![],
                recommended_skills: vec![],
            },
        );
        lexicon
    }

    #[test]
    fn test_empty_input_yields_all_zero_signal_set() {
        let signals = extract(&test_lexicon(), "");
        assert!(signals.domain_hits.is_empty());
        assert_eq!(signals.experience_years, None);
        assert_eq!(signals.raw_token_count, 0);
        assert!(signals.section_presence.values().all(|present| !present));
    }

    #[test]
    fn test_section_presence_keys_are_exactly_the_recognized_set() {
        // Cardinality invariant: same keys for empty and populated input.
        for text in ["", "Skills: React. Experience: 5 years at Initech."] {
            let signals = extract(&test_lexicon(), text);
            let keys: Vec<&str> = signals.section_presence.keys().map(String::as_str).collect();
            let mut expected: Vec<&str> = RECOGNIZED_SECTIONS.iter().map(|(n, _)| *n).collect();
            expected.sort_unstable();
            assert_eq!(keys, expected);
        }
    }

    #[test]
    fn test_single_word_keyword_requires_whole_token() {
        let lexicon = test_lexicon();
        let hit = extract(&lexicon, "Led RAN optimization rollouts");
        assert_eq!(hit.keyword_hits("Telecommunications"), 1);

        // "ran" inside another word must not fire.
        let miss = extract(&lexicon, "operand branded veteran");
        assert_eq!(miss.keyword_hits("Telecommunications"), 0);
    }

    #[test]
    fn test_multi_word_term_survives_merged_words() {
        let signals = extract(&test_lexicon(), "Built machinelearning pipelines");
        assert_eq!(signals.keyword_hits("Data Science"), 1);
    }

    #[test]
    fn test_employer_matches_case_insensitively_and_reports_canonical_form() {
        let signals = extract(&test_lexicon(), "Network engineer at ERICSSON since 2019");
        let employers: Vec<&str> = signals.employer_hits().into_iter().collect();
        assert_eq!(employers, vec!["Ericsson"]);
    }

    #[test]
    fn test_occurrences_are_counted_not_just_detected() {
        let signals = extract(&test_lexicon(), "TensorFlow models, more TensorFlow models");
        let hits = signals.hits("Data Science");
        let tf = hits.iter().find(|h| h.term == "TensorFlow").unwrap();
        assert_eq!(tf.count, 2);
    }

    #[test]
    fn test_hits_are_ordered_by_first_occurrence() {
        let signals = extract(
            &test_lexicon(),
            "RAN tuning at Ericsson, CCNA certified, LTE rollouts",
        );
        let order: Vec<&str> = signals
            .hits("Telecommunications")
            .iter()
            .map(|h| h.term.as_str())
            .collect();
        assert_eq!(order, vec!["RAN", "Ericsson", "CCNA", "LTE"]);
    }

    #[test]
    fn test_experience_years_takes_the_maximum_plausible_value() {
        let lexicon = test_lexicon();
        assert_eq!(extract(&lexicon, "5 years of experience").experience_years, Some(5));
        assert_eq!(extract(&lexicon, "3+ yrs backend, 7 years total").experience_years, Some(7));
        assert_eq!(extract(&lexicon, "founded in 1999, joined 2023").experience_years, None);
        assert_eq!(extract(&lexicon, "99 years of legacy uptime").experience_years, None);
        assert_eq!(extract(&lexicon, "no duration stated").experience_years, None);
    }

    #[test]
    fn test_experience_years_never_inferred_from_dates() {
        let signals = extract(&test_lexicon(), "Ericsson, 2018 - 2024");
        assert_eq!(signals.experience_years, None);
    }

    #[test]
    fn test_section_synonyms_and_order_independence() {
        let lexicon = test_lexicon();
        let a = extract(&lexicon, "Objective\nWork History\nSkills");
        assert!(a.section_present("summary"));
        assert!(a.section_present("experience"));
        assert!(a.section_present("skills"));
        assert!(!a.section_present("projects"));

        let b = extract(&lexicon, "Skills\nObjective\nWork History");
        assert_eq!(a.section_presence, b.section_presence);
    }

    #[test]
    fn test_raw_token_count_reflects_normalized_tokens() {
        let signals = extract(&test_lexicon(), "  One,   two —— three!  ");
        assert_eq!(signals.raw_token_count, 3);
    }

    #[test]
    fn test_normalize_preserves_token_significant_punctuation() {
        assert_eq!(normalize("C# and .NET, Node.js!"), "c# and .net node.js");
        assert_eq!(normalize("5+ yrs."), "5+ yrs");
    }

    #[test]
    fn test_garbage_input_never_panics() {
        let lexicon = test_lexicon();
        for text in ["\u{0}\u{1}\u{2}", "…—––", "𝕬𝖇𝖈", "....", "++##"] {
            let signals = extract(&lexicon, text);
            assert!(signals.experience_years.is_none());
        }
    }
}
