//! Job Matcher — keyword-gap analysis between a resume and a job
//! description. The JD is scanned as its own document against the full
//! lexicon; it is never assumed to declare a domain of its own.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::extractor::{self, SignalSet};
use crate::analysis::lexicon::Lexicon;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFitResult {
    /// Percentage of JD keywords also found in the resume, 0–100.
    pub fit_score: u8,
    pub matched_keywords: BTreeSet<String>,
    pub missing_keywords: BTreeSet<String>,
}

/// Partitions the JD's keyword set into matched and missing halves.
/// A JD with no recognizable keywords is a degenerate fit of 0, not an error.
pub fn match_against(
    lexicon: &Lexicon,
    resume_signals: &SignalSet,
    jd_text: &str,
) -> JobFitResult {
    let jd_signals = extractor::extract(lexicon, jd_text);
    let resume_keywords = resume_signals.keyword_terms();

    let mut matched_keywords = BTreeSet::new();
    let mut missing_keywords = BTreeSet::new();
    for keyword in jd_signals.keyword_terms() {
        if resume_keywords.contains(keyword) {
            matched_keywords.insert(keyword.to_string());
        } else {
            missing_keywords.insert(keyword.to_string());
        }
    }

    let jd_keyword_count = matched_keywords.len() + missing_keywords.len();
    let fit_score =
        ((matched_keywords.len() * 100) as f64 / jd_keyword_count.max(1) as f64).round() as u8;

    JobFitResult {
        fit_score,
        matched_keywords,
        missing_keywords,
    }
}
