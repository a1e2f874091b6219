//! Domain Classifier — turns a SignalSet into the best-matching career
//! domain with an explainable confidence and signal trail.

use serde::Serialize;

use crate::analysis::extractor::{SignalSet, TermKind};
use crate::analysis::lexicon::Lexicon;

/// Returned when no domain scored above zero.
pub const UNCLASSIFIED: &str = "Unclassified";

/// Raw-score weights. Employer names imply a domain far more strongly than a
/// single keyword mention; certifications sit in between. Tuning constants,
/// not derived values.
pub const KEYWORD_WEIGHT: u32 = 1;
pub const CERTIFICATION_WEIGHT: u32 = 2;
pub const EMPLOYER_WEIGHT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainClassification {
    pub primary_domain: String,
    /// Normalized margin between the top two raw scores, in [0, 1].
    pub confidence: f64,
    pub runner_up: Option<String>,
    /// Literal matched terms for the primary domain, ordered by first
    /// occurrence in the text. Never empty when confidence > 0.
    pub contributing_signals: Vec<String>,
}

impl DomainClassification {
    pub fn unclassified() -> Self {
        Self {
            primary_domain: UNCLASSIFIED.to_string(),
            confidence: 0.0,
            runner_up: None,
            contributing_signals: Vec::new(),
        }
    }

}

fn weight(kind: TermKind) -> u32 {
    match kind {
        TermKind::Keyword => KEYWORD_WEIGHT,
        TermKind::Certification => CERTIFICATION_WEIGHT,
        TermKind::Employer => EMPLOYER_WEIGHT,
    }
}

/// Weighted raw score for one domain.
pub fn raw_score(signals: &SignalSet, domain: &str) -> u32 {
    signals
        .hits(domain)
        .iter()
        .map(|h| h.count * weight(h.kind))
        .sum()
}

/// Picks the arg-max domain. Exact ties prefer the domain with the smaller
/// keyword vocabulary (more specific wins over generic), then name order, so
/// the result is fully deterministic.
pub fn classify(lexicon: &Lexicon, signals: &SignalSet) -> DomainClassification {
    let mut scored: Vec<(&str, u32, usize)> = lexicon
        .domains
        .iter()
        .map(|(name, domain)| (name.as_str(), raw_score(signals, name), domain.keywords.len()))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.0.cmp(b.0)));

    let Some(&(top_name, top_score, _)) = scored.first() else {
        return DomainClassification::unclassified();
    };
    if top_score == 0 {
        return DomainClassification::unclassified();
    }

    let second = scored.get(1).copied();
    let second_score = second.map(|(_, s, _)| s).unwrap_or(0);
    let margin = (top_score - second_score) as f64 / top_score.max(1) as f64;

    DomainClassification {
        primary_domain: top_name.to_string(),
        confidence: margin.clamp(0.0, 1.0),
        runner_up: second.filter(|&(_, s, _)| s > 0).map(|(n, _, _)| n.to_string()),
        contributing_signals: signals
            .hits(top_name)
            .iter()
            .map(|h| h.term.clone())
            .collect(),
    }
}
