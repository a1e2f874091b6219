//! Structure Scorer — how complete is the resume as a document, independent
//! of what field it is in. This is one half of the dual-scoring split: a
//! beautifully structured resume can still show shallow expertise, and vice
//! versa, so nothing here may look at the domain classification.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::analysis::extractor::SignalSet;

/// Per-section weights. Tuning constants carried over from the product's
/// original section scoring (projects and experience dominate); certifications
/// fill the remainder. Weights need not sum to anything particular — the
/// score normalizes against the total.
pub const SECTION_WEIGHTS: &[(&str, u32)] = &[
    ("summary", 6),
    ("education", 12),
    ("experience", 16),
    ("skills", 7),
    ("projects", 19),
    ("certifications", 6),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureScore {
    /// 0–100, rounded.
    pub score: u8,
    pub present_sections: BTreeSet<String>,
    pub missing_sections: BTreeSet<String>,
}

/// Deterministic function of section presence alone.
pub fn score_structure(signals: &SignalSet) -> StructureScore {
    let mut present_sections = BTreeSet::new();
    let mut missing_sections = BTreeSet::new();
    let mut present_weight = 0u32;
    let mut total_weight = 0u32;

    for &(section, weight) in SECTION_WEIGHTS {
        total_weight += weight;
        if signals.section_present(section) {
            present_weight += weight;
            present_sections.insert(section.to_string());
        } else {
            missing_sections.insert(section.to_string());
        }
    }

    let score = if total_weight == 0 {
        0
    } else {
        ((present_weight * 100) as f64 / total_weight as f64).round() as u8
    };

    StructureScore {
        score,
        present_sections,
        missing_sections,
    }
}
