//! Expertise Scorer — depth of evidence for the classified domain.
//!
//! Three capped components: keyword density, a tiered years-of-experience
//! bonus, and a per-certification bonus. The caps stop any single strong
//! signal from saturating the score; the caps sum to exactly 100, so the
//! final clamp is a guard, not a working part of the formula.

use serde::Serialize;

use crate::analysis::classifier::UNCLASSIFIED;
use crate::analysis::extractor::{SignalSet, TermKind};

/// Keyword hits per token are scaled by this factor, then capped.
/// Tuning constants: at DENSITY_SCALE 600, a resume with one domain keyword
/// every 12 tokens maxes the density component.
pub const DENSITY_SCALE: f64 = 600.0;
pub const DENSITY_CAP: f64 = 50.0;

/// Discrete bonus per years-of-experience tier: 0–2 / 2–5 / 5+.
pub const YEARS_TIER_POINTS: [f64; 3] = [10.0, 20.0, 30.0];

pub const CERTIFICATION_POINTS: f64 = 10.0;
pub const CERTIFICATION_CAP: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpertiseScore {
    /// 0–100.
    pub score: u8,
    /// Human-readable trail of what contributed, in component order.
    pub evidence: Vec<String>,
}

impl ExpertiseScore {
    fn zero() -> Self {
        Self {
            score: 0,
            evidence: Vec::new(),
        }
    }
}

/// Scores depth of evidence for `primary_domain`. An unclassified resume has
/// no domain to measure against: score 0, no fabricated evidence.
pub fn score_expertise(signals: &SignalSet, primary_domain: &str) -> ExpertiseScore {
    if primary_domain == UNCLASSIFIED {
        return ExpertiseScore::zero();
    }

    let mut evidence = Vec::new();
    let mut total = 0.0;

    let keyword_hits = signals.keyword_hits(primary_domain);
    if keyword_hits > 0 {
        let density = keyword_hits as f64 / signals.raw_token_count.max(1) as f64;
        total += (density * DENSITY_SCALE).min(DENSITY_CAP);
        evidence.push(format!(
            "{keyword_hits} {primary_domain} keyword mentions across {} tokens",
            signals.raw_token_count
        ));
    }

    if let Some(years) = signals.experience_years {
        let (tier, points) = years_tier(years);
        total += points;
        evidence.push(format!("{years} years of experience ({tier} tier)"));
    }

    let certifications: Vec<&str> = signals
        .hits(primary_domain)
        .iter()
        .filter(|h| h.kind == TermKind::Certification)
        .map(|h| h.term.as_str())
        .collect();
    if !certifications.is_empty() {
        total += (certifications.len() as f64 * CERTIFICATION_POINTS).min(CERTIFICATION_CAP);
        for certification in certifications {
            evidence.push(format!("certification: {certification}"));
        }
    }

    ExpertiseScore {
        score: total.round().clamp(0.0, 100.0) as u8,
        evidence,
    }
}

fn years_tier(years: u32) -> (&'static str, f64) {
    match years {
        0..=1 => ("0-2", YEARS_TIER_POINTS[0]),
        2..=4 => ("2-5", YEARS_TIER_POINTS[1]),
        _ => ("5+", YEARS_TIER_POINTS[2]),
    }
}
