//! Analysis pipeline — one linear pass per request:
//! extract → classify → structure score → expertise score → JD match →
//! suggestion payload. Pure and synchronous; the AI call happens at the
//! handler boundary and can never invalidate these results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::classifier::{self, DomainClassification};
use crate::analysis::expertise::{self, ExpertiseScore};
use crate::analysis::extractor::{self, SignalSet};
use crate::analysis::lexicon::Lexicon;
use crate::analysis::matcher::{self, JobFitResult};
use crate::analysis::structure::{self, StructureScore};
use crate::analysis::suggestion::{self, StructuredPrompt};

/// Analysis input. `jd_text` and `target_role` are optional; without a JD
/// there is no job fit and no suggestion payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
}

/// Rough seniority derived from extracted signals only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateLevel {
    Experienced,
    Intermediate,
    Fresher,
    Na,
}

/// The complete deterministic output for one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub classification: DomainClassification,
    pub candidate_level: CandidateLevel,
    /// Static per-domain skill recommendations; empty when unclassified.
    pub recommended_skills: Vec<String>,
    pub structure: StructureScore,
    pub expertise: ExpertiseScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_fit: Option<JobFitResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_payload: Option<StructuredPrompt>,
}

/// Runs the full deterministic pipeline. Never fails: degenerate input maps
/// to degenerate values, not errors.
pub fn analyze(lexicon: &Lexicon, request: &AnalyzeRequest) -> AnalysisResult {
    let signals = extractor::extract(lexicon, &request.resume_text);
    debug!(
        "extracted signals: {} domains hit across {} tokens, employers: {:?}",
        signals.domain_hits.len(),
        signals.raw_token_count,
        signals.employer_hits()
    );

    let classification = classifier::classify(lexicon, &signals);
    let structure = structure::score_structure(&signals);
    let expertise = expertise::score_expertise(&signals, &classification.primary_domain);
    let candidate_level = candidate_level(&signals);
    let recommended_skills = lexicon
        .get(&classification.primary_domain)
        .map(|domain| domain.recommended_skills.clone())
        .unwrap_or_default();

    let job_fit = request
        .jd_text
        .as_deref()
        .map(|jd_text| matcher::match_against(lexicon, &signals, jd_text));
    let suggestion_payload = job_fit.as_ref().map(|fit| {
        suggestion::build_payload(
            &classification,
            &structure,
            &expertise,
            fit,
            request.target_role.as_deref(),
        )
    });

    AnalysisResult {
        classification,
        candidate_level,
        recommended_skills,
        structure,
        expertise,
        job_fit,
        suggestion_payload,
    }
}

/// Stated years win; an experience section without a stated duration still
/// lifts the candidate out of the fresher bucket.
fn candidate_level(signals: &SignalSet) -> CandidateLevel {
    if signals.raw_token_count == 0 {
        return CandidateLevel::Na;
    }
    match signals.experience_years {
        Some(years) if years >= 3 => CandidateLevel::Experienced,
        Some(_) => CandidateLevel::Intermediate,
        None if signals.section_present("experience") => CandidateLevel::Intermediate,
        None => CandidateLevel::Fresher,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::UNCLASSIFIED;

    fn request(resume: &str, jd: Option<&str>, role: Option<&str>) -> AnalyzeRequest {
        AnalyzeRequest {
            resume_text: resume.to_string(),
            jd_text: jd.map(str::to_string),
            target_role: role.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_resume_yields_a_well_formed_degenerate_result() {
        let lexicon = Lexicon::builtin();
        let result = analyze(&lexicon, &request("", None, None));
        assert_eq!(result.classification.primary_domain, UNCLASSIFIED);
        assert_eq!(result.candidate_level, CandidateLevel::Na);
        assert!(result.recommended_skills.is_empty());
        assert_eq!(result.structure.score, 0);
        assert_eq!(result.expertise.score, 0);
        assert!(result.job_fit.is_none());
        assert!(result.suggestion_payload.is_none());
    }

    #[test]
    fn test_job_fit_and_payload_are_absent_without_jd_text() {
        let lexicon = Lexicon::builtin();
        let result = analyze(&lexicon, &request("Skills: React", None, Some("Frontend")));
        assert!(result.job_fit.is_none());
        assert!(result.suggestion_payload.is_none());
    }

    #[test]
    fn test_jd_text_produces_both_fit_and_payload() {
        let lexicon = Lexicon::builtin();
        let result = analyze(
            &lexicon,
            &request("Skills: React", Some("React, GraphQL"), Some("Frontend")),
        );
        let fit = result.job_fit.as_ref().unwrap();
        assert!(fit.matched_keywords.contains("React"));
        assert!(fit.missing_keywords.contains("GraphQL"));
        assert!(result.suggestion_payload.is_some());
    }

    #[test]
    fn test_analyze_is_idempotent_for_identical_input() {
        let lexicon = Lexicon::builtin();
        let req = request(
            "Summary\n5 years of RAN optimization at Ericsson, CCNA certified\nSkills: LTE",
            Some("LTE and 5G rollout role"),
            Some("RF Engineer"),
        );
        let first = analyze(&lexicon, &req);
        let second = analyze(&lexicon, &req);
        assert_eq!(first, second);
        // Byte-identical serialization, not just structural equality.
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_recommended_skills_follow_the_classified_domain() {
        let lexicon = Lexicon::builtin();
        let result = analyze(&lexicon, &request("Kubernetes and Terraform daily", None, None));
        assert_eq!(result.classification.primary_domain, "Cloud Engineering");
        assert!(result.recommended_skills.iter().any(|s| s == "Kubernetes"));
    }

    #[test]
    fn test_candidate_level_tiers() {
        let lexicon = Lexicon::builtin();
        let level = |text: &str| analyze(&lexicon, &request(text, None, None)).candidate_level;
        assert_eq!(level(""), CandidateLevel::Na);
        assert_eq!(level("7 years of telecom work"), CandidateLevel::Experienced);
        assert_eq!(level("2 years of telecom work"), CandidateLevel::Intermediate);
        assert_eq!(level("Experience\nEricsson field work"), CandidateLevel::Intermediate);
        assert_eq!(level("Recent graduate, eager to learn"), CandidateLevel::Fresher);
    }

    #[test]
    fn test_structure_and_expertise_scores_stay_in_bounds_for_adversarial_input() {
        let lexicon = Lexicon::builtin();
        let adversarial = format!(
            "Skills Experience Projects {}",
            "Kubernetes 40 years ".repeat(2000)
        );
        let result = analyze(&lexicon, &request(&adversarial, None, None));
        assert!(result.structure.score <= 100);
        assert!(result.expertise.score <= 100);
    }
}
