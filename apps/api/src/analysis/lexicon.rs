//! Lexicon Store — static per-domain signal vocabulary.
//!
//! Pure data: domain name → keywords, employer names, certification names,
//! and the recommended skills surfaced with a classification. Loaded once at
//! startup and injected everywhere as `Arc<Lexicon>` — never ambient state,
//! so tests can substitute synthetic lexicons.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Signal vocabulary for a single career domain.
///
/// Terms are stored in canonical display form ("Ericsson", "RAN"); all
/// matching is case-insensitive and reports the canonical form back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainLexicon {
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub employers: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub recommended_skills: Vec<String>,
}

/// The full lexicon. Domain names are unique by construction (map keys);
/// keyword sets may overlap across domains — a term can signal several
/// domains at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lexicon {
    pub domains: BTreeMap<String, DomainLexicon>,
}

impl Lexicon {
    pub fn get(&self, domain: &str) -> Option<&DomainLexicon> {
        self.domains.get(domain)
    }

    /// Parses a lexicon from JSON (the `LEXICON_PATH` override format).
    /// An empty or malformed lexicon is a startup-fatal configuration error.
    pub fn from_json(raw: &str) -> Result<Self> {
        let lexicon: Lexicon =
            serde_json::from_str(raw).context("lexicon JSON is malformed")?;
        if lexicon.domains.is_empty() {
            bail!("lexicon contains no domains");
        }
        Ok(lexicon)
    }

    /// The built-in lexicon shipped with the service.
    ///
    /// Term lists and recommended skills are product-tuning data, not derived
    /// values; edit them here or override the whole lexicon via LEXICON_PATH.
    pub fn builtin() -> Self {
        let mut domains = BTreeMap::new();

        domains.insert(
            "Data Science".to_string(),
            domain(
                &[
                    "TensorFlow",
                    "Keras",
                    "PyTorch",
                    "machine learning",
                    "deep learning",
                    "scikit-learn",
                    "pandas",
                    "NumPy",
                    "data mining",
                    "statistical modeling",
                    "computer vision",
                    "Jupyter",
                    "Streamlit",
                    "Flask",
                ],
                &["DeepMind", "Databricks", "Anaconda"],
                &["TensorFlow Developer", "AWS Machine Learning Specialty"],
                &[
                    "Data Visualization",
                    "Predictive Analysis",
                    "Statistical Modeling",
                    "Data Mining",
                    "ML Algorithms",
                    "Scikit-learn",
                    "TensorFlow",
                    "PyTorch",
                ],
            ),
        );

        domains.insert(
            "Web Development".to_string(),
            domain(
                &[
                    "React",
                    "Angular",
                    "Vue",
                    "Django",
                    "Flask",
                    "Node.js",
                    "Express",
                    "PHP",
                    "Laravel",
                    "WordPress",
                    "Magento",
                    "JavaScript",
                    "TypeScript",
                    "HTML",
                    "CSS",
                    "ASP.NET",
                    "C#",
                    "REST API",
                    "GraphQL",
                ],
                &["Vercel", "Shopify", "Automattic"],
                &["Meta Front-End Developer"],
                &[
                    "React",
                    "Django",
                    "Node.js",
                    "TypeScript",
                    "GraphQL",
                    "REST API design",
                    "Responsive layouts",
                ],
            ),
        );

        domains.insert(
            "Android Development".to_string(),
            domain(
                &[
                    "Android",
                    "Kotlin",
                    "Flutter",
                    "Jetpack Compose",
                    "Android Studio",
                    "Kivy",
                    "Play Store",
                    "XML",
                ],
                &["Samsung", "Xiaomi"],
                &["Associate Android Developer"],
                &["Kotlin", "Jetpack Compose", "Flutter", "GIT", "SQLite"],
            ),
        );

        domains.insert(
            "iOS Development".to_string(),
            domain(
                &[
                    "iOS",
                    "Swift",
                    "SwiftUI",
                    "Objective-C",
                    "Xcode",
                    "Cocoa",
                    "Cocoa Touch",
                    "App Store",
                    "UIKit",
                ],
                &["Apple"],
                &["App Development with Swift"],
                &["Swift", "SwiftUI", "Xcode", "Auto Layout", "StoreKit"],
            ),
        );

        domains.insert(
            "UI/UX Design".to_string(),
            domain(
                &[
                    "UX",
                    "UI",
                    "Figma",
                    "Adobe XD",
                    "Sketch",
                    "Zeplin",
                    "Balsamiq",
                    "prototyping",
                    "wireframes",
                    "user research",
                    "Photoshop",
                    "Illustrator",
                    "usability testing",
                ],
                &["Figma", "Adobe", "Canva"],
                &["Google UX Design"],
                &[
                    "Figma",
                    "Prototyping",
                    "Wireframes",
                    "User Research",
                    "Usability Testing",
                ],
            ),
        );

        domains.insert(
            "Telecommunications".to_string(),
            domain(
                &[
                    "RAN",
                    "LTE",
                    "5G",
                    "VoLTE",
                    "GSM",
                    "UMTS",
                    "RF optimization",
                    "drive test",
                    "spectrum analysis",
                    "backhaul",
                    "core network",
                    "telecom",
                    "fiber optics",
                    "network planning",
                ],
                &["Ericsson", "Nokia", "Huawei", "Qualcomm", "ZTE"],
                &["CCNA", "CCNP", "CCIE", "JNCIA"],
                &[
                    "5G NR",
                    "RF Planning",
                    "Network Optimization",
                    "VoLTE Troubleshooting",
                    "Spectrum Analysis",
                ],
            ),
        );

        domains.insert(
            "Cloud Engineering".to_string(),
            domain(
                &[
                    "AWS",
                    "Azure",
                    "GCP",
                    "Kubernetes",
                    "Docker",
                    "Terraform",
                    "Ansible",
                    "CloudFormation",
                    "serverless",
                    "microservices",
                    "CI/CD",
                    "Jenkins",
                    "Prometheus",
                    "Grafana",
                ],
                &["HashiCorp", "DigitalOcean", "Cloudflare", "VMware"],
                &[
                    "AWS Solutions Architect",
                    "CKA",
                    "Azure Administrator",
                    "Google Cloud Architect",
                ],
                &[
                    "Kubernetes",
                    "Terraform",
                    "Infrastructure as Code",
                    "Observability",
                    "Cost Optimization",
                ],
            ),
        );

        Lexicon { domains }
    }
}

fn domain(
    keywords: &[&str],
    employers: &[&str],
    certifications: &[&str],
    recommended_skills: &[&str],
) -> DomainLexicon {
    let owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();
    DomainLexicon {
        keywords: owned(keywords),
        employers: owned(employers),
        certifications: owned(certifications),
        recommended_skills: owned(recommended_skills),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_unique_domains_with_vocabulary() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.domains.len() >= 5);
        for (name, domain) in &lexicon.domains {
            assert!(!domain.keywords.is_empty(), "{name} has no keywords");
        }
    }

    #[test]
    fn test_builtin_covers_telecom_scenario_terms() {
        let lexicon = Lexicon::builtin();
        let telecom = lexicon.get("Telecommunications").unwrap();
        assert!(telecom.keywords.iter().any(|k| k == "RAN"));
        assert!(telecom.employers.iter().any(|e| e == "Ericsson"));
        assert!(telecom.certifications.iter().any(|c| c == "CCNA"));
    }

    #[test]
    fn test_from_json_parses_minimal_lexicon() {
        let raw = r#"{
            "domains": {
                "Basket Weaving": {
                    "keywords": ["wicker", "rattan"],
                    "employers": ["Wickerworks"],
                    "certifications": []
                }
            }
        }"#;
        let lexicon = Lexicon::from_json(raw).unwrap();
        let domain = lexicon.get("Basket Weaving").unwrap();
        assert_eq!(domain.keywords.len(), 2);
        assert!(domain.recommended_skills.is_empty());
    }

    #[test]
    fn test_from_json_rejects_empty_lexicon() {
        let err = Lexicon::from_json(r#"{"domains": {}}"#).unwrap_err();
        assert!(err.to_string().contains("no domains"));
    }

    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(Lexicon::from_json("not json").is_err());
    }
}
