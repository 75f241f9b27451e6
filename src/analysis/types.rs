//! Data model for the remote analysis responses.
//!
//! Field and variant names follow the wire contract of the generative
//! analysis service, so everything here is serde-derived with camelCase
//! renaming. Scores, categories and explanations are opaque model output;
//! they are carried through and displayed, never recomputed locally.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Mutated,
    Normal,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Mutated => f.write_str("Mutated"),
            Classification::Normal => f.write_str("Normal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClinicalSignificance {
    Benign,
    #[serde(rename = "Likely Pathogenic")]
    LikelyPathogenic,
    Pathogenic,
    #[serde(rename = "Uncertain Significance")]
    UncertainSignificance,
}

impl fmt::Display for ClinicalSignificance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClinicalSignificance::Benign => f.write_str("Benign"),
            ClinicalSignificance::LikelyPathogenic => f.write_str("Likely Pathogenic"),
            ClinicalSignificance::Pathogenic => f.write_str("Pathogenic"),
            ClinicalSignificance::UncertainSignificance => f.write_str("Uncertain Significance"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalImpact {
    pub gene: String,
    pub disease_association: String,
    pub protein_impact: String,
    pub clinical_significance: ClinicalSignificance,
}

/// Result of the mutation-classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationAnalysis {
    pub classification: Classification,
    /// Mutation probability in [0.0, 1.0].
    pub probability: f64,
    pub clinical_impact: ClinicalImpact,
    pub ai_explanation: String,
    /// Per-nucleotide attention weights; reconciled to the sequence length
    /// by [`crate::analysis::mutation_screen`].
    pub attention_weights: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Moderate,
    Risky,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Safe => f.write_str("Safe"),
            RiskLevel::Moderate => f.write_str("Moderate"),
            RiskLevel::Risky => f.write_str("Risky"),
        }
    }
}

/// One scored guide RNA target. `position` and `sequence` are echoed back
/// from the scanner's candidates and are trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisprTarget {
    pub position: usize,
    pub sequence: String,
    pub gc_content: f64,
    /// Predicted off-target safety in [0.0, 1.0]; 1.0 is safest.
    pub safety_score: f64,
    pub risk_level: RiskLevel,
    pub justification: String,
}

/// Result of the CRISPR target-scoring request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisprAnalysis {
    pub targets: Vec<CrisprTarget>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn mutation_analysis_wire_format() {
        let raw = indoc! {r#"
            {
              "classification": "Mutated",
              "probability": 0.87,
              "clinicalImpact": {
                "gene": "BRCA1",
                "diseaseAssociation": "Hereditary breast cancer",
                "proteinImpact": "Frameshift",
                "clinicalSignificance": "Likely Pathogenic"
              },
              "aiExplanation": "The 5' region dominated the decision.",
              "attentionWeights": [0.1, 0.9, 0.3]
            }
        "#};

        let parsed: MutationAnalysis = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.classification, Classification::Mutated);
        assert_eq!(
            parsed.clinical_impact.clinical_significance,
            ClinicalSignificance::LikelyPathogenic
        );
        assert_eq!(parsed.attention_weights.len(), 3);
    }

    #[test]
    fn crispr_target_wire_format() {
        let raw = indoc! {r#"
            [{
              "position": 4,
              "sequence": "ATGCATGCATGCATGCATGC",
              "gcContent": 50.0,
              "safetyScore": 0.92,
              "riskLevel": "Safe",
              "justification": "Few predicted off-target hits."
            }]
        "#};

        let parsed: Vec<CrisprTarget> = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].risk_level, RiskLevel::Safe);
        assert_eq!(parsed[0].position, 4);
    }

    #[test]
    fn significance_roundtrip() {
        let json = serde_json::to_string(&ClinicalSignificance::UncertainSignificance).unwrap();
        assert_eq!(json, r#""Uncertain Significance""#);
    }
}
