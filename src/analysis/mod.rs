pub mod gemini;
pub mod provider;
pub mod types;

pub use provider::{AnalysisError, AnalysisProvider};
pub use types::{
    Classification, ClinicalImpact, ClinicalSignificance, CrisprAnalysis, CrisprTarget,
    MutationAnalysis, RiskLevel,
};

use crate::scan;

/// Runs the mutation-classification request and reconciles the attention
/// weights: the returned array must be exactly as long as the sequence,
/// and a mismatched length is a data-integrity fallback case, not a
/// failure - the weights are replaced with zeroes of the correct length.
pub fn mutation_screen(
    provider: &impl AnalysisProvider,
    sequence: &str,
) -> Result<MutationAnalysis, AnalysisError> {
    let mut analysis = provider.analyze_mutation(sequence)?;

    if analysis.attention_weights.len() != sequence.len() {
        warn!(
            "attention weight count {} does not match sequence length {}; substituting zeroes",
            analysis.attention_weights.len(),
            sequence.len()
        );
        analysis.attention_weights = vec![0.0; sequence.len()];
    }

    Ok(analysis)
}

/// Scans the sequence for guide RNA candidates and, if there are any,
/// sends them for scoring. A sequence with no candidates yields an empty
/// result without contacting the provider at all.
pub fn crispr_screen(
    provider: &impl AnalysisProvider,
    sequence: &str,
) -> Result<CrisprAnalysis, AnalysisError> {
    let candidates = scan::scan_for_candidates(sequence);

    if candidates.is_empty() {
        return Ok(CrisprAnalysis {
            targets: Vec::new(),
        });
    }

    provider.analyze_crispr(&candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::GuideCandidate;
    use std::cell::Cell;

    struct StubProvider {
        weights: Vec<f64>,
        crispr_calls: Cell<usize>,
    }

    impl StubProvider {
        fn with_weights(weights: Vec<f64>) -> Self {
            StubProvider {
                weights,
                crispr_calls: Cell::new(0),
            }
        }
    }

    impl AnalysisProvider for StubProvider {
        fn analyze_mutation(&self, _sequence: &str) -> Result<MutationAnalysis, AnalysisError> {
            Ok(MutationAnalysis {
                classification: Classification::Normal,
                probability: 0.1,
                clinical_impact: ClinicalImpact {
                    gene: "TP53".to_string(),
                    disease_association: "None identified".to_string(),
                    protein_impact: "None".to_string(),
                    clinical_significance: ClinicalSignificance::Benign,
                },
                ai_explanation: "stub".to_string(),
                attention_weights: self.weights.clone(),
            })
        }

        fn analyze_crispr(
            &self,
            candidates: &[GuideCandidate],
        ) -> Result<CrisprAnalysis, AnalysisError> {
            self.crispr_calls.set(self.crispr_calls.get() + 1);

            Ok(CrisprAnalysis {
                targets: candidates
                    .iter()
                    .map(|c| CrisprTarget {
                        position: c.position,
                        sequence: c.sequence.clone(),
                        gc_content: 50.0,
                        safety_score: 0.5,
                        risk_level: RiskLevel::Moderate,
                        justification: "stub".to_string(),
                    })
                    .collect(),
            })
        }
    }

    #[test]
    fn matching_attention_weights_pass_through() {
        let provider = StubProvider::with_weights(vec![0.25, 0.5, 0.75, 1.0]);
        let analysis = mutation_screen(&provider, "ATGC").unwrap();
        assert_eq!(analysis.attention_weights, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn mismatched_attention_weights_are_zero_filled() {
        let provider = StubProvider::with_weights(vec![0.9; 7]);
        let analysis = mutation_screen(&provider, "ATGC").unwrap();
        assert_eq!(analysis.attention_weights, vec![0.0; 4]);
    }

    #[test]
    fn no_candidates_skips_the_provider() {
        let provider = StubProvider::with_weights(Vec::new());
        let result = crispr_screen(&provider, "ATATATAT").unwrap();

        assert!(result.targets.is_empty());
        assert_eq!(provider.crispr_calls.get(), 0);
    }

    #[test]
    fn candidates_are_forwarded_for_scoring() {
        let provider = StubProvider::with_weights(Vec::new());
        let seq = format!("{}CGG{}", "A".repeat(20), "T".repeat(10));
        let result = crispr_screen(&provider, &seq).unwrap();

        assert_eq!(provider.crispr_calls.get(), 1);
        assert_eq!(result.targets.len(), 1);
        assert_eq!(result.targets[0].position, 1);
    }
}
