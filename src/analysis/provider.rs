use crate::analysis::types::{CrisprAnalysis, MutationAnalysis};
use crate::scan::GuideCandidate;
use thiserror::Error;

/// The single "analysis failed" condition surfaced to callers. Whatever
/// goes wrong remotely - transport, a non-success status, or a response
/// that does not match the expected shape - arrives here; no retries are
/// attempted.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("analysis response was malformed: {detail}")]
    Malformed { detail: String },

    #[error("no API key found: set GEMINI_API_KEY (or API_KEY) in the environment")]
    MissingApiKey,
}

/// The remote analysis collaborator.
///
/// All scientifically meaningful output - classifications, probabilities,
/// attention weights, safety scores, justifications - comes from an
/// implementation of this trait, never from local logic. The concrete
/// implementation used by the CLI is [`crate::analysis::gemini::GeminiProvider`];
/// tests substitute stubs.
pub trait AnalysisProvider {
    /// Classify a normalized sequence as mutated or normal, with clinical
    /// impact details and per-nucleotide attention weights.
    fn analyze_mutation(&self, sequence: &str) -> Result<MutationAnalysis, AnalysisError>;

    /// Score the scanner's guide RNA candidates. The provider is expected
    /// to echo each candidate's position and sequence back unchanged.
    fn analyze_crispr(&self, candidates: &[GuideCandidate])
        -> Result<CrisprAnalysis, AnalysisError>;
}
