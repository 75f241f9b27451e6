//! Google Gemini implementation of the analysis provider.
//!
//! Requests use the `generateContent` REST endpoint in JSON response mode
//! with a response schema, so the model is constrained to the wire shapes
//! in [`crate::analysis::types`]. The model's answers are opaque; this
//! module only moves them across the wire and into the typed model.

use crate::analysis::provider::{AnalysisError, AnalysisProvider};
use crate::analysis::types::{CrisprAnalysis, CrisprTarget, MutationAnalysis};
use crate::scan::GuideCandidate;
use indoc::formatdoc;
use itertools::Itertools;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Builds a provider for `model`, reading the API key from the
    /// `GEMINI_API_KEY` environment variable (`API_KEY` as a fallback).
    pub fn from_env(model: &str) -> Result<Self, AnalysisError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| AnalysisError::MissingApiKey)?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(GeminiProvider {
            client,
            api_key,
            model: model.to_string(),
        })
    }

    /// Sends one `generateContent` request and returns the generated text.
    fn generate(&self, prompt: &str, response_schema: Value) -> Result<String, AnalysisError> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema,
            },
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body: response.text()?,
            });
        }

        let payload: Value = response.json()?;
        extract_generated_text(&payload).map(str::to_string)
    }
}

impl AnalysisProvider for GeminiProvider {
    fn analyze_mutation(&self, sequence: &str) -> Result<MutationAnalysis, AnalysisError> {
        let prompt = formatdoc! {"
            You are a clinical bioinformatics AI. Your knowledge is based on models trained on \
            datasets like the 1000 Genomes Project, IGVC, and databases like ClinVar, COSMIC, \
            and UniProt.
            Analyze the following DNA sequence of length {len} characters: \"{sequence}\".

            Perform the following tasks:
            1. Classification: Classify the sequence as 'Mutated' or 'Normal'.
            2. Probability: Provide a mutation probability score from 0.0 to 1.0.
            3. Clinical Impact: Based on simulated queries to ClinVar, COSMIC, and UniProt, \
            identify the most likely biological impact. Provide the gene name, associated \
            disease, protein impact, and clinical significance ('Benign', 'Likely Pathogenic', \
            'Pathogenic', 'Uncertain Significance'). If no specific impact is found, state that.
            4. AI Explanation: Write a brief paragraph explaining which regions of the sequence \
            most influenced your decision, as if you were explaining it to a clinician.
            5. Attention Weights: Generate an 'attentionWeights' array of {len} numbers \
            (between 0.0 and 1.0). This array MUST have the exact same length as the sequence.

            Return a single, valid JSON object.",
            len = sequence.len(),
        };

        let text = self.generate(&prompt, mutation_response_schema())?;
        parse_payload(&text)
    }

    fn analyze_crispr(
        &self,
        candidates: &[GuideCandidate],
    ) -> Result<CrisprAnalysis, AnalysisError> {
        let listed = candidates
            .iter()
            .map(|c| format!("- Position {}: {}", c.position, c.sequence))
            .join("\n");

        let prompt = formatdoc! {"
            You are a CRISPR-Cas9 analysis AI, with knowledge from E-CRISP, CRISPRBench, and \
            Addgene. I have identified potential gRNA sequences preceding NGG PAM sites.

            Potential targets:
            {listed}

            For each target, perform a comprehensive analysis:
            1. GC Content: Calculate the GC content percentage of the gRNA sequence.
            2. Safety Score: Provide a safety score from 0.0 to 1.0 (1.0 being safest) based \
            on predicted off-target effects.
            3. Risk Level: Classify the risk as 'Safe', 'Moderate', or 'Risky'.
            4. Justification: Provide a brief justification for the risk assessment.

            Return a valid JSON array of objects, one for each target. Ensure position and \
            sequence match the input exactly.",
        };

        let text = self.generate(&prompt, crispr_response_schema())?;
        let targets: Vec<CrisprTarget> = parse_payload(&text)?;

        Ok(CrisprAnalysis { targets })
    }
}

/// Pulls the generated text out of a `generateContent` response body.
fn extract_generated_text(payload: &Value) -> Result<&str, AnalysisError> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| AnalysisError::Malformed {
            detail: "response contained no generated text".to_string(),
        })
}

/// Parses the model's JSON answer into the typed wire model.
fn parse_payload<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, AnalysisError> {
    serde_json::from_str(text.trim()).map_err(|e| AnalysisError::Malformed {
        detail: e.to_string(),
    })
}

fn mutation_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "classification": { "type": "STRING", "enum": ["Mutated", "Normal"] },
            "probability": { "type": "NUMBER" },
            "clinicalImpact": {
                "type": "OBJECT",
                "properties": {
                    "gene": { "type": "STRING" },
                    "diseaseAssociation": { "type": "STRING" },
                    "proteinImpact": { "type": "STRING" },
                    "clinicalSignificance": {
                        "type": "STRING",
                        "enum": ["Benign", "Likely Pathogenic", "Pathogenic", "Uncertain Significance"],
                    },
                },
                "required": ["gene", "diseaseAssociation", "proteinImpact", "clinicalSignificance"],
            },
            "aiExplanation": { "type": "STRING" },
            "attentionWeights": { "type": "ARRAY", "items": { "type": "NUMBER" } },
        },
        "required": [
            "classification",
            "probability",
            "clinicalImpact",
            "aiExplanation",
            "attentionWeights",
        ],
    })
}

fn crispr_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "position": { "type": "INTEGER" },
                "sequence": { "type": "STRING" },
                "gcContent": { "type": "NUMBER" },
                "safetyScore": { "type": "NUMBER" },
                "riskLevel": { "type": "STRING", "enum": ["Safe", "Moderate", "Risky"] },
                "justification": { "type": "STRING" },
            },
            "required": [
                "position",
                "sequence",
                "gcContent",
                "safetyScore",
                "riskLevel",
                "justification",
            ],
        },
    })
}
