use crate::analysis::{CrisprAnalysis, MutationAnalysis};
use crate::sequence::{gc_content, Normalized};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The on-disk analysis bundle: everything `analyze` produced for one
/// sequence, written as JSON and later consumed by `report`.
#[derive(Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub mutascope_version: String,
    pub generated: String,
    pub sequence: String,
    pub sequence_length: usize,
    /// GC percentage computed locally, independent of the remote analysis.
    pub gc_content: f64,
    /// Whether normalization had to strip invalid characters from the input.
    pub was_modified: bool,
    pub mutation: Option<MutationAnalysis>,
    pub crispr: Option<CrisprAnalysis>,
}

impl AnalysisBundle {
    pub fn new(normalized: &Normalized) -> Self {
        AnalysisBundle {
            mutascope_version: crate::cli::VERSION.to_string(),
            generated: format!("{:?}", chrono::offset::Local::now()),
            sequence: normalized.sequence.clone(),
            sequence_length: normalized.sequence.len(),
            gc_content: gc_content(&normalized.sequence),
            was_modified: normalized.was_modified,
            mutation: None,
            crispr: None,
        }
    }

    pub fn load(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Unable to open analysis bundle {path}"))?;
        serde_json::from_reader(file)
            .with_context(|| format!("Analysis bundle {path} is not valid JSON"))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Unable to write analysis bundle {path}"))?;
        serde_json::to_writer_pretty(file, self).context("Could not serialize analysis bundle")?;
        Ok(())
    }
}
