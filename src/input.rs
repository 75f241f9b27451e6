use crate::sequence::{normalize, Normalized};
use anyhow::{bail, Context, Result};

/// A 150 nt demonstration fragment with a handful of NGG PAM sites, used by
/// the `--demo` flag so the tool can be exercised without a sequence file.
pub const DEMO_SEQUENCE: &str = "ATGGATTTATCTGCTCTTCGCGTTGAAGAAGTACAAAATGTCATTAATGC\
TATGCAGAAAATCTTAGAGTGTCCCATCTGGTAAGTCAGGAACCTGTCTC\
CACAAAGTGTGACCACATATTCCTGGAAACTTCTCAACCAGAAGAAAGGG";

/// Resolves the user's chosen input source and normalizes it.
///
/// Exactly one of `file`, `seq` or `demo` is expected; the CLI enforces
/// this. File content and pasted sequences go through the same
/// normalization, so FASTA headers and whitespace are tolerated either way.
///
/// A warning is logged when characters outside A/T/G/C had to be removed.
pub fn resolve(file: Option<&str>, seq: Option<&str>, demo: bool) -> Result<Normalized> {
    let raw = if demo {
        DEMO_SEQUENCE.to_string()
    } else if let Some(s) = seq {
        s.to_string()
    } else if let Some(path) = file {
        std::fs::read_to_string(path).with_context(|| format!("Unable to open file {path}"))?
    } else {
        bail!("no input given: pass a sequence file, --seq, or --demo");
    };

    let normalized = normalize(&raw);
    if normalized.was_modified {
        warn!("invalid characters were removed from the input; only A, T, G and C are kept");
    }

    Ok(normalized)
}
