use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A FASTA header line: `>` at the start of a line, through to end-of-line.
    static ref FASTA_HEADER: Regex = Regex::new(r"(?m)^>[^\r\n]*").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// The outcome of sequence normalization.
///
/// # Fields
///
/// * `sequence` - The canonical uppercase sequence, restricted to A/T/G/C.
/// * `was_modified` - Whether any characters outside the nucleotide alphabet
///   had to be stripped. Header lines and whitespace do not count as
///   modifications; they are expected input decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub sequence: String,
    pub was_modified: bool,
}

/// Reduces arbitrary pasted or uploaded text to a canonical nucleotide sequence.
///
/// The steps run in a fixed order: FASTA header lines are dropped first,
/// then all whitespace, then the remainder is uppercased, and finally any
/// character outside A/T/G/C is stripped. Stripping a character sets
/// `was_modified` so the caller can surface a validation warning.
///
/// This never fails; fully invalid or blank input yields an empty sequence.
pub fn normalize(raw: &str) -> Normalized {
    let without_headers = FASTA_HEADER.replace_all(raw, "");
    let compact = WHITESPACE.replace_all(&without_headers, "");
    let upper = compact.to_uppercase();

    let mut was_modified = false;
    let sequence: String = upper
        .chars()
        .filter(|c| {
            if matches!(c, 'A' | 'T' | 'G' | 'C') {
                true
            } else {
                was_modified = true;
                false
            }
        })
        .collect();

    Normalized {
        sequence,
        was_modified,
    }
}

/// Percentage of G/C characters in `seq`, in the range 0-100.
///
/// Defined as 0 for the empty string. The remote analysis reports its own
/// GC figure per guide; this local version is the trustworthy one and is
/// what the report shows for the full sequence.
pub fn gc_content(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }

    let gc = seq.chars().filter(|c| matches!(c, 'G' | 'C')).count();
    100.0 * (gc as f64) / (seq.len() as f64)
}
