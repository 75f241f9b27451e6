use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Length of a guide RNA candidate, in nucleotides.
pub const GUIDE_LENGTH: usize = 20;

/// A guide RNA candidate anchored immediately upstream of an NGG PAM site.
///
/// # Fields
///
/// * `position` - 1-based offset of the first nucleotide of the candidate
///   within the scanned sequence.
/// * `sequence` - The exact 20-character candidate substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideCandidate {
    pub position: usize,
    pub sequence: String,
}

/// Output format for the candidate table.
#[derive(clap::ValueEnum, Clone)]
pub enum CandidateFormat {
    /// tab-separated table with a header row
    Tsv,

    /// a JSON array of {position, sequence} objects
    Json,
}

/// Scans a normalized sequence for NGG PAM sites and returns the guide RNA
/// candidates, in discovery (ascending position) order.
///
/// The PAM is approximated by the `GG` dinucleotide; the nucleotide
/// immediately preceding it supplies the N. The search resumes one position
/// past the *start* of each match rather than past its end, so runs like
/// `GGG` anchor a candidate per embedded `GG` window. Overlapping windows
/// are not deduplicated.
///
/// A match at zero-based index `m` only yields a candidate when at least
/// `GUIDE_LENGTH` nucleotides precede the PAM, i.e. `m - 1 >= GUIDE_LENGTH`.
///
/// The input is assumed to already be restricted to A/T/G/C (see
/// [`crate::sequence::normalize`]); behaviour on other characters is
/// unspecified.
pub fn scan_for_candidates(sequence: &str) -> Vec<GuideCandidate> {
    let bytes = sequence.as_bytes();
    let mut candidates = Vec::new();

    let mut search_from = 0;
    while let Some(offset) = bytes[search_from..].windows(2).position(|pair| pair == b"GG") {
        let m = search_from + offset;

        if m >= GUIDE_LENGTH + 1 {
            // the nucleotide before the GG completes the NGG motif
            let pam_position = m - 1;
            let start = pam_position - GUIDE_LENGTH;

            candidates.push(GuideCandidate {
                position: start + 1,
                sequence: sequence[start..pam_position].to_string(),
            });
        }

        search_from = m + 1;
    }

    candidates
}

/// Writes the candidate table as tab-separated values with a header row.
pub fn write_candidates_tsv(writer: &mut impl Write, candidates: &[GuideCandidate]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    for candidate in candidates {
        wtr.serialize(candidate)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Writes the candidate table as a pretty-printed JSON array.
pub fn write_candidates_json(writer: &mut impl Write, candidates: &[GuideCandidate]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, candidates)?;
    writeln!(writer)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence() {
        assert!(scan_for_candidates("").is_empty());
    }

    #[test]
    fn sequence_below_minimum_length() {
        // 21 characters: the earliest emitting GG match needs index >= 21
        assert!(scan_for_candidates("AAAAAAAAAAAAAAAAAAAGG").is_empty());
    }

    #[test]
    fn no_pam_sites() {
        let seq = "AT".repeat(30);
        assert!(scan_for_candidates(&seq).is_empty());
    }

    #[test]
    fn single_target() {
        // 20 A's, then CGG, then 10 T's: one NGG site with a full upstream guide
        let seq = format!("{}CGG{}", "A".repeat(20), "T".repeat(10));
        let candidates = scan_for_candidates(&seq);

        assert_eq!(
            candidates,
            vec![GuideCandidate {
                position: 1,
                sequence: "A".repeat(20),
            }]
        );
    }

    #[test]
    fn overlapping_pam_windows_are_kept() {
        // a GGG run holds two GG windows; both anchor a candidate once the
        // upstream-length constraint is satisfied
        let seq = format!("{}GGG", "A".repeat(21));
        let candidates = scan_for_candidates(&seq);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].position, 1);
        assert_eq!(candidates[1].position, 2);
        assert_eq!(candidates[0].sequence, "A".repeat(20));
        assert_eq!(candidates[1].sequence, "A".repeat(20));
    }

    #[test]
    fn gg_too_early_is_skipped() {
        // GG at index 5: only 4 nucleotides upstream of the PAM
        let seq = format!("ATATAGG{}", "T".repeat(20));
        assert!(scan_for_candidates(&seq).is_empty());
    }

    #[test]
    fn candidate_invariants_hold() {
        let seq = format!(
            "{}AGGTC{}TGGACGG{}GG",
            "ATCGA".repeat(5),
            "CT".repeat(12),
            "A".repeat(7)
        );
        let candidates = scan_for_candidates(&seq);
        assert!(!candidates.is_empty());

        for c in &candidates {
            assert_eq!(c.sequence.len(), GUIDE_LENGTH);
            assert!(c.position >= 1);
            assert!(c.position + GUIDE_LENGTH - 1 <= seq.len());
            // the reported substring is really at the reported position
            assert_eq!(&seq[c.position - 1..c.position - 1 + GUIDE_LENGTH], c.sequence);
        }
    }

    #[test]
    fn candidates_ascend_by_position() {
        let seq = format!("{}GGGTTAGGCAGG", "ATGC".repeat(10));
        let candidates = scan_for_candidates(&seq);
        assert!(candidates.len() > 1);

        let positions: Vec<usize> = candidates.iter().map(|c| c.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn tsv_output() {
        let candidates = vec![GuideCandidate {
            position: 1,
            sequence: "A".repeat(20),
        }];

        let mut out = Vec::new();
        write_candidates_tsv(&mut out, &candidates).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(out, format!("position\tsequence\n1\t{}\n", "A".repeat(20)));
    }
}
