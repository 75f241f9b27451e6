use crate::analysis::{CrisprAnalysis, CrisprTarget, MutationAnalysis, RiskLevel};
use crate::file::AnalysisBundle;
use anyhow::Result;
use indoc::formatdoc;
use serde_json::{json, Value};
use std::io::Write;

// encode the template HTML file at compile time as a string literal
const TEMPLATE_HTML: &str = include_str!("report_template.html");

/// Report flavour.
#[derive(clap::ValueEnum, Clone)]
pub enum ReportFormat {
    /// a standalone HTML page
    Html,

    /// the plain-text clinical report layout
    Text,
}

pub struct RiskCounts {
    pub safe: usize,
    pub moderate: usize,
    pub risky: usize,
}

pub fn risk_counts(targets: &[CrisprTarget]) -> RiskCounts {
    let mut counts = RiskCounts {
        safe: 0,
        moderate: 0,
        risky: 0,
    };

    for target in targets {
        match target.risk_level {
            RiskLevel::Safe => counts.safe += 1,
            RiskLevel::Moderate => counts.moderate += 1,
            RiskLevel::Risky => counts.risky += 1,
        }
    }

    counts
}

/// Display ordering for the target table: ascending position.
pub fn targets_by_position(analysis: &CrisprAnalysis) -> Vec<&CrisprTarget> {
    let mut targets: Vec<&CrisprTarget> = analysis.targets.iter().collect();
    targets.sort_by_key(|t| t.position);
    targets
}

/// Recommendation ordering: descending safety score. Kept separate from
/// the positional table ordering; neither is canonical.
pub fn targets_by_safety(analysis: &CrisprAnalysis) -> Vec<&CrisprTarget> {
    let mut targets: Vec<&CrisprTarget> = analysis.targets.iter().collect();
    targets.sort_by(|a, b| b.safety_score.total_cmp(&a.safety_score));
    targets
}

/// Renders the bundle as a standalone HTML page.
pub fn render_html(bundle: &AnalysisBundle, writer: &mut impl Write) -> Result<()> {
    let data = json!({
        "version": bundle.mutascope_version,
        "generated": bundle.generated,
        "sequence_length": bundle.sequence_length,
        "gc_content": format!("{:.1}", bundle.gc_content),
        "was_modified": bundle.was_modified,
        "mutation": bundle.mutation.as_ref().map(mutation_data),
        "crispr": bundle.crispr.as_ref().map(crispr_data),
    });

    let reg = handlebars::Handlebars::new();
    reg.render_template_to_write(TEMPLATE_HTML, &data, writer)?;

    Ok(())
}

fn mutation_data(m: &MutationAnalysis) -> Value {
    json!({
        "classification": m.classification.to_string(),
        "probability_pct": format!("{:.1}", m.probability * 100.0),
        "gene": m.clinical_impact.gene,
        "disease_association": m.clinical_impact.disease_association,
        "protein_impact": m.clinical_impact.protein_impact,
        "clinical_significance": m.clinical_impact.clinical_significance.to_string(),
        "explanation": m.ai_explanation,
    })
}

fn crispr_data(c: &CrisprAnalysis) -> Value {
    let counts = risk_counts(&c.targets);

    json!({
        "total": c.targets.len(),
        "safe": counts.safe,
        "moderate": counts.moderate,
        "risky": counts.risky,
        "by_position": targets_by_position(c).into_iter().map(target_data).collect::<Vec<_>>(),
        "by_safety": targets_by_safety(c).into_iter().map(target_data).collect::<Vec<_>>(),
    })
}

fn target_data(t: &CrisprTarget) -> Value {
    json!({
        "position": t.position,
        "sequence": t.sequence,
        "gc_content": format!("{:.1}", t.gc_content),
        "safety_score": format!("{:.2}", t.safety_score),
        "risk_level": t.risk_level.to_string(),
        "justification": t.justification,
    })
}

/// Renders the bundle in the plain-text clinical report layout.
pub fn render_text(bundle: &AnalysisBundle) -> String {
    let mut out = formatdoc! {"
        ============================================================
        MUTASCOPE CLINICAL DNA REPORT
        ============================================================

        Report Generated: {generated}
        Tool Version: {version}
        Sequence Length: {len} bp
        GC Content (computed locally): {gc:.1}%
        ",
        generated = bundle.generated,
        version = bundle.mutascope_version,
        len = bundle.sequence_length,
        gc = bundle.gc_content,
    };

    if bundle.was_modified {
        out.push_str("Note: invalid characters were removed during normalization.\n");
    }

    out.push_str(&formatdoc! {"

        ------------------------------------------------------------
        SECTION 1: MUTATION ANALYSIS
        ------------------------------------------------------------
        "});

    match &bundle.mutation {
        Some(m) => {
            out.push_str(&formatdoc! {"
                OVERALL CLASSIFICATION: {classification}
                MUTATION PROBABILITY: {prob:.1}%

                CLINICAL IMPACT (SIMULATED DATABASE LOOKUP):
                - Gene Name: {gene}
                - Disease Association: {disease}
                - Protein Impact: {protein}
                - Clinical Significance: {significance}

                AI EXPLANATION FOR CLINICIAN:
                {explanation}
                ",
                classification = m.classification.to_string().to_uppercase(),
                prob = m.probability * 100.0,
                gene = m.clinical_impact.gene,
                disease = m.clinical_impact.disease_association,
                protein = m.clinical_impact.protein_impact,
                significance = m.clinical_impact.clinical_significance.to_string().to_uppercase(),
                explanation = m.ai_explanation,
            });
        }
        None => out.push_str("Mutation analysis was not run.\n"),
    }

    out.push_str(&formatdoc! {"

        ------------------------------------------------------------
        SECTION 2: CRISPR-CAS9 TARGET ANALYSIS
        ------------------------------------------------------------
        "});

    match &bundle.crispr {
        Some(c) if !c.targets.is_empty() => {
            let counts = risk_counts(&c.targets);
            out.push_str(&formatdoc! {"
                SUMMARY: Found {total} potential target sites.
                         Safe: {safe}, Moderate: {moderate}, Risky: {risky}

                RECOMMENDED TARGETS (sorted by Safety Score):
                ",
                total = c.targets.len(),
                safe = counts.safe,
                moderate = counts.moderate,
                risky = counts.risky,
            });

            for (i, t) in targets_by_safety(c).iter().enumerate() {
                out.push_str(&formatdoc! {"
                    [{n}] Position: {position}
                        gRNA Sequence: {sequence}
                        GC Content: {gc:.1}%
                        Safety Score: {safety:.2}/1.00
                        Risk Level: {risk}

                    ",
                    n = i + 1,
                    position = t.position,
                    sequence = t.sequence,
                    gc = t.gc_content,
                    safety = t.safety_score,
                    risk = t.risk_level,
                });
            }

            out.push_str("TARGET TABLE (sorted by position):\n");
            for t in targets_by_position(c) {
                out.push_str(&format!(
                    "{:>8}  {}  {:>5.1}%  {:.2}  {}\n",
                    t.position, t.sequence, t.gc_content, t.safety_score, t.risk_level
                ));
            }
        }
        Some(_) => out.push_str("No suitable CRISPR targets were identified in this sequence.\n"),
        None => out.push_str("CRISPR analysis was not run.\n"),
    }

    out.push_str(&formatdoc! {"

        ============================================================
        END OF REPORT.
        Disclaimer: This AI-generated report is for research and
        educational purposes only and is not a substitute for
        professional medical advice or genetic counseling.
        "});

    out
}
