extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
};

use anyhow::{ensure, Result};
use clap::Parser;

mod analysis;
mod cli;
mod file;
mod input;
mod report;
mod scan;
mod sequence;

use cli::{Cli, Commands};

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// If `output` is `Some`, it creates a file at the specified path and returns a `BufWriter` for it.
/// If `output` is `None`, it returns a `BufWriter` for the standard output.
///
/// # Arguments
///
/// * `output` - An `Option` containing the path to the output file as a `String`.
///
/// # Returns
///
/// A `Result` containing a `BufWriter` that implements `Write`.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Scan {
            file,
            seq,
            demo,
            format,
            output,
        } => {
            let normalized = input::resolve(file.as_deref(), seq.as_deref(), *demo)?;
            let candidates = scan::scan_for_candidates(&normalized.sequence);

            if candidates.is_empty() {
                info!("no PAM-adjacent targets found");
            } else {
                info!("found {} candidate guide sites", candidates.len());
            }

            let mut writer = get_writer(output)?;
            match format {
                scan::CandidateFormat::Tsv => scan::write_candidates_tsv(&mut writer, &candidates)?,
                scan::CandidateFormat::Json => {
                    scan::write_candidates_json(&mut writer, &candidates)?
                }
            };
        }
        Commands::Analyze {
            file,
            seq,
            demo,
            output,
            model,
            mutation_only,
            crispr_only,
        } => {
            let normalized = input::resolve(file.as_deref(), seq.as_deref(), *demo)?;
            ensure!(
                !normalized.sequence.is_empty(),
                "input contained no A/T/G/C characters to analyze"
            );

            let provider = analysis::gemini::GeminiProvider::from_env(model)?;
            let mut bundle = file::AnalysisBundle::new(&normalized);

            if !*crispr_only {
                info!(
                    "requesting mutation classification for {} nt",
                    normalized.sequence.len()
                );
                bundle.mutation = Some(analysis::mutation_screen(&provider, &normalized.sequence)?);
            }

            if !*mutation_only {
                info!("scoring guide RNA candidates");
                bundle.crispr = Some(analysis::crispr_screen(&provider, &normalized.sequence)?);
            }

            bundle.save(output)?;
            info!("Completed analysis to {output}");
        }
        Commands::Report {
            analysis,
            output,
            format,
        } => {
            let bundle = file::AnalysisBundle::load(analysis)?;

            let mut writer = get_writer(output)?;
            match format {
                report::ReportFormat::Html => report::render_html(&bundle, &mut writer)?,
                report::ReportFormat::Text => write!(writer, "{}", report::render_text(&bundle))?,
            };
            writer.flush()?;

            info!("Completed report generation");
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
