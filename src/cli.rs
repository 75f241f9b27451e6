use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 mutascope version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   mutation classification and CRISPR-Cas9 target screening
   backed by a remote generative analysis model";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a sequence for NGG PAM sites and list guide RNA candidates
    #[command(arg_required_else_help = true)]
    Scan {
        /// the input sequence file (.fasta, .fa or .txt). FASTA header lines,
        /// whitespace and lowercase letters are all tolerated; characters outside
        /// A/T/G/C are stripped with a warning.
        #[arg(required_unless_present_any = ["seq", "demo"], verbatim_doc_comment)]
        file: Option<String>,

        /// pass the sequence directly on the command line instead of from a file
        #[arg(long, conflicts_with = "file")]
        seq: Option<String>,

        /// use the built-in demo sequence
        #[arg(long, conflicts_with_all = ["file", "seq"])]
        demo: bool,

        /// output format for the candidate table
        #[arg(long, value_enum, default_value = "tsv")]
        format: crate::scan::CandidateFormat,

        /// the output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,
    },

    /// Run the full remote analysis and write an analysis bundle
    #[command(arg_required_else_help = true)]
    Analyze {
        /// the input sequence file (.fasta, .fa or .txt)
        #[arg(required_unless_present_any = ["seq", "demo"])]
        file: Option<String>,

        /// pass the sequence directly on the command line instead of from a file
        #[arg(long, conflicts_with = "file")]
        seq: Option<String>,

        /// use the built-in demo sequence
        #[arg(long, conflicts_with_all = ["file", "seq"])]
        demo: bool,

        /// the output bundle file
        #[arg(short, default_value = "analysis.json")]
        output: String,

        /// the generative model to query. the API key is read from the
        /// GEMINI_API_KEY (or API_KEY) environment variable.
        #[arg(long, default_value = crate::analysis::gemini::DEFAULT_MODEL, verbatim_doc_comment)]
        model: String,

        /// only run the mutation classification request
        #[arg(long, action)]
        mutation_only: bool,

        /// only run the CRISPR target scoring request
        #[arg(long, action, conflicts_with = "mutation_only")]
        crispr_only: bool,
    },

    /// Render a report from a previously written analysis bundle
    #[command(arg_required_else_help = true)]
    Report {
        /// the analysis bundle produced by `analyze`
        #[arg(long)]
        analysis: String,

        /// the output file; defaults to standard output
        #[arg(short)]
        output: Option<String>,

        /// report flavour: a standalone HTML page, or the plain-text
        /// clinical report layout
        #[arg(long, value_enum, default_value = "html", verbatim_doc_comment)]
        format: crate::report::ReportFormat,
    },
}
