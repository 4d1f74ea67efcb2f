use crate::config::ValidationPreset;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The foldkit developers",
    version,
    about = "foldkit - validate amino-acid sequences, build synthetic CA traces and run calibrated length measurements.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S generation.seed=42
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert whitespace-separated three-letter residue codes to one-letter codes.
    Convert(ConvertArgs),
    /// Normalize and validate an amino-acid sequence.
    Validate(ValidateArgs),
    /// Generate a synthetic CA trace for a sequence and write it as a PDB file.
    Generate(GenerateArgs),
    /// Summarize the contents of a PDB file.
    Inspect(InspectArgs),
    /// Download an existing structure from the RCSB Protein Data Bank.
    Fetch(FetchArgs),
    /// Send a sequence to the configured prediction service and save the returned structure.
    Predict(PredictArgs),
    /// Convert calibrated pixel lengths to physical units and compute a segment percentage.
    Measure(MeasureArgs),
    /// Solve the linear equation `a*x + b = 0`.
    Solve(SolveArgs),
}

/// Where a sequence is read from: the command line or a text/FASTA file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SequenceInput {
    /// The sequence text.
    #[arg(value_name = "SEQUENCE")]
    pub sequence: Option<String>,

    /// Read the sequence from a file. Lines starting with '>' or ';' are ignored.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Three-letter codes, e.g. `ALA GLY SER` (quoted or as separate arguments).
    #[arg(required = true, num_args = 1.., value_name = "CODES")]
    pub codes: Vec<String>,

    /// Fail on unknown codes instead of substituting 'X'.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: SequenceInput,

    /// Treat the input as three-letter residue codes.
    #[arg(long)]
    pub three_letter: bool,

    /// Validation preset, overriding `validation.preset` from the config file.
    #[arg(long, value_enum, value_name = "PRESET")]
    pub policy: Option<ValidationPreset>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: SequenceInput,

    /// Treat the input as three-letter residue codes.
    #[arg(long)]
    pub three_letter: bool,

    /// Validation preset, overriding `validation.preset` from the config file.
    #[arg(long, value_enum, value_name = "PRESET")]
    pub policy: Option<ValidationPreset>,

    /// Coordinate layout: 'helical', 'linear[@step]' or 'random[@half-extent]'.
    #[arg(long, value_name = "POLICY")]
    pub coords: Option<String>,

    /// Seed for reproducible coordinates.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Chain identifier written to every record.
    #[arg(long = "chain", value_name = "CHAR")]
    pub chain_id: Option<char>,

    /// Output PDB path. The structure is printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the validated one-letter sequence as plain text.
    #[arg(long, value_name = "PATH")]
    pub sequence_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the PDB file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Four-character structure identifier, e.g. 1CRN.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output path. Defaults to `<ID>.pdb` in the current directory.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub input: SequenceInput,

    /// Validation preset, overriding `validation.preset` from the config file.
    #[arg(long, value_enum, value_name = "PRESET")]
    pub policy: Option<ValidationPreset>,

    /// Seed forwarded to the prediction service.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Output PDB path. The structure is printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    /// Length of the reference object in pixels.
    #[arg(long, value_name = "FLOAT", requires = "ref_length")]
    pub ref_px: Option<f64>,

    /// Known physical length of the reference object.
    #[arg(long, value_name = "FLOAT", requires = "ref_px")]
    pub ref_length: Option<f64>,

    /// Number of pixels that make up one unit.
    #[arg(long, value_name = "FLOAT", conflicts_with_all = ["ref_px", "ref_length"])]
    pub px_per_unit: Option<f64>,

    /// Total length.
    #[arg(long, value_name = "FLOAT", required_unless_present = "total_rect")]
    pub total: Option<f64>,

    /// Total length given as a ruler rectangle; its longer side is used.
    #[arg(long, value_name = "WxH", conflicts_with = "total")]
    pub total_rect: Option<String>,

    /// Segment length.
    #[arg(long, value_name = "FLOAT", required_unless_present = "segment_rect")]
    pub segment: Option<f64>,

    /// Segment length given as a ruler rectangle; its longer side is used.
    #[arg(long, value_name = "WxH", conflicts_with = "segment")]
    pub segment_rect: Option<String>,

    /// Physical unit (um, mm, cm, in), overriding `measurement.unit` from the config file.
    #[arg(long, value_name = "UNIT")]
    pub unit: Option<String>,

    /// Lengths are already in physical units; no calibration is applied.
    #[arg(long, conflicts_with_all = ["ref_px", "ref_length", "px_per_unit"])]
    pub physical: bool,

    /// Write the result as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct SolveArgs {
    /// Coefficient of x.
    #[arg(value_name = "A")]
    pub a: f64,

    /// Constant term.
    #[arg(value_name = "B")]
    pub b: f64,
}
