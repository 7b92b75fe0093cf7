use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "cmapper - residue contact maps from structure coordinates, and their transfer onto aligned query sequences.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build contact maps for one or more structure files.
    Build(BuildArgs),
    /// Transfer a target's contacts onto a query through a pairwise alignment.
    Remap(RemapArgs),
    /// Print a short summary of a structure or contact map file.
    Inspect(InspectArgs),
}

/// On-disk form of a contact map.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapFormat {
    /// Bit-packed upper triangle with a residue-count header.
    Packed,
    /// CSV list of contacting residue pairs.
    Sparse,
}

impl MapFormat {
    pub fn extension(self) -> &'static str {
        match self {
            MapFormat::Packed => "cmap",
            MapFormat::Sparse => "csv",
        }
    }
}

/// Arguments for the `build` subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Structure files in the binary coordinate format.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Directory receiving one contact map per input, named after the input file.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the contact distance threshold in Ångström.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f32>,

    /// Override the output format.
    #[arg(short, long, value_enum)]
    pub format: Option<MapFormat>,

    /// Override a configuration value, e.g. `-S contacts.threshold-angstrom=8.0`.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Where the target's contacts come from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct TargetSource {
    /// Target structure file; its contacts are computed at the configured threshold.
    #[arg(long, value_name = "PATH")]
    pub structure: Option<PathBuf>,

    /// Precomputed sparse contact map of the target (CSV).
    #[arg(long, value_name = "PATH")]
    pub sparse: Option<PathBuf>,
}

/// Arguments for the `remap` subcommand.
#[derive(Args, Debug)]
pub struct RemapArgs {
    #[command(flatten)]
    pub target: TargetSource,

    /// Gapped query row of the alignment.
    #[arg(long, value_name = "SEQ", allow_hyphen_values = true)]
    pub query_alignment: String,

    /// Gapped target row of the alignment.
    #[arg(long, value_name = "SEQ", allow_hyphen_values = true)]
    pub target_alignment: String,

    /// Output path for the query contact map (packed format).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the contact distance threshold in Ångström.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f32>,

    /// Override the number of neighbours linked to each inserted query residue.
    #[arg(short, long, value_name = "INT")]
    pub generated_contacts: Option<u32>,

    /// Override a configuration value, e.g. `-S contacts.threshold-angstrom=8.0`.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Kind of file to inspect.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Structure,
    Packed,
    Sparse,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// File to summarize.
    #[arg(required = true, value_name = "PATH")]
    pub path: PathBuf,

    /// How to interpret the file.
    #[arg(short, long, value_enum)]
    pub kind: FileKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn remap_accepts_gapped_alignment_rows() {
        let cli = Cli::parse_from([
            "cmapper",
            "remap",
            "--structure",
            "t.bin",
            "--query-alignment",
            "-AC-T",
            "--target-alignment",
            "GA-GT",
            "-o",
            "q.cmap",
        ]);
        let Commands::Remap(args) = cli.command else {
            panic!("expected remap");
        };
        assert_eq!(args.query_alignment, "-AC-T");
        assert_eq!(args.target.structure, Some(PathBuf::from("t.bin")));
        assert!(args.target.sparse.is_none());
    }

    #[test]
    fn remap_requires_exactly_one_target_source() {
        let result = Cli::try_parse_from([
            "cmapper",
            "remap",
            "--structure",
            "t.bin",
            "--sparse",
            "t.csv",
            "--query-alignment",
            "A",
            "--target-alignment",
            "A",
            "-o",
            "q.cmap",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn build_accepts_multiple_inputs() {
        let cli = Cli::parse_from([
            "cmapper", "-vv", "build", "-i", "a.bin", "b.bin", "-o", "out", "-f", "sparse",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input.len(), 2);
        assert_eq!(args.format, Some(MapFormat::Sparse));
    }
}
