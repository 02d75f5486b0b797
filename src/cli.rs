use crate::{constants::*, utils::util::Result};
use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    if git_describe.is_empty() || git_describe == "VERGEN_IDEMPOTENT_OUTPUT" {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
});

#[derive(Parser, Debug)]
#[command(name="igvx",
          version=&**FULL_VERSION,
          about="IGV screenshot batch script generator",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Batch(BatchArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Batch(_) => "batch",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct BatchArgs {
    /// FASTA file with the reference genome
    #[arg(
        long = "genome",
        value_name = "FASTA",
        value_parser = check_file_exists
    )]
    pub genome: PathBuf,

    /// BAM file with the read alignments
    #[arg(
        long = "aln",
        value_name = "BAM",
        value_parser = check_file_exists
    )]
    pub aln: PathBuf,

    /// VCF file with the variants to visualize
    #[arg(
        long = "vcf",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub vcf: PathBuf,

    /// Name of the snapshot directory; the batch script is written to <PREFIX>.bat
    #[arg(
        short = 'o',
        long = "out-prefix",
        value_name = "PREFIX",
        default_value = DEFAULT_OUT_PREFIX,
        value_parser = check_prefix_path
    )]
    pub out_prefix: String,

    /// Squish the alignment track to capture more reads per screenshot
    #[arg(long = "squish", default_value_t = DEFAULT_SQUISH)]
    pub squish: bool,

    #[command(flatten)]
    pub cluster_args: ClusterArgs,
}

impl BatchArgs {
    pub fn batch_script_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.out_prefix, BATCH_SCRIPT_EXTENSION))
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ClusterArgs {
    /// Number of bases on each side of a variant to include in its window
    #[arg(
        long,
        value_name = "PADDING",
        default_value_t = DEFAULT_PADDING,
        value_parser = padding_in_range
    )]
    pub padding: i64,

    /// Do not combine nearby variants into single screenshots
    #[arg(
        long = "no-combine",
        action = ArgAction::SetFalse,
        default_value_t = DEFAULT_COMBINE_NEARBY
    )]
    pub combine_nearby: bool,
}

impl ClusterArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, updates: impl FnOnce(&mut Self)) -> Self {
        updates(&mut self);
        self
    }
}

impl Default for ClusterArgs {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            combine_nearby: DEFAULT_COMBINE_NEARBY,
        }
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `-v` or `--verbose` flag in the command-line arguments.
///
/// # Arguments
///
/// * `args` - A reference to the parsed command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Validates that the provided string represents a non-negative padding value.
///
/// # Arguments
///
/// * `s` - A string slice representing the padding in bases.
///
/// # Returns
///
/// Returns a `Result<i64>` which is Ok if the padding is valid, or an Err with a descriptive message if not.
fn padding_in_range(s: &str) -> Result<i64> {
    let padding: i64 = s
        .parse::<i64>()
        .map_err(|_| anyhow!("`{}` is not a valid padding value", s))?;
    if padding < 0 {
        Err(anyhow!("Padding must be >= 0"))?;
    }
    Ok(padding)
}

/// Checks if the provided file path exists.
///
/// Validates that the file path provided as an argument exists in the file system.
/// It is used to ensure that the file paths provided for input files are valid before attempting to process them.
///
/// # Arguments
///
/// * `s` - A string slice representing the file path to check.
///
/// # Returns
///
/// Returns a `Result<PathBuf>` which is Ok if the file exists, or an Err with a descriptive message if not.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(anyhow!("File does not exist: {}", path.display()))?;
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    if s.is_empty() {
        Err(anyhow!("Output prefix must not be empty"))?;
    }
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            Err(anyhow!("Path does not exist: {}", parent_dir.display()))?;
        }
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_batch_args(args: &[&str]) -> BatchArgs {
        let parsed = Cli::try_parse_from(args).expect("CLI parse should succeed");
        let Command::Batch(args) = parsed.command;
        args
    }

    fn fixture_files() -> (tempfile::TempDir, String, String, String) {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let genome = dir.path().join("ref.fasta");
        let aln = dir.path().join("sample.bam");
        let vcf = dir.path().join("calls.vcf");
        for path in [&genome, &aln, &vcf] {
            std::fs::write(path, b"").expect("fixture file should be writable");
        }
        (
            dir,
            genome.to_string_lossy().into_owned(),
            aln.to_string_lossy().into_owned(),
            vcf.to_string_lossy().into_owned(),
        )
    }

    #[test]
    fn test_batch_args_defaults() {
        let (_dir, genome, aln, vcf) = fixture_files();
        let args = parse_batch_args(&[
            "igvx", "batch", "--genome", &genome, "--aln", &aln, "--vcf", &vcf,
        ]);

        assert_eq!(args.out_prefix, DEFAULT_OUT_PREFIX);
        assert_eq!(args.cluster_args.padding, DEFAULT_PADDING);
        assert!(args.cluster_args.combine_nearby);
        assert!(!args.squish);
        assert_eq!(
            args.batch_script_path(),
            PathBuf::from(format!("{DEFAULT_OUT_PREFIX}.bat"))
        );
    }

    #[test]
    fn test_no_combine_clears_combine_nearby() {
        let (_dir, genome, aln, vcf) = fixture_files();
        let args = parse_batch_args(&[
            "igvx",
            "batch",
            "--genome",
            &genome,
            "--aln",
            &aln,
            "--vcf",
            &vcf,
            "--no-combine",
            "--squish",
            "--padding",
            "10",
        ]);

        assert!(!args.cluster_args.combine_nearby);
        assert!(args.squish);
        assert_eq!(args.cluster_args.padding, 10);
    }

    #[test]
    fn test_negative_padding_is_rejected() {
        let (_dir, genome, aln, vcf) = fixture_files();
        let result = Cli::try_parse_from([
            "igvx",
            "batch",
            "--genome",
            &genome,
            "--aln",
            &aln,
            "--vcf",
            &vcf,
            "--padding=-1",
        ]);
        assert!(result.is_err());
        assert!(padding_in_range("-1").is_err());
        assert!(padding_in_range("abc").is_err());
        assert_eq!(padding_in_range("0").unwrap(), 0);
    }

    #[test]
    fn test_missing_input_file_is_rejected() {
        let (_dir, genome, aln, _) = fixture_files();
        let result = Cli::try_parse_from([
            "igvx",
            "batch",
            "--genome",
            &genome,
            "--aln",
            &aln,
            "--vcf",
            "no_such_file.vcf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cluster_args_with_builder() {
        let args = ClusterArgs::new().with(|a| {
            a.padding = 0;
            a.combine_nearby = false;
        });
        assert_eq!(args.padding, 0);
        assert!(!args.combine_nearby);
    }
}
