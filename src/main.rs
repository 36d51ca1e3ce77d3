use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use text_comparator::backend::{
    ComparisonReport, ReportInput, format_json, read_text, validate_json,
};
use text_comparator::config::Config;
use text_comparator::differ::{Algorithm, DiffResult};
use text_comparator::messages::{WorkerMessage, WorkerResponse};
use text_comparator::render::{render_side_by_side, render_stats, render_unified};
use text_comparator::worker::spawn_worker;
use tracing::{Level, info, warn};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "text-comparator",
    version,
    about = "Compare text files line by line and check embedded JSON"
)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare two files line by line.
    Compare(CompareArgs),
    /// Check whether files contain valid JSON.
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Pretty-print a JSON file.
    Format {
        file: PathBuf,
        /// Spaces per indentation level (defaults to the configured value).
        #[arg(long)]
        indent: Option<usize>,
        /// Rewrite the file instead of printing to stdout.
        #[arg(long)]
        in_place: bool,
    },
    /// Show the active settings and where they are stored.
    Config,
}

#[derive(Debug, clap::Args)]
struct CompareArgs {
    first: PathBuf,
    second: PathBuf,

    /// Keep line terminators, so a changed line ending counts as a change.
    #[arg(long)]
    keep_ends: bool,

    /// Print the result as JSON.
    #[arg(long, conflicts_with = "side_by_side")]
    json: bool,

    /// Show both inputs in two columns.
    #[arg(long)]
    side_by_side: bool,

    /// Column width for --side-by-side.
    #[arg(long, default_value_t = 60)]
    width: usize,

    /// Save a report; without a path it goes to the configured report directory.
    #[arg(long)]
    report: Option<Option<PathBuf>>,

    /// Alignment engine (defaults to the configured value).
    #[arg(long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Print progress to stderr.
    #[arg(long)]
    progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Lcs,
    Myers,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Lcs => Algorithm::Lcs,
            AlgorithmArg::Myers => Algorithm::Myers,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = Config::default();

    match cli.command {
        Command::Compare(args) => run_compare(&args, &config),
        Command::Validate { files } => run_validate(&files),
        Command::Format {
            file,
            indent,
            in_place,
        } => run_format(&file, indent.unwrap_or(config.settings.json_indent), in_place),
        Command::Config => run_config(&config),
    }
}

fn run_compare(args: &CompareArgs, config: &Config) -> Result<()> {
    let mut options = config.diff_options();
    if let Some(algorithm) = args.algorithm {
        options.algorithm = algorithm.into();
    }
    let keep_ends = args.keep_ends || config.settings.keep_line_endings;

    let (sender, receiver) = spawn_worker(options, config.settings.cache_capacity);
    let id = Uuid::new_v4();
    sender
        .send(WorkerMessage::CompareFiles {
            id,
            first: args.first.clone(),
            second: args.second.clone(),
            keep_ends,
        })
        .map_err(|_| anyhow!("comparison worker is not running"))?;

    let result = loop {
        match receiver.recv().context("comparison worker stopped")? {
            WorkerResponse::Progress { stage, percent, .. } => {
                info!("{:?} ({}%)", stage, percent);
                if args.progress {
                    eprintln!("[{:>3}%] {:?}", percent, stage);
                }
            }
            WorkerResponse::Finished { result, .. } => {
                break result.map_err(|e| anyhow!(e)).context("Failed to compare files")?;
            }
        }
    };
    let _ = sender.send(WorkerMessage::Stop);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if args.side_by_side {
        println!("{}", render_stats(&result.stats));
        print!("{}", render_side_by_side(&result, args.width));
    } else {
        println!("{}", render_stats(&result.stats));
        print!("{}", render_unified(&result));
    }

    if let Some(target) = &args.report {
        let target = target.clone().unwrap_or_else(|| config.report_dir());
        // a failed save never discards the comparison already printed
        if let Err(e) = save_report(args, &result, &target) {
            warn!("Failed to save report: {:#}", e);
            eprintln!("Failed to save report: {:#}", e);
        }
    }

    Ok(())
}

fn report_input(path: &Path) -> ReportInput {
    let json_valid = match read_text(path) {
        Ok(text) => validate_json(&text).valid,
        Err(e) => {
            warn!("JSON check skipped: {}", e);
            false
        }
    };
    ReportInput {
        label: path.display().to_string(),
        json_valid,
    }
}

fn save_report(args: &CompareArgs, result: &DiffResult, target: &Path) -> Result<()> {
    let report = ComparisonReport::new(
        report_input(&args.first),
        report_input(&args.second),
        result,
    );
    let saved = if target.extension().is_some() {
        report.save_to_file(target)?
    } else {
        report.save_to_dir(target)?
    };
    eprintln!("Report saved successfully to: {}", saved.display());
    Ok(())
}

fn run_validate(files: &[PathBuf]) -> Result<()> {
    let mut invalid = Vec::new();

    for (index, file) in files.iter().enumerate() {
        let label = format!("File {}", index + 1);
        match read_text(file) {
            Ok(text) if text.trim().is_empty() => {
                println!("{}: Empty file", file.display());
                invalid.push(label);
            }
            Ok(text) => {
                let status = validate_json(&text);
                if status.valid {
                    println!("{}: Valid JSON ✓", file.display());
                } else {
                    println!("{}: Invalid JSON ✗ ({})", file.display(), status.message);
                    invalid.push(label);
                }
            }
            Err(e) => {
                println!("{}: Error reading file ({})", file.display(), e);
                invalid.push(label);
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Invalid JSON in: {}", invalid.join(", ")))
    }
}

fn run_format(file: &Path, indent: usize, in_place: bool) -> Result<()> {
    let text = read_text(file)?;
    let formatted = format_json(&text, indent)
        .with_context(|| format!("Invalid JSON in {}", file.display()))?;

    if in_place {
        fs::write(file, format!("{}\n", formatted))
            .with_context(|| format!("Failed to write {}", file.display()))?;
        info!("Formatted {:?}", file);
    } else {
        println!("{}", formatted);
    }
    Ok(())
}

fn run_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config.settings)?);
    match Config::config_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(e) => warn!("Config path unavailable: {}", e),
    }
    println!("Data directory: {}", config.data_dir().display());
    println!("Report directory: {}", config.report_dir().display());
    Ok(())
}
