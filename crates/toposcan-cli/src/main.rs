#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode as ProcessExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use toposcan_api::{analyze_with_log, diff_configs, AnalyzeOutcome, DiffOutcome};
use toposcan_core::ExitCode;
use toposcan_ingest::ParseLog;
use toposcan_model::SourceFormat;

#[derive(Parser)]
#[command(name = "toposcan")]
#[command(about = "Service-topology invariant and drift analysis")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one configuration and report invariant violations.
    Analyze {
        file: PathBuf,
        #[arg(long, value_enum)]
        format: Option<FormatCli>,
        #[arg(long, default_value_t = false)]
        fail_on_violations: bool,
    },
    /// Compare two configurations and report risk drift per service.
    Diff {
        old: PathBuf,
        new: PathBuf,
        #[arg(long, value_enum)]
        old_format: Option<FormatCli>,
        #[arg(long, value_enum)]
        new_format: Option<FormatCli>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Yaml,
    Json,
}

impl From<FormatCli> for SourceFormat {
    fn from(value: FormatCli) -> Self {
        match value {
            FormatCli::Yaml => SourceFormat::Yaml,
            FormatCli::Json => SourceFormat::Json,
        }
    }
}

fn infer_format(path: &Path) -> Option<SourceFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => Some(SourceFormat::Yaml),
        Some("json") => Some(SourceFormat::Json),
        _ => None,
    }
}

fn resolve_format(path: &Path, explicit: Option<FormatCli>) -> Result<SourceFormat, String> {
    if let Some(flag) = explicit {
        return Ok(flag.into());
    }
    infer_format(path).ok_or_else(|| {
        format!(
            "cannot infer format of {} (expected .yaml, .yml or .json); pass --format",
            path.display()
        )
    })
}

fn read_input(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

fn run_analyze(
    cli: &Cli,
    file: &Path,
    format: Option<FormatCli>,
    fail_on_violations: bool,
) -> Result<ExitCode, String> {
    let format = resolve_format(file, format)?;
    let raw = read_input(file)?;
    debug!(file = %file.display(), format = format.as_str(), bytes = raw.len(), "analyzing");

    let mut log = ParseLog::default();
    let outcome = analyze_with_log(&raw, format, &mut log);
    if cli.verbose > 0 {
        for event in log.events() {
            debug!(stage = ?event.stage, name = %event.name, fields = ?event.fields, "parse stage");
        }
    }

    render_analyze(cli, &outcome);
    if !outcome.is_success() {
        return Ok(ExitCode::Validation);
    }
    if fail_on_violations && !outcome.violations.is_empty() {
        return Ok(ExitCode::Validation);
    }
    Ok(ExitCode::Success)
}

fn render_analyze(cli: &Cli, outcome: &AnalyzeOutcome) {
    if cli.json {
        match serde_json::to_string_pretty(outcome) {
            Ok(body) => println!("{body}"),
            Err(e) => error!("cannot serialize outcome: {e}"),
        }
        return;
    }
    if cli.quiet {
        return;
    }
    for err in &outcome.errors {
        eprintln!("error: {err}");
    }
    if let Some(ir) = &outcome.ir {
        let hash = ir.metadata.raw_hash.as_deref().unwrap_or("-");
        println!(
            "{} service(s), fingerprint {hash}, {} violation(s)",
            ir.services.len(),
            outcome.violations.len()
        );
    }
    for v in &outcome.violations {
        println!(
            "  [{}] {} on {}: {}",
            v.severity.as_str(),
            v.id,
            v.service_name,
            v.description
        );
    }
}

fn run_diff(
    cli: &Cli,
    old: &Path,
    new: &Path,
    old_format: Option<FormatCli>,
    new_format: Option<FormatCli>,
) -> Result<ExitCode, String> {
    let old_fmt = resolve_format(old, old_format)?;
    let new_fmt = resolve_format(new, new_format)?;
    let old_raw = read_input(old)?;
    let new_raw = read_input(new)?;
    debug!(old = %old.display(), new = %new.display(), "diffing");

    let outcome = diff_configs(&old_raw, old_fmt, &new_raw, new_fmt);
    render_diff(cli, &outcome);
    if outcome.is_success() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::Validation)
    }
}

fn render_diff(cli: &Cli, outcome: &DiffOutcome) {
    if cli.json {
        match serde_json::to_string_pretty(outcome) {
            Ok(body) => println!("{body}"),
            Err(e) => error!("cannot serialize outcome: {e}"),
        }
        return;
    }
    if cli.quiet {
        return;
    }
    for err in &outcome.errors {
        eprintln!("error: {err}");
    }
    let Some(diff) = &outcome.diff else {
        return;
    };
    println!(
        "new: {}, resolved: {}",
        diff.summary.total_new_violations, diff.summary.total_resolved_violations
    );
    for change in &diff.changes {
        println!("{} [{}]", change.service_name, change.risk_impact.as_str());
        for message in &change.messages {
            println!("  {message}");
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Analyze {
            file,
            format,
            fail_on_violations,
        } => run_analyze(&cli, file, *format, *fail_on_violations),
        Commands::Diff {
            old,
            new,
            old_format,
            new_format,
        } => run_diff(&cli, old, new, *old_format, *new_format),
    };

    match result {
        Ok(code) => ProcessExitCode::from(code as u8),
        Err(message) => {
            eprintln!("error: {message}");
            ProcessExitCode::from(ExitCode::Usage as u8)
        }
    }
}
