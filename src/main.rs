use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use wflog_validate::{
    exit_code, load_entries_as, render_json, render_text, validate, LogFormat, ReaderConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "wflog-validate",
    version,
    about = "Validate deterministic logs exported by the workflow engine"
)]
struct Cli {
    /// Log file to validate (.json or .csv).
    #[arg(value_name = "LOGFILE")]
    logfile: PathBuf,

    /// Verbose output (debug diagnostics on stderr; RUST_LOG overrides).
    #[arg(short, long)]
    verbose: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Key of the entry array in JSON exports.
    #[arg(long, default_value = "workflow_logs")]
    root_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Ok(format) = LogFormat::from_path(&cli.logfile) else {
        eprintln!("Error: Unknown file format. Use .json or .csv");
        return ExitCode::from(1);
    };

    match run(&cli, format) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, format: LogFormat) -> anyhow::Result<u8> {
    let config = ReaderConfig::builder()
        .root_key(cli.root_key.as_str())
        .build()
        .context("invalid --root-key")?;

    if cli.format == OutputFormat::Text {
        println!("Validating {format} log file: {}", cli.logfile.display());
    }

    let entries = load_entries_as(&cli.logfile, format, &config)?;
    let report = validate(&entries);

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    Ok(u8::try_from(exit_code(&report)).unwrap_or(1))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}
