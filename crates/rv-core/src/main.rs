//! rvalue CLI.

use clap::{Args, Parser, Subcommand};
use rv_common::{OutputFormat, Result};
use rv_config::{resolve_config, ConfigPaths, NonConvergencePolicy, RValueConfig, ResolvedConfig};
use rv_core::logging::init_logging;
use rv_core::{ExitCode, RValueReport, RValueSolver, StudyInput};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "rvalue",
    version,
    about = "FDR r-values for two-stage (primary + follow-up) replication studies"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json, env = "RVALUE_FORMAT")]
    format: OutputFormat,

    /// Config file (JSON or TOML); overrides RVALUE_CONFIG and the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute r-values for a study document
    Compute(ComputeArgs),
    /// Inspect and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct ComputeArgs {
    /// Study document (JSON with p1, p2, m, labels); `-` reads stdin
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Number of tests in the primary study (overrides the document)
    #[arg(long)]
    m: Option<usize>,

    /// Emphasis on the follow-up study, in (0, 1)
    #[arg(long)]
    c2: Option<f64>,

    /// Lower bound on the null-null fraction, in [0, 1)
    #[arg(long)]
    l00: Option<f64>,

    /// Residual evaluations allowed per feature
    #[arg(long)]
    max_evaluations: Option<usize>,

    /// best_effort or fail
    #[arg(long)]
    on_nonconvergence: Option<NonConvergencePolicy>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the resolved configuration and where it came from
    Show,
    /// Validate a config file
    Validate { path: PathBuf },
    /// Print the JSON Schema of the config file
    Schema,
}

fn resolve(cli: &Cli) -> Result<ResolvedConfig> {
    let paths = ConfigPaths::from_env(cli.config.clone());
    Ok(resolve_config(&paths)?)
}

fn read_input(path: &str) -> Result<StudyInput> {
    if path == "-" {
        StudyInput::from_reader(io::stdin().lock())
    } else {
        StudyInput::from_reader(BufReader::new(File::open(path)?))
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_compute(cli: &Cli, args: &ComputeArgs) -> Result<()> {
    let resolved = resolve(cli)?;
    debug!(source = ?resolved.source, "configuration resolved");
    let mut config = resolved.config;
    if let Some(c2) = args.c2 {
        config.params.c2 = c2;
    }
    if let Some(l00) = args.l00 {
        config.params.l00 = l00;
    }
    if let Some(max) = args.max_evaluations {
        config.solver.max_evaluations = max;
    }
    if let Some(policy) = args.on_nonconvergence {
        config.solver.on_nonconvergence = policy;
    }
    config.validate()?;

    let (study, labels) = read_input(&args.input)?.into_study(args.m)?;
    let solution = RValueSolver::new(&study, config.params, config.solver).solve()?;
    let report = RValueReport::build(&study, labels, config.params, config.solver, solution);

    match cli.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Summary => print!("{}", report.render_summary()),
        OutputFormat::Plain => print!("{}", report.render_plain()),
    }
    Ok(())
}

fn run_config(cli: &Cli, cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let resolved = resolve(cli)?;
            match cli.format {
                OutputFormat::Json => print_json(&resolved)?,
                _ => {
                    println!("source: {:?}", resolved.source);
                    println!("c2: {}", resolved.config.params.c2);
                    println!("l00: {}", resolved.config.params.l00);
                    println!("initial_guess: {}", resolved.config.solver.initial_guess);
                    println!("tolerance_ceiling: {:e}", resolved.config.solver.tolerance_ceiling);
                    println!("max_evaluations: {}", resolved.config.solver.max_evaluations);
                    println!("on_nonconvergence: {}", resolved.config.solver.on_nonconvergence);
                }
            }
        }
        ConfigCommand::Validate { path } => {
            RValueConfig::from_file(path)?;
            match cli.format {
                OutputFormat::Json => print_json(&json!({
                    "status": "ok",
                    "path": path.display().to_string(),
                }))?,
                _ => println!("{}: ok", path.display()),
            }
        }
        ConfigCommand::Schema => print_json(&RValueConfig::json_schema())?,
    }
    Ok(())
}

fn error_envelope(code: u32, message: &str) -> serde_json::Value {
    json!({
        "status": "error",
        "code": code,
        "message": message,
    })
}

fn report_failure(format: OutputFormat, code: u32, message: &str) {
    match format {
        OutputFormat::Json => println!("{}", error_envelope(code, message)),
        _ => eprintln!("rvalue: error: {message}"),
    }
}

/// Panics exit with `InternalError` and the usual error envelope.
fn install_panic_hook(format: OutputFormat) {
    std::panic::set_hook(Box::new(move |info| {
        let code = ExitCode::InternalError;
        report_failure(format, code.as_i32() as u32, &info.to_string());
        std::process::exit(code.as_i32());
    }));
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);
    install_panic_hook(cli.format);

    let result = match &cli.command {
        Commands::Compute(args) => run_compute(&cli, args),
        Commands::Config(cmd) => run_config(&cli, cmd),
    };

    let code = match result {
        Ok(()) => ExitCode::Clean,
        Err(err) => {
            report_failure(cli.format, err.code(), &err.to_string());
            ExitCode::from_error(&err)
        }
    };
    std::process::exit(code.as_i32());
}
