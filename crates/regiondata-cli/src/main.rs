mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use regiondata_core::{DatasetKind, Error as CoreError, GeneratorConfig};
use regiondata_eval::{EvalError, EvaluateOptions, EvaluationEngine, render_report};
use regiondata_generate::{ErrorKind, GenerationEngine, GenerationError};
use thiserror::Error;
use tracing::info;

use logging::init_logging;
use settings::{DEFAULT_CONFIG_PATH, load_config, save_config};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("{0}")]
    Evaluation(#[from] EvalError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("invalid configuration file: {0}")]
    ConfigDecode(#[from] toml::de::Error),
    #[error("cannot encode configuration: {0}")]
    ConfigEncode(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("{0}")]
    InvalidArgs(String),
}

impl CliError {
    /// Short error category printed before the cause.
    fn kind(&self) -> &'static str {
        match self {
            CliError::Generation(err) => match err.kind() {
                ErrorKind::Configuration => "configuration",
                ErrorKind::Io => "io",
            },
            CliError::Evaluation(err) => match err {
                EvalError::InvalidDataset(_) => "dataset",
                EvalError::Violations(_) => "violations",
                EvalError::Configuration(_) => "configuration",
                EvalError::Io(_) | EvalError::Csv(_) | EvalError::Json(_) => "io",
            },
            CliError::Core(_) | CliError::ConfigDecode(_) | CliError::ConfigEncode(_) => {
                "configuration"
            }
            CliError::Io(_) => "io",
            CliError::Logging(_) => "logging",
            CliError::InvalidArgs(_) => "usage",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "regiondata",
    version,
    about = "Synthetic Marrakech-Safi project and water point datasets"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate dataset files.
    Generate(GenerateArgs),
    /// Check a written dataset file against its schema and generation rules.
    Validate(ValidateArgs),
    /// Write the default configuration as TOML.
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DatasetArg {
    Projects,
    Water,
    All,
}

impl DatasetArg {
    fn kinds(self) -> Vec<DatasetKind> {
        match self {
            DatasetArg::Projects => vec![DatasetKind::Projects],
            DatasetArg::Water => vec![DatasetKind::Water],
            DatasetArg::All => DatasetKind::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DatasetKindArg {
    Projects,
    Water,
}

impl From<DatasetKindArg> for DatasetKind {
    fn from(value: DatasetKindArg) -> Self {
        match value {
            DatasetKindArg::Projects => DatasetKind::Projects,
            DatasetKindArg::Water => DatasetKind::Water,
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML configuration file. Built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset(s) to generate.
    #[arg(long, value_enum, default_value = "all")]
    dataset: DatasetArg,
    /// Run seed. Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Record count for every selected dataset.
    #[arg(long)]
    count: Option<u64>,
    /// Output directory. Overrides the configured one.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Write the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Append JSON log events to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Dataset family of the file.
    #[arg(long, value_enum)]
    dataset: DatasetKindArg,
    /// TOML configuration file. Built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Dataset file. Defaults to the configured output path.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Fail when any violation is found.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Maximum violations listed in the summary.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
    /// Print the report as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Destination file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    out: PathBuf,
    /// Replace an existing file.
    #[arg(long, default_value_t = false)]
    force: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error [{}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    init_logging(args.log_file.as_deref())?;

    let datasets = args.dataset.kinds();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args, &datasets);

    let mut engine = GenerationEngine::new(config);
    if let Some(path) = &args.report {
        engine = engine.with_report_path(path);
    }
    let result = engine.run(&datasets)?;

    for dataset in &result.report.datasets {
        println!(
            "{}: {} rows -> {}",
            dataset.dataset,
            dataset.rows_generated,
            dataset.path.display()
        );
    }
    println!("seed: {}", result.report.seed);
    if let Some(path) = &result.report_path {
        println!("report: {}", path.display());
    }
    Ok(())
}

fn apply_overrides(config: &mut GeneratorConfig, args: &GenerateArgs, datasets: &[DatasetKind]) {
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(out_dir) = &args.out_dir {
        config.out_dir = out_dir.clone();
    }
    if let Some(count) = args.count {
        for kind in datasets {
            match kind {
                DatasetKind::Projects => config.projects.count = count,
                DatasetKind::Water => config.water.count = count,
            }
        }
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    init_logging(None)?;

    let kind = DatasetKind::from(args.dataset);
    let config = load_config(args.config.as_deref())?;
    let engine = EvaluationEngine::new(
        config,
        EvaluateOptions {
            strict: args.strict,
            max_examples: args.max_examples,
        },
    );
    let path = args.file.unwrap_or_else(|| engine.default_path(kind));

    let report = engine.run(kind, &path)?;
    info!(
        dataset = %kind,
        path = %path.display(),
        rows = report.rows_checked,
        violations = report.violations_total,
        "dataset validated"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(EvalError::from)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    let config = GeneratorConfig::default();
    regiondata_core::validate_config(&config)?;
    save_config(&args.out, &config, args.force)?;
    println!("config: {}", args.out.display());
    Ok(())
}
