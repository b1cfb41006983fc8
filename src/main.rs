//! fuzzy-suction
//!
//! Command-line interface for the vacuum suction controller.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use fuzzy_suction::config::{CliConfig, LogLevel, OutputFormat as ConfigFormat};
use fuzzy_suction::reference::{self, DIRT, INPUT_RANGE, SUCTION, SURFACE};
use fuzzy_suction::report;
use fuzzy_suction::ErrorResponse;

#[derive(Parser)]
#[command(name = "fuzzy-suction")]
#[command(version)]
#[command(about = "Recommend a vacuum suction level from surface difficulty and dirt level", long_about = None)]
struct Cli {
    /// Surface difficulty, 0 (easy) to 5 (difficult); prompted for if omitted
    #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
    surface: Option<f64>,

    /// Dirt level, 0 (light) to 5 (heavy); prompted for if omitted
    #[arg(long, value_name = "LEVEL", allow_negative_numbers = true)]
    dirt: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places in printed values
    #[arg(long, value_name = "N")]
    precision: Option<usize>,

    /// Print fuzzified inputs and rule firing strengths
    #[arg(long)]
    explain: bool,

    /// Chart membership curves with the inputs and output marked
    #[arg(long)]
    plot: bool,

    /// Accept readings outside the nominal 0-5 range
    #[arg(long = "allow-out-of-range")]
    allow_out_of_range: bool,

    /// Configuration file (defaults to the standard search path)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a default configuration file and exit
    #[arg(long = "print-config")]
    print_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Full inference session as JSON
    Json,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ConfigFormat::Text,
            OutputFormat::Json => ConfigFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", CliConfig::default_config_content());
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_tracing(config.general.log_level);
    tracing::debug!(
        format = config.general.format.as_str(),
        log_level = config.general.log_level.as_str(),
        strict_range = config.input.strict_range,
        "configuration loaded"
    );

    run(&cli, &config, &mut io::stdin().lock(), &mut io::stdout().lock())
}

/// Read the inputs, run the controller and write the answer to `out`
///
/// Missing readings are prompted for on `out` and read from `input`. In
/// JSON mode a failed inference is also written to `out` as an
/// [`ErrorResponse`] before the error is returned.
fn run(
    cli: &Cli,
    config: &CliConfig,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let engine = reference::engine().context("Failed to build the suction controller")?;

    let surface = match cli.surface {
        Some(v) => v,
        None => prompt("Surface difficulty (0-5): ", input, out)?,
    };
    let dirt = match cli.dirt {
        Some(v) => v,
        None => prompt("Dirt level (0-5): ", input, out)?,
    };

    if config.input.strict_range {
        check_range(SURFACE, surface)?;
        check_range(DIRT, dirt)?;
    }

    tracing::info!(surface, dirt, "computing suction");
    let precision = config.general.precision;

    let session = match reference::run(&engine, surface, dirt) {
        Ok(session) => session,
        Err(err) => {
            if config.general.format == ConfigFormat::Json {
                writeln!(out, "{}", ErrorResponse::from(&err).to_json())?;
            } else if let Some(hint) = err.hint() {
                eprintln!("Hint: {}", hint);
            }
            return Err(err).with_context(|| {
                format!("No suction recommendation for surface={} dirt={}", surface, dirt)
            });
        }
    };
    let suction = session
        .output(SUCTION)
        .context("Inference produced no suction value")?;

    match config.general.format {
        ConfigFormat::Text => {
            if cli.explain {
                write!(out, "{}", report::render_session(&engine, &session, precision))?;
            }
            writeln!(out, "{}", report::format_result(suction, precision))?;
            if cli.plot {
                writeln!(out)?;
                let chart = report::plot_session(
                    engine.inputs().chain(engine.outputs()),
                    &session,
                    config.plot.options(),
                );
                write!(out, "{}", chart)?;
            }
        }
        ConfigFormat::Json => {
            if cli.plot || cli.explain {
                tracing::warn!("--plot and --explain only apply to text output");
            }
            let json = session
                .to_json_pretty()
                .context("Failed to serialize the inference session")?;
            writeln!(out, "{}", json)?;
        }
    }

    Ok(())
}

/// File and environment settings, then command-line flags on top
fn load_config(cli: &Cli) -> Result<CliConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = CliConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?;
            config.apply_env_overrides();
            config
        }
        None => CliConfig::load().context("Failed to load configuration")?,
    };

    apply_cli(cli, &mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn apply_cli(cli: &Cli, config: &mut CliConfig) {
    if let Some(format) = cli.format {
        config.general.format = format.into();
    }
    if let Some(precision) = cli.precision {
        config.general.precision = precision;
    }
    if cli.allow_out_of_range {
        config.input.strict_range = false;
    }
    if cli.verbose {
        config.general.log_level = LogLevel::Verbose;
    }
    if cli.quiet {
        config.general.log_level = LogLevel::Quiet;
    }
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.filter_directive())),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn prompt(label: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<f64> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    if read == 0 {
        bail!("No value entered for '{}'", label.trim_end_matches(": "));
    }
    parse_reading(&line)
}

fn parse_reading(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .with_context(|| format!("'{}' is not a number", trimmed))?;
    if !value.is_finite() {
        bail!("'{}' is not a finite number", trimmed);
    }
    Ok(value)
}

fn check_range(name: &str, value: f64) -> Result<()> {
    let (min, max) = INPUT_RANGE;
    if !(min..=max).contains(&value) {
        bail!(
            "{} must be between {} and {}, got {} (use --allow-out-of-range to accept it)",
            name,
            min,
            max,
            value
        );
    }
    Ok(())
}
