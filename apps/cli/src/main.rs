//! # param-validate
//!
//! Validates a JSON document against a rule schema and prints the errors.
//!
//! Exit codes: `0` when the document is valid, `1` when fields fail, `2`
//! when the schema or the inputs cannot be used.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use param_validator::{Messages, Schema, ValidationFailed, Validator, ValidatorConfig};
use serde_json::Value;
use tracing::debug;

/// Rule-schema validation for JSON documents.
#[derive(Parser, Debug)]
#[command(name = "param-validate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a rule schema.
    Check(CheckArgs),
    /// List the available check names.
    Checks,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Rule schema (JSON object of field → rule).
    #[arg(short, long)]
    rules: PathBuf,

    /// Document to validate; `-` reads standard input.
    #[arg(short, long, default_value = "-")]
    data: PathBuf,

    /// Per-call message overrides keyed `field.check`.
    #[arg(short, long)]
    messages: Option<PathBuf>,

    /// Validator configuration (`messages`, `indexArrayPaths`).
    #[arg(short, long, env = "PARAM_VALIDATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Report array elements as `field[i]`.
    #[arg(long)]
    index_array_paths: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// One `[field] code: message` line per error.
    Text,
    /// The `422` response body.
    Json,
}

fn read_json(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read standard input")?;
        text
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn check(args: CheckArgs) -> Result<ExitCode> {
    let mut config: ValidatorConfig = match &args.config {
        Some(path) => serde_json::from_value(read_json(path)?)
            .with_context(|| format!("invalid configuration in {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    config.index_array_paths |= args.index_array_paths;

    let rules = &args.rules;
    let schema = Schema::from_value(&read_json(rules)?)
        .with_context(|| format!("invalid rule schema in {}", rules.display()))?;
    let messages: Option<Messages> = match &args.messages {
        Some(path) => {
            let context = format!("messages in {} must be a string map", path.display());
            Some(serde_json::from_value(read_json(path)?).context(context)?)
        }
        None => None,
    };
    let data = read_json(&args.data)?;

    let validator = Validator::with_config(config);
    let compiled = validator.compile(&schema)?;
    debug!(fields = compiled.len(), "compiled rule schema");

    let Some(errors) = validator.validate_compiled(&data, &compiled, messages.as_ref()) else {
        if args.format == Format::Json {
            println!("null");
        }
        return Ok(ExitCode::SUCCESS);
    };

    match args.format {
        Format::Text => {
            for error in &errors {
                println!("{error}");
            }
        }
        Format::Json => {
            let body = ValidationFailed::from(errors);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(ExitCode::from(1))
}

fn list_checks() {
    let validator = Validator::new();
    for name in validator.registry().names() {
        println!("{name}");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check(args) => check(args),
        Commands::Checks => {
            list_checks();
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|err| {
        eprintln!("error: {err:#}");
        ExitCode::from(2)
    })
}
