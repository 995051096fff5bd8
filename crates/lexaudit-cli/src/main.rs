use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lexaudit_core::report::{render_report, OutputFormat};
use lexaudit_core::{catalogue, Analyzer, DefaultAnalyzer, GradeThresholds, Scope, Trigger};
use tracing_subscriber::EnvFilter;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "lexaudit", author, version, about = "Legal letter risk auditor CLI")]
struct Cli {
    /// Optional settings file (TOML) overriding grade thresholds
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Output format for scan reports
    #[arg(long, value_enum, default_value_t = Format::Human, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan letter text from a file, or stdin when no file is given
    Scan { file: Option<PathBuf> },
    /// List the built-in rule catalogue
    ListRules {
        /// Emit rules as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Human,
    Json,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = settings::load(cli.config.as_deref())?;
    match cli.command.unwrap_or(Commands::Scan { file: None }) {
        Commands::Scan { file } => scan(file.as_deref(), cli.format, &settings),
        Commands::ListRules { json } => list_rules(json),
    }
}

fn scan(file: Option<&Path>, format: Format, settings: &settings::Settings) -> Result<()> {
    let input = read_input(file)?;
    tracing::debug!(input_len = input.len(), "letter text loaded");
    let thresholds = settings
        .thresholds
        .clone()
        .map(|t| GradeThresholds {
            medium: t.medium,
            high: t.high,
        })
        .unwrap_or_default();
    let analyzer = DefaultAnalyzer::with_config(catalogue::builtin().to_vec(), thresholds)
        .context("failed to compile rule catalogue")?;
    let report = analyzer.analyze(&input);
    let format = match format {
        Format::Human => OutputFormat::Human,
        Format::Json => OutputFormat::Json,
    };
    print!("{}", render_report(&report, format)?);
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read letter from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read letter from stdin")?;
            Ok(buffer)
        }
    }
}

fn list_rules(json: bool) -> Result<()> {
    let rules = catalogue::builtin();
    if json {
        println!("{}", serde_json::to_string_pretty(rules)?);
        return Ok(());
    }

    println!("{} rule(s) in the built-in catalogue", rules.len());
    for rule in rules {
        let trigger = match &rule.trigger {
            Trigger::Keywords { .. } => "keywords",
            Trigger::Pattern { .. } => "pattern",
        };
        let scope = match rule.scope {
            Scope::Sentence => "sentence",
            Scope::Document => "document",
        };
        println!(
            "- {id:<22} [{trigger:8}] {severity:?}/{category} ({scope}) :: {kind}",
            id = rule.id,
            trigger = trigger,
            severity = rule.severity,
            category = rule.category,
            scope = scope,
            kind = rule.kind,
        );
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
