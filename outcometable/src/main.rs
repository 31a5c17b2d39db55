use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, warn};
use outcomecraft_core::present::{csv, html};
use outcomecraft_core::{DisplayOrder, ExtractionStrategy, OutcomesConfig, TableGenerator, batch};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "outcometable")]
#[command(about = "Render TriNetX outcome exports as manuscript-ready tables", long_about = None)]
#[command(version)]
struct Cli {
    /// Exported outcome files (csv, tsv, txt, xlsx, xls, ods)
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Move an outcome to the front; repeat to set the leading order
    #[arg(long, value_name = "NAME")]
    order: Vec<String>,

    /// Override the configured extraction strategy
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Emit HTML fragments without the document wrapper
    #[arg(long)]
    fragment: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// HTML tables for pasting into a manuscript
    Html,
    /// CSV blocks, one per outcome
    Csv,
    /// JSON records and per-file errors
    Json,
    /// Human-readable colored summary
    Human,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Locate the cohort header, then read at fixed offsets
    HeaderRelative,
    /// Use the configured header row without searching
    FixedOffset,
    /// Find each statistic by its section label
    LabelScan,
}

impl From<StrategyArg> for ExtractionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::HeaderRelative => ExtractionStrategy::HeaderRelative,
            StrategyArg::FixedOffset => ExtractionStrategy::FixedOffset,
            StrategyArg::LabelScan => ExtractionStrategy::LabelScan,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        OutcomesConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("outcometable.toml");
        if default_config_path.exists() {
            OutcomesConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            OutcomesConfig::default()
        }
    };

    if let Some(strategy) = cli.strategy {
        config.extraction.strategy = strategy.into();
    }

    config.validate().context("Invalid configuration")?;
    debug!(
        "extraction strategy: {}",
        config.extraction.strategy.as_str()
    );

    let generator = TableGenerator::with_config(config);
    let reports = generator.process_paths(&cli.files);
    let records = batch::records(&reports);

    let mut order = DisplayOrder::from_names(records.iter().map(|r| r.outcome_name.clone()));
    for (index, name) in cli.order.iter().enumerate() {
        if !order.move_name(name, index) {
            warn!("--order: no outcome named '{}'", name);
        }
    }
    let arranged = order.arrange(&records);

    let config = generator.config();
    let rendered = match cli.format {
        OutputFormat::Html if cli.fragment => arranged
            .iter()
            .map(|record| html::render_record(record, &config.format, &config.style))
            .collect::<String>(),
        OutputFormat::Html => html::render_document(
            arranged.iter().copied(),
            "Outcomes",
            &config.format,
            &config.style,
        ),
        OutputFormat::Csv => csv::export_csv(arranged.iter().copied(), &config.format)
            .context("Failed to write CSV")?,
        OutputFormat::Json => formatter::to_json(&arranged, &reports)?,
        OutputFormat::Human => formatter::render_human(&arranged, &reports, &config.format),
    };

    write_output(cli.output.as_ref(), &rendered)?;

    // Human output already lists failures inline
    if !matches!(cli.format, OutputFormat::Human | OutputFormat::Json) {
        formatter::report_failures(&reports);
    }

    let exit_code = if reports.iter().any(|r| r.outcome.is_err()) {
        1
    } else {
        0
    };

    std::process::exit(exit_code);
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")
        }
    }
}
