use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use perfcmp::cli::{Cli, OutputFormat};
use perfcmp::comparison::{run_comparison, ComparisonConfig};
use perfcmp::csv_output::CsvOutput;
use perfcmp::dataset::{resolve_labels, TabularDataset};
use perfcmp::json_output::JsonOutput;
use perfcmp::report::{prepare, ReportOptions, SortOrder};
use perfcmp::text_output::render_text;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; --verbose shows progress diagnostics
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Merge the optional config file with command-line overrides
fn load_config(args: &Cli) -> Result<ComparisonConfig> {
    let mut config = match &args.config {
        Some(path) => ComparisonConfig::from_file(path)?,
        None => ComparisonConfig::default(),
    };

    if args.invert {
        config.invert = true;
    }
    if let Some(min_conf) = args.min_conf {
        config.min_confidence = min_conf;
    }
    config.validate()?;

    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.verbose);

    let (before_path, after_path) = match args.input_files() {
        Ok(paths) => paths,
        Err(msg) => Cli::command()
            .error(clap::error::ErrorKind::MissingRequiredArgument, msg)
            .exit(),
    };

    let config = load_config(&args)?;

    let before = TabularDataset::from_file(&before_path)
        .with_context(|| format!("Failed to load 'before' results from {}", before_path.display()))?;
    let after = TabularDataset::from_file(&after_path)
        .with_context(|| format!("Failed to load 'after' results from {}", after_path.display()))?;

    let labels = resolve_labels(&before, &after, config.labels.as_deref())
        .context("Cannot name the test columns")?;

    let run = run_comparison(&before, &after, &labels, config.direction())
        .context("Comparison failed")?;

    let options = ReportOptions {
        sort: SortOrder::from_flags(args.reverse, args.unsorted),
        min_confidence: config.min_confidence,
        significant_only: args.significant,
    };
    let rows = prepare(&run.records, &options);

    if let Some(csv_path) = &args.csv {
        if let Err(e) = CsvOutput::new(&rows).write_to(csv_path) {
            eprintln!("Failed to open output file '{}': {}", csv_path.display(), e);
        }
    }

    match args.format {
        OutputFormat::Text => {
            print!(
                "{}",
                render_text(&args.test, &labels, &rows, &options, run.max_outliers_removed)
            );
        }
        OutputFormat::Json => {
            let output = JsonOutput::new(&args.test, &rows, &options, run.max_outliers_removed);
            println!("{}", output.to_json().context("Failed to serialize results")?);
        }
    }

    Ok(())
}
