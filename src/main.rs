use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use meetload::cli::{Cli, OutputFormat};
use meetload::config::ConfigFile;
use meetload::{csv_output, ics, json_output, pipeline, text_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` forces debug level
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse the `--now` override, or take the current time
fn reference_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(value) => {
            let parsed = DateTime::parse_from_rfc3339(value)
                .with_context(|| format!("Invalid --now timestamp: {}", value))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    // Config file first, then command-line overrides
    let file_config = match &args.config {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigFile::default(),
    };
    let config = file_config.merge(args.config_overrides()).resolve()?;

    let now = reference_now(args.now.as_deref())?;

    let events = ics::parse_ics_file(&args.calendar, config.work_window.time_zone)
        .with_context(|| format!("Failed to load calendar {}", args.calendar.display()))?;

    let analysis = pipeline::analyze(&events, &config, now);

    match args.format {
        OutputFormat::Text => print!("{}", text_output::render(&analysis, &config)),
        OutputFormat::Json => {
            let output = json_output::JsonOutput::new(&analysis, &config);
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            print!("{}", csv_output::CsvReportOutput::new(&analysis).to_csv());
        }
    }

    Ok(())
}
