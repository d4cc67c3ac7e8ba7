mod engine;
mod fees;
mod models;
mod rates;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::Path;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::CommissionEngine;
use crate::rates::{ExchangeRates, HttpRateSource};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: commission-engine [input].csv [log_level:optional]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];

    if !Path::new(path).is_file() {
        eprintln!("Error: File not found - {path}");
        exit(1);
    }

    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let rates = Arc::new(ExchangeRates::new(HttpRateSource::default()));
    let mut engine = CommissionEngine::new(rates);

    let timer = Instant::now();
    let fees = engine.run(path).await?;
    let duration = timer.elapsed();

    info!("Processed {} transactions in: {duration:?}", fees.len());

    write_fees_to_stdout(&fees)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // Fees go to stdout, so all logging is routed to stderr.
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_fees_to_stdout(fees: &[String]) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    for fee in fees {
        writeln!(output, "{fee}")?;
    }

    output.flush()?;

    Ok(())
}
