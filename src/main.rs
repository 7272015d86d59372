//! `flexpolyline` command-line tool.
//!
//! ```bash
//! echo "{(5); [(50.1022829, 8.6982122), (50.1020076, 8.6956695), ]}" | flexpolyline encode
//! echo "BFoz5xJ67i1B1B7P" | flexpolyline decode --format wkt
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use flexpolyline_rs::{Polyline, PolylineError};
use std::io::{BufRead, Write};
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "flexpolyline")]
#[command(about = "Encode and decode flexible polylines, one per line on stdin")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read `{(precision); [(lat, lng), ]}` lines and print encoded polylines
    Encode,
    /// Read encoded polylines and print them in the chosen format
    Decode {
        /// Print values with the precisions from the header instead of 15 decimals
        #[arg(long)]
        original_precision: bool,

        /// Output format for each decoded polyline
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Wkt,
    Geojson,
}

fn render(polyline: &Polyline, format: OutputFormat, original_precision: bool) -> String {
    match format {
        OutputFormat::Text if original_precision => polyline.to_string(),
        OutputFormat::Text => format!("{:.15}", polyline),
        OutputFormat::Json => polyline.to_keyed_json().to_string(),
        OutputFormat::Wkt => polyline.to_wkt(),
        OutputFormat::Geojson => polyline.to_geojson().to_string(),
    }
}

fn run<R: BufRead, W: Write>(
    command: &Command,
    input: R,
    out: &mut W,
) -> Result<usize, PolylineError> {
    let mut processed = 0;

    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|e| PolylineError::IoError(e.to_string()))?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let output = match command {
            Command::Encode => input.parse::<Polyline>().and_then(|p| p.encode()),
            Command::Decode {
                original_precision,
                format,
            } => Polyline::decode(input).map(|p| render(&p, *format, *original_precision)),
        }
        .inspect_err(|e| error!(line = number + 1, "{}", e))?;

        writeln!(out, "{}", output).map_err(|e| PolylineError::IoError(e.to_string()))?;
        processed += 1;
    }

    out.flush()
        .map_err(|e| PolylineError::IoError(e.to_string()))?;
    Ok(processed)
}

fn main() -> Result<(), PolylineError> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let processed = run(&args.command, stdin.lock(), &mut stdout.lock())?;
    debug!(processed, "done");
    Ok(())
}
