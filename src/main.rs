// src/main.rs
mod extractors;
mod fetch;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use extractors::models::ResultSet;
use extractors::{ExtractOptions, ShortRowPolicy, TableExtractor};
use fetch::{client::DEFAULT_TIMEOUT_SECS, PageClient};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use utils::AppError;

/// Archived snapshot of Wikipedia's "List of countries by GDP (nominal)".
const DEFAULT_URL: &str = "https://web.archive.org/web/20230902185326/https:/en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29";

/// Scrapes the top rows of a GDP-by-country table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract Country / GDP_USD records from the page's third table
    Extract {
        /// Page to scrape
        #[arg(short, long, default_value = DEFAULT_URL)]
        url: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,

        /// Skip rows with too few cells instead of failing
        #[arg(long)]
        skip_short_rows: bool,
    },

    /// Print the onedrive_root value from the user config
    OnedriveRoot {
        /// Path to the YAML config file (relative paths are taken from the executable's directory)
        #[arg(short, long, default_value = utils::config::DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Print the square of a number
    Square {
        #[arg(allow_negative_numbers = true)]
        x: f64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Parsed args: {:?}", args);

    match args.command {
        Command::Extract {
            url,
            format,
            timeout_secs,
            skip_short_rows,
        } => {
            let options = ExtractOptions {
                short_rows: if skip_short_rows {
                    ShortRowPolicy::Skip
                } else {
                    ShortRowPolicy::Fail
                },
                ..ExtractOptions::default()
            };
            let client = PageClient::new(Duration::from_secs(timeout_secs))?;
            let extractor = TableExtractor::new(client, options);
            tracing::info!(
                "Extracting up to {} records from table {} of {}",
                extractor.options().max_records,
                extractor.options().table_index,
                url
            );

            let results = extractor.extract(&url).await?;
            if results.is_empty() {
                tracing::warn!("Table held no data rows before the first empty row");
            }

            write_results(&mut std::io::stdout().lock(), &results, format)?;
        }
        Command::OnedriveRoot { config } => {
            let root = utils::config::get_onedrive_root(&config)?;
            tracing::info!("Loaded onedrive_root from {}", config.display());
            writeln!(std::io::stdout().lock(), "{}", root)?;
        }
        Command::Square { x } => {
            writeln!(std::io::stdout().lock(), "{}", utils::math::square(x))?;
        }
    }

    Ok(())
}

/// Renders the result set in the requested format, one trailing newline.
fn write_results<W: Write>(
    out: &mut W,
    results: &ResultSet,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => writeln!(out, "{}", results)?,
        OutputFormat::Json => writeln!(out, "{}", results.to_json()?)?,
    }
    Ok(())
}
