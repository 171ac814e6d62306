//! TrendMark CLI — download, enrich, and trend-label commands.
//!
//! Commands:
//! - `download` — fetch candle history from CryptoCompare into a dated file
//! - `enrich` — compute indicator columns for a candle file
//! - `label` — label an enriched file (TOML config and/or flags)
//! - `run` — enrich and label a candle file in one pass
//! - `column` — print one column of a delimited file
//! - `manifest` — show the manifest written next to a label file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendmark_core::domain::TrendLabel;
use trendmark_runner::config::delimiter_byte;
use trendmark_runner::{
    download_to_file, enrich, label_candles, label_file, manifest_path, read_candles, read_column,
    read_manifest, write_enriched, CryptoCompareProvider, HistoRequest, Interval, LabelConfig,
    LabelReport, OutputConfig,
};

#[derive(Parser)]
#[command(
    name = "trendmark",
    about = "TrendMark CLI — trend labels and trading signals for crypto candle histories"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download candle history from CryptoCompare.
    Download {
        /// Base currency symbol.
        #[arg(long, default_value = "BTC")]
        from: String,

        /// Quote currency symbol.
        #[arg(long, default_value = "USD")]
        to: String,

        /// Exchange name.
        #[arg(long, default_value = "Bitstamp")]
        exchange: String,

        /// Candle interval: minute, hour or day.
        #[arg(long, default_value = "day")]
        interval: Interval,

        /// Maximum datapoints requested.
        #[arg(long, default_value_t = 2000)]
        limit: u32,

        /// Directory for the dated candle file.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Compute indicator columns for a candle file.
    Enrich {
        /// Candle file (datetime;low;high;open;close;volumefrom;volumeto).
        #[arg(long)]
        input: PathBuf,

        /// Enriched output file.
        #[arg(long, default_value = "trends.csv")]
        output: PathBuf,
    },
    /// Label an enriched file and write trend labels with trading signals.
    Label {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enriched input file (overrides the config).
        #[arg(long)]
        input: Option<PathBuf>,

        /// Label output file (overrides the config).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip writing the JSON manifest.
        #[arg(long, default_value_t = false)]
        no_manifest: bool,
    },
    /// Enrich and label a candle file without writing the enriched table.
    Run {
        /// Candle file.
        #[arg(long)]
        input: PathBuf,

        /// Label output file.
        #[arg(long, default_value = "labels.csv")]
        output: PathBuf,

        /// Skip writing the JSON manifest.
        #[arg(long, default_value_t = false)]
        no_manifest: bool,
    },
    /// Show the manifest of a previous labeling run.
    Manifest {
        /// Label file the manifest was written next to.
        #[arg(long, default_value = "labels.csv")]
        output: PathBuf,
    },
    /// Print a single column of a delimited file.
    Column {
        /// Input file.
        #[arg(long)]
        input: PathBuf,

        /// Column header name.
        #[arg(long)]
        name: String,

        /// Field delimiter.
        #[arg(long, default_value = ";")]
        delimiter: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendmark=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            from,
            to,
            exchange,
            interval,
            limit,
            output_dir,
        } => {
            let request = HistoRequest {
                from_symbol: from,
                to_symbol: to,
                exchange,
                interval,
                limit,
            };
            run_download(&request, output_dir)
        }
        Commands::Enrich { input, output } => run_enrich(input, output),
        Commands::Label {
            config,
            input,
            output,
            no_manifest,
        } => run_label(config, input, output, no_manifest),
        Commands::Run {
            input,
            output,
            no_manifest,
        } => run_pipeline(input, output, no_manifest),
        Commands::Manifest { output } => run_manifest(&output),
        Commands::Column {
            input,
            name,
            delimiter,
        } => run_column(input, &name, &delimiter),
    }
}

fn run_download(request: &HistoRequest, output_dir: PathBuf) -> Result<()> {
    if request.limit == 0 {
        bail!("--limit must be at least 1");
    }

    println!(
        "Downloading {} trading data for {} {} from {}",
        request.interval, request.from_symbol, request.to_symbol, request.exchange
    );

    let provider = CryptoCompareProvider::new();
    let today = chrono::Utc::now().date_naive();
    let summary = download_to_file(&provider, request, &output_dir, today, b';')
        .with_context(|| format!("download failed for {}", request.pair()))?;

    println!("Filtering {} empty datapoints", summary.filtered);
    println!("Saving data to {}", summary.path.display());
    println!("Rows: {}", summary.saved);
    Ok(())
}

fn run_enrich(input: PathBuf, output: PathBuf) -> Result<()> {
    let candles = read_candles(&input, b';')
        .with_context(|| format!("failed to read candles from {}", input.display()))?;
    if candles.is_empty() {
        bail!("{} contains no candles", input.display());
    }

    let table = enrich(candles);
    write_enriched(&output, b';', &table)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Enriched {} rows with {} columns", table.len(), table.columns().len());
    println!("Saved to {}", output.display());
    Ok(())
}

fn run_label(
    config_path: Option<PathBuf>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    no_manifest: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => LabelConfig::from_file(&path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LabelConfig::default(),
    };
    if let Some(input) = input {
        config.input.path = input;
    }
    if let Some(output) = output {
        config.output.path = output;
    }
    if no_manifest {
        config.output.write_manifest = false;
    }

    let report = label_file(&config)?;
    print_summary(&config.input.path, &report);
    Ok(())
}

fn run_pipeline(input: PathBuf, output: PathBuf, no_manifest: bool) -> Result<()> {
    let candles = read_candles(&input, b';')
        .with_context(|| format!("failed to read candles from {}", input.display()))?;

    let output_config = OutputConfig {
        path: output,
        write_manifest: !no_manifest,
        ..OutputConfig::default()
    };
    let report = label_candles(candles, &input, &output_config)?;
    print_summary(&input, &report);
    Ok(())
}

fn run_manifest(output: &Path) -> Result<()> {
    let path = manifest_path(output);
    let manifest = read_manifest(&path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;

    println!();
    println!("=== Labeling Manifest ===");
    println!("Schema:         v{}", manifest.schema_version);
    println!("Created:        {}", manifest.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Input:          {}", manifest.input);
    println!("Output:         {}", manifest.output);
    println!("Rows:           {}", manifest.row_count);
    println!("Columns:        {}", manifest.columns.join(", "));
    println!(
        "Trends:         up {} / down {} / no {}",
        manifest.counts.up, manifest.counts.down, manifest.counts.no
    );
    println!("Dataset hash:   {}", manifest.dataset_hash);
    println!();
    Ok(())
}

fn run_column(input: PathBuf, name: &str, delimiter: &str) -> Result<()> {
    let delimiter = delimiter_byte(delimiter)?;
    let values = read_column(&input, delimiter, name)
        .with_context(|| format!("failed to read column '{name}' from {}", input.display()))?;

    println!("{name}");
    for value in &values {
        println!("{value}");
    }
    println!("({} rows)", values.len());
    Ok(())
}

fn print_summary(input: &Path, report: &LabelReport) {
    let counts = report.counts;
    let pct = |n: usize| {
        if report.rows == 0 {
            0.0
        } else {
            100.0 * n as f64 / report.rows as f64
        }
    };

    println!();
    println!("=== Labeling Result ===");
    println!("Input:          {}", input.display());
    println!("Output:         {}", report.output.display());
    println!("Rows:           {}", report.rows);
    println!();
    println!("--- Trends ---");
    for (label, n) in [
        (TrendLabel::Up, counts.up),
        (TrendLabel::Down, counts.down),
        (TrendLabel::Flat, counts.no),
    ] {
        println!("{:<15} {:>6} ({:.1}%)", format!("{}:", label.as_token()), n, pct(n));
    }
    println!();
    println!("Dataset hash:   {}", report.dataset_hash);
    if let Some(manifest) = &report.manifest {
        println!("Manifest:       {}", manifest.display());
    }
    println!();
}
