//! Main entry point for the mediazip CLI application.
//!
//! This binary fetches media from local paths and HTTP URLs and packs them
//! into a single store-only ZIP archive.

use std::path::Path;
use std::time::SystemTime;

use anyhow::{Result, bail};
use clap::Parser;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use mediazip::io::{is_http_url, write_output};
use mediazip::policy::default_archive_name;
use mediazip::{ArchiveEncoder, ArchiveSummary, AutoSource, Cli, Collection, DosDateTime, HttpSource, collect};

/// Application entry point.
///
/// Collects every source, encodes the archive and writes it to a file or
/// stdout.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let http = HttpSource::new()?.with_max_retry(cli.retries);
    let source = AutoSource::new(http);

    let items = cli.items();
    let collection = collect(&source, &items, &cli.policy(), &cli.collect_options()).await?;

    if !cli.is_very_quiet() {
        for failure in &collection.failures {
            eprintln!("Skipping: {} ({})", failure.location, failure.error);
        }
    }
    if collection.all_failed() {
        bail!("All downloads failed");
    }

    let last_mod = match cli.timestamp {
        Some(timestamp) => DosDateTime::from_datetime(timestamp),
        None => DosDateTime::now(),
    };
    let bytes = ArchiveEncoder::new(last_mod).encode(&collection.files)?;

    if cli.pipe {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_archive_name(SystemTime::now()));
    write_output(Path::new(&output), &bytes, cli.force).await?;

    if !cli.is_quiet() {
        for name in collection.files.names() {
            println!("  adding: {name}");
        }
    }

    if cli.list {
        let summary = ArchiveSummary::new(&collection.files, last_mod, bytes.len() as u64);
        list_files(&summary);
    }

    if !cli.is_quiet() {
        report_totals(&cli, &source, &collection, &output, bytes.len() as u64);
    }

    Ok(())
}

/// Print a table of the packed entries with sizes and the shared timestamp.
fn list_files(summary: &ArchiveSummary) {
    let (year, month, day) = summary.last_mod.calendar_date();
    let (hour, minute, _second) = summary.last_mod.clock_time();

    println!(
        "{:>10}  {:>8}  {:>10}  {:>5}  Name",
        "Length", "CRC-32", "Date", "Time"
    );
    println!("{}", "-".repeat(60));

    for entry in &summary.entries {
        println!(
            "{:>10}  {:08x}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            entry.size, entry.crc32, year, month, day, hour, minute, entry.file_name
        );
    }

    println!("{}", "-".repeat(60));
    println!(
        "{:>10}  {:>30}  {} files",
        summary.stored_bytes(),
        "",
        summary.total_files()
    );
}

/// Print the final one-line report, plus network usage when URLs were fetched.
fn report_totals(cli: &Cli, source: &AutoSource, collection: &Collection, output: &str, size: u64) {
    eprintln!(
        "\n{}: {} of {} files, {}",
        output,
        collection.successful(),
        cli.sources.len(),
        format_size(size)
    );

    if cli.sources.iter().any(|s| is_http_url(s)) {
        eprintln!(
            "Total bytes transferred: {}",
            format_size(source.http().transferred_bytes())
        );
    }
}

/// Format a byte size into a human-readable string.
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
