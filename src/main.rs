// Copyright 2026 JobLens Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use joblens::capture::{self, JobRecord};
use joblens::config::Config;
use joblens::detect::{DetectionOutput, Field, FieldDetector};
use joblens::document::SourceDocument;
use joblens::fetch::PageFetcher;
use joblens::sink::AirtableSink;
use std::io::Read;

#[derive(Parser)]
#[command(
    name = "joblens",
    about = "JobLens — detect job-posting fields on any page and file them into your tracker",
    version,
    after_help = "Run 'joblens <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect job-posting fields from a URL, a file, or stdin ("-")
    Detect {
        /// Page URL, path to an HTML file, or "-" for stdin
        source: String,
        /// Page URL to attribute to file/stdin input (enables site selectors
        /// and hostname fallback)
        #[arg(long)]
        page_url: Option<String>,
    },
    /// Detect fields and create a record in the configured tracker
    Capture {
        /// Page URL, path to an HTML file, or "-" for stdin
        source: String,
        /// Page URL to attribute to file/stdin input
        #[arg(long)]
        page_url: Option<String>,
        /// Detect and print the record without submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "joblens=debug" } else { "joblens=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Detect { source, page_url } => {
            let (output, _url) = detect_source(&config, &source, page_url.as_deref()).await?;
            render(&output, cli.json);
            Ok(())
        }
        Commands::Capture {
            source,
            page_url,
            dry_run,
        } => {
            let (output, url) = detect_source(&config, &source, page_url.as_deref()).await?;
            let record = JobRecord::new(&output, url.unwrap_or_default());

            if dry_run {
                println!("{}", serde_json::to_string_pretty(&record.fields())?);
                return Ok(());
            }

            let sink_config = config.require_sink()?;
            let sink = AirtableSink::new(
                sink_config.api_key.clone(),
                sink_config.base_id.clone(),
                sink_config.table.clone(),
            );
            let created = capture::submit(&sink, &record).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "recordId": created.record_id }));
            } else {
                println!("Created record {}", created.record_id);
            }
            Ok(())
        }
    }
}

/// Resolve the input source to HTML + page URL, then run detection.
///
/// `scraper` types are !Send, so the synchronous detector runs inside
/// `spawn_blocking`.
async fn detect_source(
    config: &Config,
    source: &str,
    page_url: Option<&str>,
) -> Result<(DetectionOutput, Option<String>)> {
    let (html, url) = if source.starts_with("http://") || source.starts_with("https://") {
        let fetcher = PageFetcher::new(config.fetch_timeout_ms);
        let page = fetcher.fetch(source).await?;
        (page.body, Some(page.final_url))
    } else if source == "-" {
        let mut html = String::new();
        std::io::stdin()
            .read_to_string(&mut html)
            .context("cannot read HTML from stdin")?;
        (html, page_url.map(String::from))
    } else {
        let html = std::fs::read_to_string(source)
            .with_context(|| format!("cannot read HTML file {source}"))?;
        (html, page_url.map(String::from))
    };

    let tuning = config.tuning.clone();
    let final_url = url.clone();
    let output = tokio::task::spawn_blocking(move || {
        let doc = SourceDocument::parse(&html, url.as_deref());
        FieldDetector::with_tuning(tuning).detect(&doc)
    })
    .await
    .context("detection task failed")?;

    Ok((output, final_url))
}

/// Human-readable field table, or the raw maps with `--json`.
fn render(output: &DetectionOutput, json: bool) {
    if json {
        match serde_json::to_string_pretty(output) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("cannot serialize output: {e}"),
        }
        return;
    }

    for field in Field::ALL {
        let value = output.value(field);
        let band = output.band(field).label();
        let source = output.source(field);
        if value.is_empty() {
            println!("{:<12} (not detected)", field.key());
        } else {
            println!("{:<12} {value}  [{band}, {source}]", field.key());
        }
    }
}
