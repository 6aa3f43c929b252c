mod error;
mod model;
mod parser;
mod server;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "worker_log_parser", about = "Structured extraction from worker trace logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a log file and emit the structured JSON document
    Parse {
        /// Path to the worker trace log
        file: PathBuf,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Per-job summary table
    Stats {
        /// Path to the worker trace log
        file: PathBuf,
    },
    /// Serve the upload endpoint
    Serve {
        /// Listen address
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { file, output, pretty } => {
            let report = parser::parse_file(&file)?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Parsed {} jobs to {}", report.jobs.len(), path.display());
                }
                None => {
                    println!("{}", json);
                    // Keep stdout clean for piping; the count goes to stderr.
                    eprintln!("Parsed {} jobs", report.jobs.len());
                }
            }
            Ok(())
        }
        Commands::Stats { file } => {
            let report = parser::parse_file(&file)?;
            print_stats(&report);
            Ok(())
        }
        Commands::Serve { addr } => server::serve(&addr).await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        // stderr, so a slow `parse` run cannot trail the JSON on stdout
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_stats(report: &model::ParseReport) {
    println!(
        "{:>3} | {:<12} | {:<16} | {:>6} | {:>9} | {:>9}",
        "#", "Status", "Hotkey", "Found", "Delivered", "Incentive"
    );
    println!("{}", "-".repeat(72));

    for job in &report.jobs {
        let hotkey = truncate(job.client_hotkey.as_deref().unwrap_or("-"), 16);
        let found = job
            .stages
            .search
            .as_ref()
            .map(|s| s.videos_found.to_string())
            .unwrap_or_else(|| "-".into());
        let delivered = job
            .results
            .as_ref()
            .and_then(|r| Some((r.delivered_count?, r.requested_count?)))
            .map(|(d, r)| format!("{}/{}", d, r))
            .unwrap_or_else(|| "-".into());
        let incentive = job
            .incentive
            .as_ref()
            .and_then(|m| m.get("Incentive"))
            .map(|v| format!("{:.3}", v))
            .unwrap_or_else(|| "-".into());

        println!(
            "{:>3} | {:<12} | {:<16} | {:>6} | {:>9} | {:>9}",
            job.id,
            job.status.as_str(),
            hotkey,
            found,
            delivered,
            incentive
        );
    }

    println!(
        "\n{} jobs | {} unrecognized lines",
        report.jobs.len(),
        report.unrecognized_lines.len()
    );
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
