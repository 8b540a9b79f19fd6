//! dirscope - An interactive disk usage explorer with TUI.
//!
//! Usage:
//!   dirscope [PATH]          Launch interactive TUI
//!   dirscope scan [PATH]     One-shot scan summary
//!   dirscope --help          Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use humansize::{BINARY, format_size};
use serde_json::json;

use dirscope_core::ScanOptions;
use dirscope_scan::Scanner;

#[derive(Parser)]
#[command(
    name = "dirscope",
    version,
    about = "An interactive disk usage explorer",
    long_about = "dirscope shows where the space in a directory goes.\n\n\
                  Launch the interactive TUI by running `dirscope [PATH]`, or use \
                  `dirscope scan` for a one-shot summary."
)]
struct Cli {
    /// Path to explore (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Show hidden entries
    #[arg(short = 'a', long)]
    all: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan once and print a size summary
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Number of top entries to show (0 = all)
        #[arg(short = 'n', long, default_value = "20")]
        top: usize,

        /// Include hidden entries
        #[arg(short = 'a', long)]
        all: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Scan {
            path,
            top,
            all,
            format,
        }) => {
            run_scan(&path, top, all, format)?;
        }
        None => {
            // Launch TUI
            let path = cli.path.canonicalize().context("Invalid path")?;
            let options = ScanOptions::builder()
                .root(path)
                .show_hidden(cli.all)
                .build()
                .context("Invalid scan options")?;
            dirscope_tui::run(options)?;
        }
    }

    Ok(())
}

/// Run a one-shot scan and print the aggregation, largest first.
fn run_scan(path: &PathBuf, top: usize, all: bool, format: OutputFormat) -> Result<()> {
    let path = path.canonicalize().context("Invalid path")?;

    let mut scanner = Scanner::new();
    let index = scanner
        .aggregate_sizes(&path)
        .map_err(|error| color_eyre::eyre::eyre!("{}", error.report()))?;
    let space = scanner.space_info(&path).ok();

    let mut rows: Vec<_> = index
        .sorted_by_size()
        .into_iter()
        .filter(|(child, _)| {
            all || child
                .file_name()
                .map(|name| !name.to_string_lossy().starts_with('.'))
                .unwrap_or(true)
        })
        .collect();
    if top > 0 {
        rows.truncate(top);
    }

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            println!(
                " {} - {}",
                path.display(),
                format_size(index.total_size(), BINARY)
            );
            if let Some(space) = &space {
                println!(
                    " volume: {} free of {}",
                    format_size(space.available, BINARY),
                    format_size(space.capacity, BINARY)
                );
            }
            println!("{}", "─".repeat(60));

            for (child, stats) in rows {
                let name = child
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| child.display().to_string());
                let marker = if stats.is_directory { "/" } else { "" };
                println!(
                    " {:>10}  {:>8}  {}{}",
                    format_size(stats.size, BINARY),
                    stats.count,
                    name,
                    marker
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = rows
                .iter()
                .map(|(child, stats)| {
                    json!({
                        "path": child,
                        "is_directory": stats.is_directory,
                        "size": stats.size,
                        "count": stats.count,
                    })
                })
                .collect();
            let report = json!({
                "root": path,
                "total_size": index.total_size(),
                "volume": space.map(|space| json!({
                    "capacity": space.capacity,
                    "free": space.free,
                    "available": space.available,
                })),
                "entries": entries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
