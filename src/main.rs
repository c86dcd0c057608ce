//! jagkit CLI - Command-line tool for JAG archive extraction.
//!
//! This is the main entry point for the jagkit command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use jagkit::prelude::*;

/// jagkit - JAG archive extraction tool
#[derive(Parser)]
#[command(name = "jagkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Decode with the historical off-by-one bounds and inclusive slices
    #[arg(long, global = true)]
    legacy: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract entries from an archive
    Extract {
        /// Path to the archive
        #[arg(short, long, env = "JAGKIT_INPUT")]
        input: PathBuf,

        /// Directory to extract the entries to
        #[arg(short, long, env = "JAGKIT_DESTINATION", default_value = ".")]
        destination: PathBuf,

        /// Entry names to extract (space separated); all entries if omitted
        #[arg(short = 'e', long = "extract", value_delimiter = ' ', num_args = 1..)]
        entries: Vec<String>,
    },

    /// List contents of an archive
    List {
        /// Path to the archive
        #[arg(short, long, env = "JAGKIT_INPUT")]
        input: PathBuf,

        /// Show entry sizes
        #[arg(short = 'l', long)]
        detailed: bool,
    },

    /// Print the archive key for entry names
    Hash {
        /// Entry names
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = if cli.legacy {
        LoadOptions::legacy()
    } else {
        LoadOptions::new()
    };

    match cli.command {
        Commands::Extract {
            input,
            destination,
            entries,
        } => {
            cmd_extract(&input, &destination, &entries, &options)?;
        }
        Commands::List { input, detailed } => {
            cmd_list(&input, detailed, &options)?;
        }
        Commands::Hash { names } => {
            cmd_hash(&names);
        }
    }

    Ok(())
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Path, options: &LoadOptions) -> Result<Archive> {
    println!("Opening archive: {}", input.display());

    let start = Instant::now();
    let archive = Archive::load(&FileSource::new(input), options)
        .with_context(|| format!("Failed to load archive {}", input.display()))?;

    println!("Loaded {} entries in {:?}", archive.len(), start.elapsed());

    Ok(archive)
}

/// Pair every entry to extract with its output path.
///
/// Without names every entry is written under its table index. With names,
/// all of them must resolve before anything is written.
fn resolve_outputs<'a>(
    archive: &'a Archive,
    destination: &Path,
    names: &[String],
) -> Result<Vec<(PathBuf, &'a [u8])>> {
    let names: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        return Ok(archive
            .enumerate()
            .map(|(i, e)| (destination.join(i.to_string()), e.data()))
            .collect());
    }

    names
        .into_iter()
        .map(|name| -> Result<(PathBuf, &'a [u8])> {
            let data = archive
                .require(name)
                .with_context(|| format!("Failed to find entry: {name}"))?;
            Ok((destination.join(name), data))
        })
        .collect()
}

fn cmd_extract(
    input: &Path,
    destination: &Path,
    names: &[String],
    options: &LoadOptions,
) -> Result<()> {
    let archive = load(input, options)?;
    let outputs = resolve_outputs(&archive, destination, names)?;

    println!("Extracting {} entries...", outputs.len());

    let pb = ProgressBar::new(outputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    fs::create_dir_all(destination).with_context(|| {
        format!("Failed to create destination {}", destination.display())
    })?;

    let start = Instant::now();
    for (path, data) in &outputs {
        debug!(path = %path.display(), size = data.len(), "writing entry");
        fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Extraction completed in {:?}", start.elapsed());

    Ok(())
}

fn cmd_list(input: &Path, detailed: bool, options: &LoadOptions) -> Result<()> {
    let archive = load(input, options)?;

    for (index, entry) in archive.enumerate() {
        if detailed {
            println!("{:>5} {:#010x} {:>10}", index, entry.hash(), entry.len());
        } else {
            println!("{:>5} {:#010x}", index, entry.hash());
        }
    }

    println!("\nTotal: {} entries", archive.len());

    Ok(())
}

fn cmd_hash(names: &[String]) {
    for name in names {
        println!("{:#010x} {}", hash_name(name), name);
    }
}
