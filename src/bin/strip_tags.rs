//! # Metadata Stripper - Entry Point
//!
//! Punto di ingresso del tool di rimozione dei metadati audio.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! strip-tags /path/to/music --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use media_library_tools::{MetadataStripper, StripConfig};

#[derive(Parser)]
#[command(name = "strip-tags")]
#[command(about = "Remove embedded metadata tags from every audio file under a directory")]
struct Args {
    /// Directory containing audio files to strip
    #[arg(env = "STRIP_TAGS_DIR")]
    directory: PathBuf,

    /// Dry run - report files that carry tags without rewriting them
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    if !args.directory.exists() {
        return Err(anyhow::anyhow!(
            "Directory does not exist: {}",
            args.directory.display()
        ));
    }
    if !args.directory.is_dir() {
        return Err(anyhow::anyhow!(
            "Not a directory: {}",
            args.directory.display()
        ));
    }

    let stripper = MetadataStripper::new(StripConfig {
        dry_run: args.dry_run,
    });
    let stats = stripper.run(&args.directory)?;

    if stats.had_failures() {
        std::process::exit(1);
    }

    Ok(())
}
