//! # Archive Optimizer - Entry Point
//!
//! Punto di ingresso del tool di ricompressione degli archivi CBZ.
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI
//! 2. Carica la configurazione da file JSON se richiesto, poi applica i
//!    flag espliciti della command line
//! 3. Valida la directory e avvia l'optimizer
//!
//! ## Esempio di utilizzo:
//! ```bash
//! optimize-cbz /path/to/comics --quality 75 --max-height 1600 --backup
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use media_library_tools::{ArchiveConfig, ArchiveOptimizer};

#[derive(Parser)]
#[command(name = "optimize-cbz")]
#[command(about = "Recompress comic archives, replacing each one only when the rebuild is smaller")]
struct Args {
    /// Directory containing comic archives to optimize
    #[arg(env = "OPTIMIZE_CBZ_DIR")]
    directory: PathBuf,

    /// JPEG quality (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Maximum page height in pixels (taller pages are scaled down)
    #[arg(long)]
    max_height: Option<u32>,

    /// Size threshold (replace if new size < original * threshold)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Keep a copy of each original archive as <name>_original.cbz
    #[arg(long)]
    backup: bool,

    /// Load configuration from a JSON file (explicit flags still win)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dry run - rebuild and report savings, but never replace files
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

    let mut config = match args.config {
        Some(ref path) => ArchiveConfig::from_file(path)?,
        None => ArchiveConfig::default(),
    };

    if let Some(quality) = args.quality {
        config.jpeg_quality = quality;
    }
    if let Some(max_height) = args.max_height {
        config.max_height = max_height;
    }
    if let Some(threshold) = args.threshold {
        config.size_threshold = threshold;
    }
    config.keep_backup |= args.backup;
    config.dry_run |= args.dry_run;

    let optimizer = ArchiveOptimizer::new(config)?;
    let stats = optimizer.run(&args.directory)?;

    if stats.had_failures() {
        std::process::exit(1);
    }

    Ok(())
}
