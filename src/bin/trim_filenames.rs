//! # Filename Trimmer - Entry Point
//!
//! Punto di ingresso del tool di trimming dei nomi file.
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, numero di caratteri, flags)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Valida che la directory esista
//! 4. Crea la configurazione e avvia il trimmer
//! 5. Exit code 0 se nessun file è fallito, 1 altrimenti
//!
//! ## Esempio di utilizzo:
//! ```bash
//! trim-filenames /path/to/library --chars 4 --dry-run
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use media_library_tools::{FilenameTrimmer, TrimConfig};

#[derive(Parser)]
#[command(name = "trim-filenames")]
#[command(about = "Remove a fixed number of leading characters from every filename under a directory")]
struct Args {
    /// Directory containing files to rename
    #[arg(env = "TRIM_FILENAMES_DIR")]
    directory: PathBuf,

    /// Number of leading characters to remove from each filename
    #[arg(short, long)]
    chars: usize,

    /// Minimum characters the trimmed name must keep before the extension
    #[arg(long, default_value = "3")]
    min_stem: usize,

    /// Dry run - don't actually rename files
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

    let config = TrimConfig {
        chars_to_trim: args.chars,
        min_stem_chars: args.min_stem,
        dry_run: args.dry_run,
    };

    let trimmer = FilenameTrimmer::new(config)?;
    let stats = trimmer.run(&args.directory)?;

    if stats.had_failures() {
        std::process::exit(1);
    }

    Ok(())
}
