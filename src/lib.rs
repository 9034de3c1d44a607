//! # Media Library Tools
//!
//! Questo è il modulo principale della libreria che espone le API dei tre
//! tool di manutenzione.
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom per le operazioni per-file
//! - `file_manager`: Discovery dei file e utilità sui path
//! - `progress`: Progress tracking e statistiche di run
//! - `name_trimmer`: Rimozione di caratteri iniziali dai nomi dei file
//! - `tag_stripper`: Rimozione dei metadati dai file audio
//! - `archive_optimizer`: Ricompressione degli archivi CBZ
//!
//! I tre tool sono indipendenti: ognuno ha il proprio binario, nessuno
//! consuma l'output di un altro. Il flusso condiviso è sempre lo stesso:
//! enumerazione dei file, trasformazione per-file, statistiche, summary.
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use media_library_tools::{ArchiveConfig, ArchiveOptimizer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let optimizer = ArchiveOptimizer::new(ArchiveConfig::default())?;
//! let stats = optimizer.run(std::path::Path::new("/comics"))?;
//! println!("{}", stats.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod archive_optimizer;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod name_trimmer;
pub mod progress;
pub mod tag_stripper;

pub use archive_optimizer::{ArchiveOptimizer, ArchiveOutcome};
pub use config::{ArchiveConfig, StripConfig, TrimConfig};
pub use error::MaintainError;
pub use file_manager::FileManager;
pub use name_trimmer::{FilenameTrimmer, SkipReason, TrimOutcome};
pub use progress::{ProgressManager, RunStats};
pub use tag_stripper::{MetadataStripper, StripOutcome};
