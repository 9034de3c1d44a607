//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MaintainError` enum per categorizzare gli errori per-file
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `Tag`: Errori di parsing/scrittura dei tag audio
//! - `Archive`: Errori di lettura/scrittura degli archivi zip
//! - `Image`: Errori di decodifica/ricodifica delle immagini
//! - `ArchiveValidation`: Archivio ricostruito non valido
//! - `BackupExists`: Il file di backup esiste già
//!
//! Gli errori per-file non interrompono la scansione: vengono loggati,
//! contati in `RunStats`, e il run prosegue con il file successivo.

use std::path::PathBuf;

/// Custom error types for per-file maintenance operations
#[derive(thiserror::Error, Debug)]
pub enum MaintainError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio tag error: {0}")]
    Tag(#[from] lofty::LoftyError),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to remove {tag_type:?} tag from {path:?}")]
    TagRemoval {
        tag_type: lofty::TagType,
        path: PathBuf,
    },

    #[error("Rebuilt archive failed validation: {0}")]
    ArchiveValidation(String),

    #[error("Backup target already exists: {0}")]
    BackupExists(PathBuf),
}
