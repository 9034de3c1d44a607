//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file e le utilità condivise
//! sui path.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file sotto una root directory
//! - Determinazione del tipo di file per estensione (audio, archivio)
//! - Riconoscimento delle entry immagine dentro gli archivi
//! - Formattazione human-readable delle dimensioni
//!
//! ## Formati riconosciuti:
//! - **Audio**: MP3, M4A, FLAC, OGG, WAV
//! - **Archivi**: CBZ
//! - **Entry immagine**: PNG, JPG, JPEG
//!
//! La lista dei file viene raccolta per intero prima di qualsiasi
//! trasformazione, così ogni file viene visitato esattamente una volta
//! anche quando il run rinomina o sostituisce file durante la scansione.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Manages file discovery and path classification
pub struct FileManager;

impl FileManager {
    /// Collect every regular file under the root, recursively.
    ///
    /// Fails if the root itself is missing or unreadable. Entries that
    /// cannot be read deeper in the tree are logged and skipped.
    pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
        std::fs::read_dir(root)
            .map_err(|e| anyhow::anyhow!("Cannot read directory {}: {}", root.display(), e))?;

        let mut files = Vec::new();

        for entry in WalkDir::new(root) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    files.push(entry.path().to_path_buf());
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }

        Ok(files)
    }

    /// Check if a file has a recognized audio extension
    pub fn is_audio_file(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "mp3" | "m4a" | "flac" | "ogg" | "wav")
        } else {
            false
        }
    }

    /// Check if a file is a recognized comic archive
    pub fn is_archive_file(path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            ext.to_string_lossy().to_lowercase() == "cbz"
        } else {
            false
        }
    }

    /// Check if an archive entry name is an image we can recompress
    pub fn is_image_entry(name: &str) -> bool {
        if let Some(ext) = Path::new(name).extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            matches!(ext_lower.as_str(), "png" | "jpg" | "jpeg")
        } else {
            false
        }
    }

    /// Get the size of a file in bytes
    pub fn file_size(path: &Path) -> std::io::Result<u64> {
        Ok(std::fs::metadata(path)?.len())
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Calculate percentage reduction
    pub fn calculate_reduction(original_size: u64, new_size: u64) -> f64 {
        if original_size == 0 {
            0.0
        } else {
            ((original_size as f64 - new_size as f64) / original_size as f64) * 100.0
        }
    }
}
