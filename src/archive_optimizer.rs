//! # Comic Archive Optimization Module
//!
//! Questo modulo ricomprime gli archivi CBZ sotto una directory.
//!
//! ## Responsabilità:
//! - Lettura di ogni archivio e ricostruzione entry per entry
//! - Ricodifica delle entry immagine (JPEG con qualità configurabile,
//!   PNG lossless) con resize opzionale delle pagine troppo alte
//! - Copia verbatim delle entry non-immagine (ComicInfo.xml, etc.)
//! - Validazione dell'archivio ricostruito prima della sostituzione
//! - Sostituzione atomica via rename, solo se il risultato è più piccolo
//!
//! ## Pipeline per archivio:
//! 1. Ricostruisce l'archivio in un file temporaneo nella stessa directory
//! 2. Riapre il file temporaneo e verifica che sia uno zip valido con lo
//!    stesso numero di entry
//! 3. Sostituisce l'originale solo se `new < original * size_threshold`
//! 4. Su qualsiasi errore l'originale resta intatto e il file viene
//!    contato come fallito
//!
//! Una entry ricodificata che risulta più grande dei byte originali viene
//! scartata in favore dei byte originali, quindi la ricostruzione non può
//! gonfiare le pagine già ben compresse.

use anyhow::Result;
use image::imageops::FilterType;
use image::ImageOutputFormat;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::config::ArchiveConfig;
use crate::error::MaintainError;
use crate::file_manager::FileManager;
use crate::progress::{ProgressManager, RunStats};

/// Per-file outcome of an optimization attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// The rebuilt archive was smaller and replaced the original
    Replaced { original_size: u64, new_size: u64 },
    /// The rebuild did not clear the size threshold; original untouched
    KeptOriginal { original_size: u64, new_size: u64 },
}

/// Recompresses comic archives in place
pub struct ArchiveOptimizer {
    config: ArchiveConfig,
}

impl ArchiveOptimizer {
    /// Create a new optimizer with a validated configuration
    pub fn new(config: ArchiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Optimize every comic archive under the root directory
    pub fn run(&self, root: &Path) -> Result<RunStats> {
        let files: Vec<PathBuf> = FileManager::collect_files(root)?
            .into_iter()
            .filter(|path| FileManager::is_archive_file(path))
            .collect();

        info!("Found {} comic archives to process", files.len());
        info!(
            "Mode: JPEG quality {}, max page height {}px",
            self.config.jpeg_quality, self.config.max_height
        );
        if self.config.dry_run {
            info!("Dry run mode: no archives will be replaced");
        }

        let progress = ProgressManager::new(files.len() as u64);
        let mut stats = RunStats::new();

        for path in &files {
            let label = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();

            match self.optimize_archive(path) {
                Ok(ArchiveOutcome::Replaced {
                    original_size,
                    new_size,
                }) => {
                    stats.add_optimized(original_size, new_size);
                    info!(
                        "Optimized {} | {} -> {} ({:.2}% saved)",
                        path.display(),
                        FileManager::format_size(original_size),
                        FileManager::format_size(new_size),
                        FileManager::calculate_reduction(original_size, new_size)
                    );
                }
                Ok(ArchiveOutcome::KeptOriginal { new_size, .. }) => {
                    stats.add_skipped();
                    debug!(
                        "Keeping {}: rebuilt archive ({}) is not small enough",
                        path.display(),
                        FileManager::format_size(new_size)
                    );
                }
                Err(e) => {
                    stats.add_failed();
                    error!("Failed to process {}: {}", path.display(), e);
                }
            }

            progress.update(&label);
        }

        progress.finish(&stats.format_summary());
        stats.log_summary("Archive Optimization");

        Ok(stats)
    }

    /// Rebuild one archive and replace it if the result is smaller.
    ///
    /// The rebuild is written to a temporary file in the same directory,
    /// so the final replacement is a rename on the same filesystem. If
    /// anything fails along the way the temporary file is dropped and the
    /// original is untouched.
    fn optimize_archive(&self, path: &Path) -> Result<ArchiveOutcome, MaintainError> {
        let original_size = FileManager::file_size(path)?;
        let parent = path.parent().unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::Builder::new()
            .prefix(".rebuild-")
            .suffix(".cbz")
            .tempfile_in(parent)?;

        let entry_count = self.rebuild_archive(path, temp.as_file_mut())?;
        Self::validate_rebuilt(temp.as_file_mut(), entry_count)?;

        let new_size = temp.as_file().metadata()?.len();
        let should_replace = (new_size as f64) < (original_size as f64) * self.config.size_threshold;

        if !should_replace {
            return Ok(ArchiveOutcome::KeptOriginal {
                original_size,
                new_size,
            });
        }

        if self.config.dry_run {
            info!(
                "[dry run] Would replace {} ({} -> {})",
                path.display(),
                FileManager::format_size(original_size),
                FileManager::format_size(new_size)
            );
            return Ok(ArchiveOutcome::Replaced {
                original_size,
                new_size,
            });
        }

        if self.config.keep_backup {
            self.create_backup(path)?;
        }

        temp.persist(path).map_err(|e| MaintainError::Io(e.error))?;

        Ok(ArchiveOutcome::Replaced {
            original_size,
            new_size,
        })
    }

    /// Copy every entry of the source archive into `out`, recompressing
    /// image entries along the way. Returns the number of entries written.
    fn rebuild_archive(&self, path: &Path, out: &mut File) -> Result<usize, MaintainError> {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let mut writer = ZipWriter::new(&mut *out);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let entry_count = archive.len();

        for index in 0..entry_count {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_owned();

            if entry.is_dir() {
                writer.add_directory(name, options)?;
                continue;
            }

            let mut data = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut data)?;

            let data = self.recompress_entry(&name, data)?;

            writer.start_file(name, options)?;
            writer.write_all(&data)?;
        }

        writer.finish()?;
        Ok(entry_count)
    }

    /// Re-encode a page image. Entries that are not recognized images come
    /// back unchanged; a re-encoded image that turned out larger is
    /// discarded in favor of the original bytes.
    fn recompress_entry(&self, name: &str, data: Vec<u8>) -> Result<Vec<u8>, MaintainError> {
        if !FileManager::is_image_entry(name) {
            return Ok(data);
        }

        let format = match Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => ImageOutputFormat::Jpeg(self.config.jpeg_quality),
            _ => ImageOutputFormat::Png,
        };

        let mut img = image::load_from_memory(&data)?;

        if img.height() > self.config.max_height {
            // Width bound is unconstrained: only the height cap applies
            img = img.resize(u32::MAX, self.config.max_height, FilterType::Lanczos3);
            debug!(
                "Resized {} to {}x{}",
                name,
                img.width(),
                img.height()
            );
        }

        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format)?;
        let recompressed = buf.into_inner();

        if recompressed.len() < data.len() {
            Ok(recompressed)
        } else {
            debug!("Re-encoded {} is not smaller, keeping original bytes", name);
            Ok(data)
        }
    }

    /// Re-open the rebuilt archive and check it parses with the expected
    /// number of entries.
    fn validate_rebuilt(file: &mut File, expected_entries: usize) -> Result<(), MaintainError> {
        file.seek(SeekFrom::Start(0))?;
        let rebuilt = ZipArchive::new(&mut *file)?;

        if rebuilt.len() != expected_entries {
            return Err(MaintainError::ArchiveValidation(format!(
                "entry count mismatch: expected {}, found {}",
                expected_entries,
                rebuilt.len()
            )));
        }

        Ok(())
    }

    /// Keep a copy of the original archive as `<stem>_original.<ext>`
    fn create_backup(&self, path: &Path) -> Result<(), MaintainError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("archive");
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("cbz");
        let backup_path = path.with_file_name(format!("{}_original.{}", stem, ext));

        if backup_path.exists() {
            return Err(MaintainError::BackupExists(backup_path));
        }

        std::fs::copy(path, &backup_path)?;
        debug!("Created backup: {}", backup_path.display());
        Ok(())
    }
}
