//! # Audio Tag Stripping Module
//!
//! Questo modulo rimuove i metadati embedded dai file audio sotto una
//! directory.
//!
//! ## Responsabilità:
//! - Scansione ricorsiva dei file con estensione audio riconosciuta
//! - Parsing dei tag con `lofty` (ID3v2, MP4 ilst, Vorbis comments, etc.)
//! - Rimozione di tutti i tag e riscrittura in place
//!
//! Il salvataggio riscrive solo i blocchi di tag: lo stream audio non viene
//! ricodificato. I file senza tag vengono saltati; i file che non si
//! riescono a parsare vengono contati come falliti e il run prosegue.

use anyhow::Result;
use lofty::{Probe, TagType, TaggedFileExt};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::StripConfig;
use crate::error::MaintainError;
use crate::file_manager::FileManager;
use crate::progress::{ProgressManager, RunStats};

/// Per-file outcome of a strip attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripOutcome {
    /// All tags were removed and the file rewritten
    Stripped,
    /// The file parsed fine but carried no tags
    NoTags,
}

/// Removes embedded metadata from audio files
pub struct MetadataStripper {
    config: StripConfig,
}

impl MetadataStripper {
    pub fn new(config: StripConfig) -> Self {
        Self { config }
    }

    /// Strip tags from every recognized audio file under the root
    pub fn run(&self, root: &Path) -> Result<RunStats> {
        let files: Vec<PathBuf> = FileManager::collect_files(root)?
            .into_iter()
            .filter(|path| FileManager::is_audio_file(path))
            .collect();

        info!("Found {} audio files to process", files.len());
        if self.config.dry_run {
            info!("Dry run mode: no files will be rewritten");
        }

        let progress = ProgressManager::new(files.len() as u64);
        let mut stats = RunStats::new();

        for path in &files {
            let label = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();

            match self.strip_file(path) {
                Ok(StripOutcome::Stripped) => {
                    stats.add_changed();
                    info!("Removed metadata from {}", path.display());
                }
                Ok(StripOutcome::NoTags) => {
                    stats.add_skipped();
                    debug!("No metadata in {}", path.display());
                }
                Err(e) => {
                    stats.add_failed();
                    error!("Failed to process {}: {}", path.display(), e);
                }
            }

            progress.update(&label);
        }

        progress.finish(&stats.format_summary());
        stats.log_summary("Metadata Strip");

        Ok(stats)
    }

    /// Remove every tag from a single audio file, in place
    fn strip_file(&self, path: &Path) -> Result<StripOutcome, MaintainError> {
        let tagged_file = Probe::open(path)?.read()?;

        let tag_types: Vec<TagType> = tagged_file
            .tags()
            .iter()
            .map(|tag| tag.tag_type())
            .collect();

        if tag_types.is_empty() {
            return Ok(StripOutcome::NoTags);
        }

        if self.config.dry_run {
            info!("[dry run] Would remove metadata from {}", path.display());
            return Ok(StripOutcome::Stripped);
        }

        for tag_type in tag_types {
            if tag_type.remove_from_path(path).is_err() {
                return Err(MaintainError::TagRemoval {
                    tag_type,
                    path: path.to_path_buf(),
                });
            }
        }

        Ok(StripOutcome::Stripped)
    }
}
