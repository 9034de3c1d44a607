//! # Filename Trimming Module
//!
//! Questo modulo rimuove un numero fisso di caratteri iniziali dal nome di
//! ogni file sotto una directory.
//!
//! ## Responsabilità:
//! - Scansione ricorsiva e rename per-file
//! - Skip sicuro dei nomi troppo corti o dei risultati inutilizzabili
//! - Skip dei rename che collidono con file esistenti
//!
//! ## Regole di skip:
//! - Nome con al massimo N caratteri: troppo corto per essere accorciato
//! - Risultato vuoto, nascosto (inizia con un punto) o con stem più corto
//!   del minimo configurato
//! - Destinazione già esistente nella stessa directory
//!
//! Il rename altera solo il nome: il contenuto del file non viene toccato.
//! L'operazione non è idempotente: ripetere il run con lo stesso N accorcia
//! ulteriormente i nomi.

use anyhow::Result;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::config::TrimConfig;
use crate::error::MaintainError;
use crate::file_manager::FileManager;
use crate::progress::{ProgressManager, RunStats};

/// Why a file was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The name has no more characters than the trim count
    TooShort,
    /// The trimmed name would be empty, hidden, or lose its stem
    Unusable,
    /// A file or directory with the trimmed name already exists
    Conflict,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooShort => write!(f, "name too short to trim"),
            SkipReason::Unusable => write!(f, "trimmed name would be unusable"),
            SkipReason::Conflict => write!(f, "target name already exists"),
        }
    }
}

/// Per-file outcome of a trim attempt
#[derive(Debug)]
pub enum TrimOutcome {
    Renamed { new_path: PathBuf },
    Skipped(SkipReason),
}

/// Renames files by removing a fixed number of leading characters
pub struct FilenameTrimmer {
    config: TrimConfig,
}

impl FilenameTrimmer {
    /// Create a new trimmer with a validated configuration
    pub fn new(config: TrimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Trim every filename under the root directory
    pub fn run(&self, root: &Path) -> Result<RunStats> {
        let files = FileManager::collect_files(root)?;

        info!(
            "Found {} files to examine (trimming {} leading characters)",
            files.len(),
            self.config.chars_to_trim
        );
        if self.config.dry_run {
            info!("Dry run mode: no files will be renamed");
        }

        let progress = ProgressManager::new(files.len() as u64);
        let mut stats = RunStats::new();

        for path in &files {
            let label = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned();

            match self.trim_file(path) {
                Ok(TrimOutcome::Renamed { new_path }) => {
                    stats.add_changed();
                    debug!("Renamed: {} -> {}", path.display(), new_path.display());
                }
                Ok(TrimOutcome::Skipped(reason)) => {
                    stats.add_skipped();
                    info!("Skipping {}: {}", path.display(), reason);
                }
                Err(e) => {
                    stats.add_failed();
                    error!("Failed to rename {}: {}", path.display(), e);
                }
            }

            progress.update(&label);
        }

        progress.finish(&stats.format_summary());
        stats.log_summary("Filename Trim");

        Ok(stats)
    }

    /// Attempt to trim a single file
    fn trim_file(&self, path: &Path) -> Result<TrimOutcome, MaintainError> {
        // Non-UTF8 names cannot be trimmed by character count
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return Ok(TrimOutcome::Skipped(SkipReason::Unusable)),
        };

        if file_name.chars().count() <= self.config.chars_to_trim {
            return Ok(TrimOutcome::Skipped(SkipReason::TooShort));
        }

        let new_name: String = file_name.chars().skip(self.config.chars_to_trim).collect();

        if !Self::is_usable_name(&new_name, self.config.min_stem_chars) {
            return Ok(TrimOutcome::Skipped(SkipReason::Unusable));
        }

        let new_path = path.with_file_name(&new_name);
        if new_path.exists() {
            return Ok(TrimOutcome::Skipped(SkipReason::Conflict));
        }

        if self.config.dry_run {
            info!(
                "[dry run] Would rename {} -> {}",
                path.display(),
                new_path.display()
            );
            return Ok(TrimOutcome::Renamed { new_path });
        }

        fs::rename(path, &new_path)?;
        Ok(TrimOutcome::Renamed { new_path })
    }

    /// A trimmed name is usable when it is not hidden and keeps a stem of
    /// at least `min_stem_chars` characters.
    fn is_usable_name(name: &str, min_stem_chars: usize) -> bool {
        if name.is_empty() || name.starts_with('.') {
            return false;
        }

        let stem = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        stem.chars().count() >= min_stem_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn trimmer(chars: usize) -> FilenameTrimmer {
        FilenameTrimmer::new(TrimConfig {
            chars_to_trim: chars,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_trim_renames_and_preserves_content() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("AAA_track_one.mp3"), "payload one").unwrap();
        std::fs::create_dir(root.join("album")).unwrap();
        std::fs::write(root.join("album").join("AAA_track_two.mp3"), "payload two").unwrap();

        let stats = trimmer(4).run(root).unwrap();

        assert_eq!(stats.changed, 2);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            std::fs::read_to_string(root.join("track_one.mp3")).unwrap(),
            "payload one"
        );
        assert_eq!(
            std::fs::read_to_string(root.join("album").join("track_two.mp3")).unwrap(),
            "payload two"
        );
        assert!(!root.join("AAA_track_one.mp3").exists());
    }

    #[test]
    fn test_trim_counts_characters_not_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("èè_ballad.flac"), "x").unwrap();

        let stats = trimmer(3).run(root).unwrap();

        assert_eq!(stats.changed, 1);
        assert!(root.join("ballad.flac").exists());
    }

    #[test]
    fn test_trim_skips_short_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("ab.txt"), "x").unwrap();

        let stats = trimmer(10).run(root).unwrap();

        assert_eq!(stats.changed, 0);
        assert_eq!(stats.skipped, 1);
        assert!(root.join("ab.txt").exists());
    }

    #[test]
    fn test_trim_skips_unusable_results() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        // Would become a hidden file
        std::fs::write(root.join("XX.gitignore"), "x").unwrap();
        // Would keep a one-character stem
        std::fs::write(root.join("XXa.txt"), "x").unwrap();

        let stats = trimmer(2).run(root).unwrap();

        assert_eq!(stats.changed, 0);
        assert_eq!(stats.skipped, 2);
        assert!(root.join("XX.gitignore").exists());
        assert!(root.join("XXa.txt").exists());
    }

    #[test]
    fn test_trim_skips_conflicts() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        // "abc.mp3" is skipped in its own right (one-character stem after
        // trimming), so it stays in place no matter the visit order and the
        // trim of "XXabc.mp3" must report a conflict instead of clobbering it.
        std::fs::write(root.join("XXabc.mp3"), "new").unwrap();
        std::fs::write(root.join("abc.mp3"), "existing").unwrap();

        let stats = trimmer(2).run(root).unwrap();

        assert_eq!(stats.changed, 0);
        assert_eq!(stats.skipped, 2);
        assert_eq!(
            std::fs::read_to_string(root.join("abc.mp3")).unwrap(),
            "existing"
        );
        assert!(root.join("XXabc.mp3").exists());
    }

    #[test]
    fn test_trim_is_not_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("AAAABBBB_interlude.ogg"), "x").unwrap();

        trimmer(4).run(root).unwrap();
        assert!(root.join("BBBB_interlude.ogg").exists());

        trimmer(4).run(root).unwrap();
        assert!(root.join("_interlude.ogg").exists());
    }

    #[test]
    fn test_trim_dry_run_renames_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::write(root.join("ZZ_finale.wav"), "x").unwrap();

        let stats = FilenameTrimmer::new(TrimConfig {
            chars_to_trim: 3,
            dry_run: true,
            ..Default::default()
        })
        .unwrap()
        .run(root)
        .unwrap();

        assert_eq!(stats.changed, 1);
        assert!(root.join("ZZ_finale.wav").exists());
        assert!(!root.join("finale.wav").exists());
    }
}
