//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione dei tre tool.
//!
//! ## Responsabilità:
//! - Definisce una struct di configurazione per ogni tool
//! - Fornisce validazione dei parametri di input
//! - Supporta caricamento della configurazione da file JSON (solo per
//!   l'ottimizzatore di archivi, che ha abbastanza parametri da meritarlo)
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `TrimConfig`: numero di caratteri da rimuovere, lunghezza minima
//!   dello stem risultante, dry run
//! - `StripConfig`: dry run
//! - `ArchiveConfig`: qualità JPEG (1-100, default: 80), altezza massima
//!   delle pagine in pixel (default: 1024), soglia di sostituzione
//!   (0.0-1.0, default: 1.0), backup opzionale, dry run
//!
//! ## Validazione:
//! - Controlla che chars_to_trim sia > 0
//! - Controlla che jpeg_quality sia 1-100
//! - Controlla che max_height sia > 0
//! - Controlla che size_threshold sia 0.0-1.0

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for filename trimming
#[derive(Debug, Clone)]
pub struct TrimConfig {
    /// Number of leading characters to remove from each filename
    pub chars_to_trim: usize,
    /// Minimum characters the trimmed name must keep before the extension
    pub min_stem_chars: usize,
    /// Dry run - don't actually rename files
    pub dry_run: bool,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            chars_to_trim: 1,
            min_stem_chars: 3,
            dry_run: false,
        }
    }
}

impl TrimConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.chars_to_trim == 0 {
            return Err(anyhow::anyhow!(
                "Number of characters to trim must be greater than 0"
            ));
        }

        Ok(())
    }
}

/// Configuration for audio tag stripping
#[derive(Debug, Clone, Default)]
pub struct StripConfig {
    /// Dry run - report files that carry tags without rewriting them
    pub dry_run: bool,
}

/// Configuration for comic archive optimization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Maximum page height in pixels (taller pages are scaled down)
    pub max_height: u32,
    /// Size threshold (replace if new size < original * threshold)
    pub size_threshold: f64,
    /// Keep a copy of the original archive as `<stem>_original.cbz`
    pub keep_backup: bool,
    /// Dry run - rebuild and report savings, but never replace files
    pub dry_run: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            max_height: 1024,
            size_threshold: 1.0,
            keep_backup: false,
            dry_run: false,
        }
    }
}

impl ArchiveConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(anyhow::anyhow!("JPEG quality must be between 1 and 100"));
        }

        if self.max_height == 0 {
            return Err(anyhow::anyhow!("Maximum page height must be greater than 0"));
        }

        if self.size_threshold <= 0.0 || self.size_threshold > 1.0 {
            return Err(anyhow::anyhow!("Size threshold must be between 0.0 and 1.0"));
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Config file does not exist: {}",
                path.display()
            ));
        }

        let content = std::fs::read_to_string(path)?;
        let config: ArchiveConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_trim_config_validation() {
        let mut config = TrimConfig::default();
        assert!(config.validate().is_ok());

        config.chars_to_trim = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_archive_config_validation() {
        let mut config = ArchiveConfig::default();
        assert!(config.validate().is_ok());

        config.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.jpeg_quality = 101;
        assert!(config.validate().is_err());

        config.jpeg_quality = 80;
        config.size_threshold = 1.5;
        assert!(config.validate().is_err());

        config.size_threshold = 1.0;
        config.max_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_archive_config_default() {
        let config = ArchiveConfig::default();
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.max_height, 1024);
        assert_eq!(config.size_threshold, 1.0);
        assert!(!config.keep_backup);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_archive_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        // Partial config: unspecified fields fall back to defaults
        std::fs::write(&config_path, r#"{"jpeg_quality": 70, "max_height": 1600}"#).unwrap();

        let loaded = ArchiveConfig::from_file(&config_path).unwrap();
        assert_eq!(loaded.jpeg_quality, 70);
        assert_eq!(loaded.max_height, 1600);
        assert_eq!(loaded.size_threshold, 1.0);
    }

    #[test]
    fn test_archive_config_from_file_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        std::fs::write(&config_path, r#"{"jpeg_quality": 0}"#).unwrap();
        assert!(ArchiveConfig::from_file(&config_path).is_err());

        assert!(ArchiveConfig::from_file(&temp_dir.path().join("missing.json")).is_err());
    }
}
