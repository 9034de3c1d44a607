//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche di un run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Tracking dei contatori per-file (processed, changed, skipped, failed)
//! - Calcolo percentuali di riduzione e byte risparmiati
//! - Report finale con statistiche aggregate
//!
//! ## Statistiche tracciate:
//! - **processed**: Totale file esaminati
//! - **changed**: File effettivamente modificati (rinominati, riscritti,
//!   sostituiti)
//! - **skipped**: File saltati (nessun tag, conflitto di nome, riduzione
//!   insufficiente)
//! - **failed**: File falliti; il run continua ma l'exit code diventa 1
//! - **total_bytes_saved** / **total_original_size**: solo per i tool che
//!   riducono le dimensioni

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::info;

use crate::file_manager::FileManager;

/// Manages progress reporting for a maintenance run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for one maintenance run
#[derive(Debug, Default)]
pub struct RunStats {
    pub processed: usize,
    pub changed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_original_size: u64,
    pub total_bytes_saved: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file that was modified without size accounting
    pub fn add_changed(&mut self) {
        self.processed += 1;
        self.changed += 1;
    }

    /// Record a file that was replaced by a smaller version
    pub fn add_optimized(&mut self, original_size: u64, new_size: u64) {
        self.processed += 1;
        self.changed += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_skipped(&mut self) {
        self.processed += 1;
        self.skipped += 1;
    }

    pub fn add_failed(&mut self) {
        self.processed += 1;
        self.failed += 1;
    }

    pub fn had_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        let mut summary = format!(
            "Processed: {} files | Changed: {} | Skipped: {} | Failed: {}",
            self.processed, self.changed, self.skipped, self.failed
        );

        if self.total_original_size > 0 {
            summary.push_str(&format!(
                " | Total saved: {} ({:.2}%)",
                FileManager::format_size(self.total_bytes_saved),
                self.overall_reduction_percent()
            ));
        }

        summary
    }

    /// Log the end-of-run report
    pub fn log_summary(&self, title: &str) {
        info!("=== {} Complete ===", title);
        info!("Files processed: {}", self.processed);
        info!("Files changed: {}", self.changed);
        info!("Files skipped: {}", self.skipped);
        info!("Failures: {}", self.failed);

        if self.total_original_size > 0 {
            info!(
                "Bytes saved: {}",
                FileManager::format_size(self.total_bytes_saved)
            );
            info!("Average reduction: {:.2}%", self.overall_reduction_percent());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_stats_counters() {
        let mut stats = RunStats::new();
        stats.add_changed();
        stats.add_optimized(1000, 600);
        stats.add_skipped();
        stats.add_failed();

        assert_eq!(stats.processed, 4);
        assert_eq!(stats.changed, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.total_bytes_saved, 400);
        assert!(stats.had_failures());
    }

    #[test]
    fn test_summary_omits_bytes_when_nothing_measured() {
        let mut stats = RunStats::new();
        stats.add_changed();

        let summary = stats.format_summary();
        assert!(!summary.contains("Total saved"));

        stats.add_optimized(2048, 1024);
        assert!(stats.format_summary().contains("Total saved"));
        assert_eq!(stats.overall_reduction_percent(), 50.0);
    }
}
