//! Load progress reporting.

use std::path::Path;

use crate::walker::LoadStats;

/// Trait for receiving load progress updates.
pub trait LoadProgress {
    /// Called once after discovery, before any file is processed.
    fn on_discovered(&self, total: usize, root: &Path);

    /// Called after each file has been processed and committed.
    fn on_file(&self, current: usize, total: usize, path: &Path);

    /// Called when every discovered file has been processed.
    fn on_complete(&self, stats: &LoadStats);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl LoadProgress for SilentProgress {
    fn on_discovered(&self, _total: usize, _root: &Path) {}
    fn on_file(&self, _current: usize, _total: usize, _path: &Path) {}
    fn on_complete(&self, _stats: &LoadStats) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl LoadProgress for LogProgress {
    fn on_discovered(&self, total: usize, root: &Path) {
        log::info!("{} files found in {}", total, root.display());
    }

    fn on_file(&self, current: usize, total: usize, _path: &Path) {
        log::info!("{}/{} files processed.", current, total);
    }

    fn on_complete(&self, stats: &LoadStats) {
        log::debug!(
            "{} files loaded: {} songplays ({} matched)",
            stats.files_processed,
            stats.rows.songplays,
            stats.rows.songplays_matched,
        );
    }
}
