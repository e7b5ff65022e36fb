use std::cell::RefCell;
use std::path::Path;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use sparkify_etl::{LoadProgress, LoadStats, LogProgress, load_logs, load_songs};

use crate::error::CliError;
use crate::logging::log_blank;
use crate::settings::Settings;

use super::open_db;

/// Load song files, then log files, into the warehouse database.
pub(crate) fn run_load(
    settings: &Settings,
    songs_only: bool,
    logs_only: bool,
    show_bar: bool,
) -> Result<(), CliError> {
    let conn = open_db(&settings.database.path)?;

    let song_stats = if logs_only {
        None
    } else {
        let progress = CliLoadProgress::new("songs", show_bar);
        Some(load_songs(&conn, &settings.data.song_dir, Some(&progress))?)
    };

    let log_stats = if songs_only {
        None
    } else {
        let progress = CliLoadProgress::new("logs", show_bar);
        Some(load_logs(&conn, &settings.data.log_dir, Some(&progress))?)
    };

    conn.close()
        .map_err(|(_, e)| CliError::database(format!("Failed to close database: {}", e)))?;

    log_blank();
    log::info!("{}", "Load complete".if_supports_color(Stdout, |t| t.bold()));
    if let Some(stats) = song_stats {
        log::info!(
            "  Song files: {} ({} songs, {} artists)",
            stats.files_processed,
            stats.rows.songs,
            stats.rows.artists,
        );
    }
    if let Some(stats) = log_stats {
        log::info!(
            "  Log files:  {} ({} songplays, {} matched to a song, {} time rows, {} user rows)",
            stats.files_processed,
            stats.rows.songplays,
            stats.rows.songplays_matched,
            stats.rows.time,
            stats.rows.users,
        );
    }
    log::info!("  Database: {}", settings.database.path.display());

    Ok(())
}

/// CLI progress reporter: a progress bar on a terminal, plain `LogProgress`
/// lines otherwise.
struct CliLoadProgress {
    label: &'static str,
    show_bar: bool,
    bar: RefCell<Option<ProgressBar>>,
    lines: LogProgress,
}

impl CliLoadProgress {
    fn new(label: &'static str, show_bar: bool) -> Self {
        Self {
            label,
            show_bar,
            bar: RefCell::new(None),
            lines: LogProgress,
        }
    }
}

impl LoadProgress for CliLoadProgress {
    fn on_discovered(&self, total: usize, root: &Path) {
        self.lines.on_discovered(total, root);

        let bar = ProgressBar::new(total as u64);
        if !self.show_bar {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template(
            "  {prefix:.dim} [{bar:40.cyan/blue}] {pos}/{len} files processed",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_prefix(self.label);
        *self.bar.borrow_mut() = Some(bar);
    }

    fn on_file(&self, current: usize, total: usize, path: &Path) {
        match self.bar.borrow().as_ref() {
            Some(bar) if !bar.is_hidden() => bar.inc(1),
            _ => self.lines.on_file(current, total, path),
        }
    }

    fn on_complete(&self, stats: &LoadStats) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
        self.lines.on_complete(stats);
        log::info!(
            "  {} {}: {}/{} files",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            self.label.if_supports_color(Stdout, |t| t.bold()),
            stats.files_processed,
            stats.files_found,
        );
    }
}
