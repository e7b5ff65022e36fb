//! Source file discovery and the per-file commit loop.

use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::EtlError;
use crate::log_import::process_log_file;
use crate::progress::LoadProgress;
use crate::song_import::process_song_file;

/// Rows issued while processing one or more source files.
///
/// Counts are insert statements, not rows that ended up stored: duplicate
/// keys are still counted here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    pub songs: u64,
    pub artists: u64,
    pub time: u64,
    pub users: u64,
    pub songplays: u64,
    pub songplays_matched: u64,
}

impl AddAssign for FileStats {
    fn add_assign(&mut self, other: Self) {
        self.songs += other.songs;
        self.artists += other.artists;
        self.time += other.time;
        self.users += other.users;
        self.songplays += other.songplays;
        self.songplays_matched += other.songplays_matched;
    }
}

/// Statistics from one walk over a data directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub files_found: usize,
    pub files_processed: usize,
    pub rows: FileStats,
}

/// Recursively collect every `*.json` file under `root`, as absolute paths.
///
/// Hidden files (leading `.`) are skipped, hidden directories are not.
/// Symlinks to directories are not followed. A missing root yields an empty
/// list. Paths are returned sorted.
pub fn find_json_files(root: &Path) -> Result<Vec<PathBuf>, EtlError> {
    if !root.is_dir() {
        log::warn!("Data directory not found: {}", root.display());
        return Ok(Vec::new());
    }

    let root = std::path::absolute(root).map_err(|source| EtlError::Walk {
        path: root.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    collect_json_files(&root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), EtlError> {
    let entries = std::fs::read_dir(dir).map_err(|source| EtlError::Walk {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| EtlError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| EtlError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        // Symlinked directories are not descended into; symlinked files are kept.
        if file_type.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.is_file() && is_json_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Matches what a `*.json` shell glob would: case-sensitive, no dotfiles.
fn is_json_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));
    visible && path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Run `handler` over every JSON file under `root`, committing after each file.
///
/// Files committed before a failure stay loaded; the failing file's
/// statements are rolled back and the remaining files are not visited.
pub fn process_data<F>(
    conn: &Connection,
    root: &Path,
    mut handler: F,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadStats, EtlError>
where
    F: FnMut(&Connection, &Path) -> Result<FileStats, EtlError>,
{
    let files = find_json_files(root)?;
    let total = files.len();

    let mut stats = LoadStats {
        files_found: total,
        ..LoadStats::default()
    };
    if let Some(p) = progress {
        p.on_discovered(total, root);
    }

    for (i, path) in files.iter().enumerate() {
        let tx = conn.unchecked_transaction()?;
        let file_stats = match handler(&tx, path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to load {}", path.display());
                return Err(e);
            }
        };
        tx.commit()?;

        stats.files_processed += 1;
        stats.rows += file_stats;

        if let Some(p) = progress {
            p.on_file(i + 1, total, path);
        }
    }

    if let Some(p) = progress {
        p.on_complete(&stats);
    }

    Ok(stats)
}

/// Load every song data file under `root`.
pub fn load_songs(
    conn: &Connection,
    root: &Path,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadStats, EtlError> {
    process_data(conn, root, process_song_file, progress)
}

/// Load every event log file under `root`.
pub fn load_logs(
    conn: &Connection,
    root: &Path,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadStats, EtlError> {
    process_data(conn, root, process_log_file, progress)
}
