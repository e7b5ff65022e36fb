use std::cell::RefCell;
use std::fs;
use std::path::Path;

use sparkify_db::*;
use sparkify_etl::*;
use tempfile::TempDir;

fn song_json(id: &str, title: &str) -> String {
    format!(
        r#"{{"num_songs":1,"song_id":"{id}","title":"{title}","artist_id":"A-{id}","artist_name":"Artist {id}","artist_location":"","artist_latitude":null,"artist_longitude":null,"year":0,"duration":123.0}}"#
    )
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[derive(Default)]
struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl LoadProgress for RecordingProgress {
    fn on_discovered(&self, total: usize, _root: &Path) {
        self.events.borrow_mut().push(format!("found {total}"));
    }

    fn on_file(&self, current: usize, total: usize, _path: &Path) {
        self.events.borrow_mut().push(format!("{current}/{total}"));
    }

    fn on_complete(&self, stats: &LoadStats) {
        self.events
            .borrow_mut()
            .push(format!("done {}", stats.files_processed));
    }
}

#[test]
fn find_json_files_recurses_and_filters() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "A/A/A/TRAAAAW.json", "{}");
    write(tmp.path(), "A/B/C/TRABCEI.json", "{}");
    write(tmp.path(), "A/B/notes.txt", "");
    write(tmp.path(), "A/B/UPPER.JSON", "{}");
    write(tmp.path(), "A/.hidden.json", "{}");
    write(tmp.path(), ".ipynb_checkpoints/TRCHECK.json", "{}");

    let files = find_json_files(tmp.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(files.len(), 3);
    assert!(names.contains(&"TRAAAAW.json".to_string()));
    assert!(names.contains(&"TRABCEI.json".to_string()));
    assert!(names.contains(&"TRCHECK.json".to_string()));
    assert!(files.iter().all(|p| p.is_absolute()));
}

#[test]
fn missing_root_finds_nothing() {
    let tmp = TempDir::new().unwrap();
    let files = find_json_files(&tmp.path().join("missing")).unwrap();
    assert!(files.is_empty());

    let conn = open_memory().unwrap();
    let stats = load_songs(&conn, &tmp.path().join("missing"), None).unwrap();
    assert_eq!(stats, LoadStats::default());
}

#[test]
fn load_songs_processes_every_file() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "A/A/1.json", &song_json("S1", "One"));
    write(tmp.path(), "A/B/2.json", &song_json("S2", "Two"));
    write(tmp.path(), "B/3.json", &song_json("S3", "Three"));

    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    let stats = load_songs(&conn, tmp.path(), Some(&progress)).unwrap();

    assert_eq!(stats.files_found, 3);
    assert_eq!(stats.files_processed, 3);
    assert_eq!(stats.rows.songs, 3);
    assert_eq!(table_stats(&conn).unwrap().songs, 3);
    assert_eq!(
        *progress.events.borrow(),
        vec!["found 3", "1/3", "2/3", "3/3", "done 3"]
    );
}

#[test]
fn failure_keeps_earlier_files_and_stops_walk() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", &song_json("S1", "One"));
    write(tmp.path(), "b.json", "{\"song_id\": \"S2\"}");
    write(tmp.path(), "c.json", &song_json("S3", "Three"));

    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    let err = load_songs(&conn, tmp.path(), Some(&progress)).unwrap_err();

    assert!(matches!(err, EtlError::Record { .. }));
    let stats = table_stats(&conn).unwrap();
    assert_eq!(stats.songs, 1);
    assert_eq!(stats.artists, 1);
    assert_eq!(*progress.events.borrow(), vec!["found 3", "1/3"]);
}

#[test]
fn failed_file_is_rolled_back() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", &song_json("S1", "One"));

    let conn = open_memory().unwrap();
    let err = process_data(
        &conn,
        tmp.path(),
        |conn, path| {
            process_song_file(conn, path)?;
            Err(EtlError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("injected"),
            })
        },
        None,
    )
    .unwrap_err();

    assert!(matches!(err, EtlError::Io { .. }));
    assert_eq!(table_stats(&conn).unwrap().songs, 0);
}

#[test]
fn songs_then_logs_resolves_songplays() {
    let tmp = TempDir::new().unwrap();
    let song_root = tmp.path().join("song_data");
    let log_root = tmp.path().join("log_data");

    write(
        &song_root,
        "A/A/A/TRAAAAW.json",
        r#"{"song_id":"S1","title":"T","artist_id":"A1","artist_name":"N","artist_location":"L","artist_latitude":1.0,"artist_longitude":2.0,"year":2000,"duration":200.5}"#,
    );
    write(
        &log_root,
        "2018/11/2018-11-08-events.json",
        &[
            r#"{"artist":null,"auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":0,"lastName":"Summers","length":null,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"GET","page":"Home","registration":1540344794796.0,"sessionId":139,"song":null,"status":200,"ts":1541717900000,"userAgent":"Mozilla/5.0","userId":"8"}"#,
            r#"{"artist":"N","auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":1,"lastName":"Summers","length":200.5,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong","registration":1540344794796.0,"sessionId":139,"song":"T","status":200,"ts":1541717922796,"userAgent":"Mozilla/5.0","userId":"8"}"#,
            r#"{"artist":"Unknown","auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":2,"lastName":"Summers","length":99.0,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong","registration":1540344794796.0,"sessionId":139,"song":"Other","status":200,"ts":1541718022796,"userAgent":"Mozilla/5.0","userId":"8"}"#,
        ]
        .join("\n"),
    );

    let conn = open_memory().unwrap();
    let songs = load_songs(&conn, &song_root, Some(&SilentProgress)).unwrap();
    let logs = load_logs(&conn, &log_root, Some(&SilentProgress)).unwrap();

    assert_eq!(songs.files_processed, 1);
    assert_eq!(logs.files_processed, 1);
    assert_eq!(logs.rows.songplays, 2);
    assert_eq!(logs.rows.songplays_matched, 1);

    let stats = table_stats(&conn).unwrap();
    assert_eq!(stats.songplays, 2);
    assert_eq!(stats.songplays_matched, 1);
    assert_eq!(stats.time, 2);
    assert_eq!(stats.users, 1);
}

#[cfg(unix)]
#[test]
fn symlinked_directory_is_not_walked_twice() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "A/TRAAAAW.json", &song_json("S1", "One"));
    std::os::unix::fs::symlink(tmp.path().join("A"), tmp.path().join("alias")).unwrap();

    let files = find_json_files(tmp.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("A/TRAAAAW.json"));
}

#[cfg(unix)]
#[test]
fn symlink_cycle_terminates() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "A/TRAAAAW.json", &song_json("S1", "One"));
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("A/loop")).unwrap();

    let files = find_json_files(tmp.path()).unwrap();
    assert_eq!(files.len(), 1);
}

#[cfg(unix)]
#[test]
fn symlinked_json_file_is_kept() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "store/TRAAAAW.json", &song_json("S1", "One"));
    fs::create_dir_all(tmp.path().join("data")).unwrap();
    std::os::unix::fs::symlink(
        tmp.path().join("store/TRAAAAW.json"),
        tmp.path().join("data/TRLINKED.json"),
    )
    .unwrap();

    let files = find_json_files(&tmp.path().join("data")).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("data/TRLINKED.json"));
}
