use sparkify_model::*;

const SONG_JSON: &str = r#"{"num_songs": 1, "artist_id": "ARD7TVE1187B99BFB1", "artist_latitude": null, "artist_longitude": null, "artist_location": "California - LA", "artist_name": "Casual", "song_id": "SOMZWCG12A8C13C480", "title": "I Didn't Mean To", "duration": 218.93179, "year": 0}"#;

fn next_song_line(ts: i64, song: &str) -> String {
    format!(
        r#"{{"artist":"Des'ree","auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":1,"lastName":"Summers","length":246.30812,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong","registration":1540344794796.0,"sessionId":139,"song":"{song}","status":200,"ts":{ts},"userAgent":"Mozilla/5.0","userId":"8"}}"#
    )
}

const HOME_LINE: &str = r#"{"artist":null,"auth":"Logged In","firstName":"Walter","gender":"M","itemInSession":0,"lastName":"Frye","length":null,"level":"free","location":"San Francisco-Oakland-Hayward, CA","method":"GET","page":"Home","registration":1540919166796.0,"sessionId":38,"song":null,"status":200,"ts":1541105830796,"userAgent":"Mozilla/5.0","userId":"39"}"#;

const LOGOUT_LINE: &str = r#"{"artist":null,"auth":"Logged Out","firstName":null,"gender":null,"itemInSession":2,"lastName":null,"length":null,"level":"free","location":null,"method":"PUT","page":"Logout","registration":null,"sessionId":52,"song":null,"status":307,"ts":1541207073796,"userAgent":null,"userId":""}"#;

// ── Song Files ──────────────────────────────────────────────────────────────

#[test]
fn parse_song_record_reads_all_fields() {
    let record = parse_song_record(SONG_JSON).unwrap();
    assert_eq!(record.song_id, "SOMZWCG12A8C13C480");
    assert_eq!(record.title, "I Didn't Mean To");
    assert_eq!(record.artist_id, "ARD7TVE1187B99BFB1");
    assert_eq!(record.artist_name, "Casual");
    assert_eq!(record.artist_location.as_deref(), Some("California - LA"));
    assert_eq!(record.artist_latitude, None);
    assert_eq!(record.artist_longitude, None);
    assert_eq!(record.year, 0);
    assert_eq!(record.duration, 218.93179);
}

#[test]
fn song_record_splits_into_song_and_artist_rows() {
    let json = r#"{"song_id":"S1","title":"T","artist_id":"A1","artist_name":"N","artist_location":"L","artist_latitude":1.0,"artist_longitude":2.0,"year":2000,"duration":200.5}"#;
    let record = parse_song_record(json).unwrap();

    assert_eq!(
        record.song_row(),
        SongRow {
            song_id: "S1".to_string(),
            title: "T".to_string(),
            artist_id: "A1".to_string(),
            year: 2000,
            duration: 200.5,
        }
    );
    assert_eq!(
        record.artist_row(),
        ArtistRow {
            artist_id: "A1".to_string(),
            name: "N".to_string(),
            location: Some("L".to_string()),
            latitude: Some(1.0),
            longitude: Some(2.0),
        }
    );
}

#[test]
fn song_file_uses_only_first_record() {
    let json = format!(
        "{}\n{}",
        SONG_JSON,
        SONG_JSON.replace("SOMZWCG12A8C13C480", "SOSECOND")
    );
    let record = parse_song_record(&json).unwrap();
    assert_eq!(record.song_id, "SOMZWCG12A8C13C480");
}

#[test]
fn song_file_missing_field_is_malformed() {
    let json = r#"{"song_id":"S1","artist_id":"A1","artist_name":"N","year":2000,"duration":200.5}"#;
    let err = parse_song_record(json).unwrap_err();
    assert!(matches!(err, RecordError::Json { .. }));
    assert!(err.to_string().contains("title"), "got: {err}");
}

#[test]
fn song_file_with_bad_json_is_malformed() {
    let err = parse_song_record("{\"song_id\": ").unwrap_err();
    assert!(matches!(err, RecordError::Json { .. }));
}

#[test]
fn empty_song_file_is_rejected() {
    let err = parse_song_record("  \n").unwrap_err();
    assert!(matches!(err, RecordError::Empty));
}

// ── Log Files ───────────────────────────────────────────────────────────────

#[test]
fn only_next_song_lines_survive() {
    let content = [
        HOME_LINE.to_string(),
        next_song_line(1541106106796, "You Gotta Be"),
        LOGOUT_LINE.to_string(),
        next_song_line(1541106352796, "Mercy"),
    ]
    .join("\n");

    let events = parse_play_events(&content).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].song, "You Gotta Be");
    assert_eq!(events[1].song, "Mercy");
}

#[test]
fn play_event_fields_are_typed() {
    let events = parse_play_events(&next_song_line(1541717922796, "You Gotta Be")).unwrap();
    let event = &events[0];

    assert_eq!(event.user_id, 8);
    assert_eq!(event.first_name, "Kaylee");
    assert_eq!(event.last_name, "Summers");
    assert_eq!(event.gender, "F");
    assert_eq!(event.level, "free");
    assert_eq!(event.artist, "Des'ree");
    assert_eq!(event.length, 246.30812);
    assert_eq!(event.session_id, 139);
    assert_eq!(event.location, "Phoenix-Mesa-Scottsdale, AZ");
    assert_eq!(event.user_agent, "Mozilla/5.0");
    assert_eq!(
        format_start_time(&event.start_time),
        "2018-11-08T21:18:42.796"
    );
}

#[test]
fn numeric_user_id_is_accepted() {
    let line = next_song_line(1541717922796, "Mercy").replace(r#""userId":"8""#, r#""userId":8"#);
    let events = parse_play_events(&line).unwrap();
    assert_eq!(events[0].user_id, 8);
}

#[test]
fn duplicate_events_are_not_deduplicated() {
    let line = next_song_line(1541717922796, "Mercy");
    let content = format!("{line}\n{line}\n");
    let events = parse_play_events(&content).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].time_row(), events[1].time_row());
    assert_eq!(events[0].user_row(), events[1].user_row());
}

#[test]
fn blank_lines_are_skipped() {
    let content = format!("\n{}\n\n", next_song_line(1541717922796, "Mercy"));
    assert_eq!(parse_play_events(&content).unwrap().len(), 1);
}

#[test]
fn log_without_playback_yields_nothing() {
    let content = format!("{HOME_LINE}\n{LOGOUT_LINE}");
    assert!(parse_play_events(&content).unwrap().is_empty());
}

#[test]
fn next_song_missing_field_reports_line_and_field() {
    let broken = next_song_line(1541717922796, "Mercy").replace(r#""sessionId":139,"#, "");
    let content = format!("{HOME_LINE}\n{broken}");

    match parse_play_events(&content).unwrap_err() {
        RecordError::MissingField { line, field } => {
            assert_eq!(line, 2);
            assert_eq!(field, "sessionId");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn next_song_with_empty_user_id_is_rejected() {
    let broken = next_song_line(1541717922796, "Mercy").replace(r#""userId":"8""#, r#""userId":"""#);
    let err = parse_play_events(&broken).unwrap_err();
    assert!(matches!(
        err,
        RecordError::MissingField {
            field: "userId",
            ..
        }
    ));
}

#[test]
fn non_numeric_user_id_is_invalid() {
    let broken =
        next_song_line(1541717922796, "Mercy").replace(r#""userId":"8""#, r#""userId":"abc""#);
    let err = parse_play_events(&broken).unwrap_err();
    assert!(matches!(
        err,
        RecordError::InvalidField {
            field: "userId",
            ..
        }
    ));
}

#[test]
fn malformed_line_aborts_parse() {
    let content = format!("{}\nnot json", next_song_line(1541717922796, "Mercy"));
    match parse_play_events(&content).unwrap_err() {
        RecordError::Json { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn line_without_page_is_malformed() {
    let err = parse_play_events(r#"{"ts":1541717922796}"#).unwrap_err();
    assert!(matches!(err, RecordError::Json { line: 1, .. }));
}
