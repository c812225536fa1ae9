//! Patch-writer scenarios: byte-exact copies, in-place field patches, and
//! the precondition checks that run before any I/O.

mod common;

use std::fs;
use std::path::Path;

use slp_batch::{scan, write_replays, WriteError, WriteRequest};
use slp_codec::layout::{DISPLAY_NAME_OFFSETS, DISPLAY_NAME_WIDTH};
use slp_codec::ReplayRecord;

fn record_for(dir: &Path) -> ReplayRecord {
    fs::write(dir.join("game.slp"), common::sample_replay()).unwrap();
    let mut records = scan(dir).unwrap();
    assert_eq!(records.len(), 1);
    records.remove(0)
}

#[test]
fn copies_byte_for_byte_without_patches() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            ..Default::default()
        },
    )
    .unwrap();

    let source = fs::read(source_dir.path().join("game.slp")).unwrap();
    let written = fs::read(dest_dir.path().join("game.slp")).unwrap();
    assert_eq!(written, source);
}

#[test]
fn display_name_override_patches_only_its_field_window() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();

    let mut record = record_for(source_dir.path());
    record.players[0].overrides.display_name = "A#1".into();

    write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            apply_display_name_overrides: true,
            ..Default::default()
        },
    )
    .unwrap();

    let source = fs::read(source_dir.path().join("game.slp")).unwrap();
    let written = fs::read(dest_dir.path().join("game.slp")).unwrap();
    assert_eq!(written.len(), source.len());

    let window = common::GAME_START_ABS + DISPLAY_NAME_OFFSETS[0];

    // Everything outside the designated field window is untouched.
    assert_eq!(written[..window], source[..window]);
    assert_eq!(written[window + DISPLAY_NAME_WIDTH..], source[window + DISPLAY_NAME_WIDTH..]);

    // The hash mark is stored as its full-width substitution.
    assert_eq!(&written[window..window + 4], &[b'A', 0x81, 0x94, b'1']);
    assert!(written[window + 4..window + DISPLAY_NAME_WIDTH].iter().all(|&b| b == 0));

    let reparsed = scan(dest_dir.path()).unwrap().remove(0);
    assert_eq!(reparsed.players[0].display_name, "A＃1");
    assert_eq!(reparsed.players[1].display_name, "PLAYER 2");
}

#[test]
fn start_time_override_patches_the_trailer_in_place() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            start_times: Some(vec!["2024-01-02T03:04:05.678Z".into()]),
            ..Default::default()
        },
    )
    .unwrap();

    let reparsed = scan(dest_dir.path()).unwrap().remove(0);
    assert_eq!(reparsed.start_at, "2024-01-02T03:04:05.678Z");

    let source = fs::read(source_dir.path().join("game.slp")).unwrap();
    let written = fs::read(dest_dir.path().join("game.slp")).unwrap();
    assert_eq!(written.len(), source.len());
}

#[test]
fn short_start_time_override_leaves_the_trailer_unchanged() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            start_times: Some(vec!["2024-01-02".into()]),
            ..Default::default()
        },
    )
    .unwrap();

    let source = fs::read(source_dir.path().join("game.slp")).unwrap();
    let written = fs::read(dest_dir.path().join("game.slp")).unwrap();
    assert_eq!(written, source);
}

#[test]
fn mismatched_file_name_count_fails_before_any_io() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    let destination = dest_dir.path().join("subdir");

    let result = write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: destination.clone(),
            file_names: Some(vec!["a.slp".into(), "b.slp".into()]),
            ..Default::default()
        },
    );

    assert!(matches!(result, Err(WriteError::CountMismatch { what: "file name", .. })));

    // The destination was never created: the check ran before any I/O.
    assert!(!destination.exists());
}

#[test]
fn mismatched_start_time_count_fails_before_any_io() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    let result = write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            start_times: Some(vec![]),
            ..Default::default()
        },
    );

    assert!(matches!(result, Err(WriteError::CountMismatch { what: "start time", .. })));
}

#[test]
fn subdirectory_and_file_names_are_sanitized() {
    let source_dir = tempfile::tempdir().unwrap();
    let dest_dir = tempfile::tempdir().unwrap();
    let record = record_for(source_dir.path());

    write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            subdirectory: Some("week/1: pools".into()),
            file_names: Some(vec!["game: 1?.slp".into()]),
            ..Default::default()
        },
    )
    .unwrap();

    let written = dest_dir.path().join("week1 pools").join("game 1.slp");
    assert!(written.is_file());
}

#[test]
fn missing_source_file_fails_the_batch() {
    let dest_dir = tempfile::tempdir().unwrap();

    let source_dir = tempfile::tempdir().unwrap();
    let mut record = record_for(source_dir.path());
    record.file_path = source_dir.path().join("vanished.slp");

    let result = write_replays(
        std::slice::from_ref(&record),
        &WriteRequest {
            directory: dest_dir.path().to_path_buf(),
            ..Default::default()
        },
    );

    assert!(matches!(result, Err(WriteError::Io(_))));
}
