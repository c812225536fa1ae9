//! Shared fixtures: synthesizes minimal well-formed replay containers so
//! scanner and writer scenarios don't need binary files checked in.
#![allow(dead_code)]

use slp_codec::layout::*;

/// Covers every field the parser reads, through the last connect code.
pub const GAME_START_LEN: usize = 0x250;

/// Two table entries of three bytes each.
pub const SIZE_TABLE_LEN: usize = 6;

/// Absolute offset of the game start record in files built here.
pub const GAME_START_ABS: usize = HEADER_LEN + 2 + SIZE_TABLE_LEN;

pub fn sample_game_start() -> Vec<u8> {
    let mut record = vec![0u8; GAME_START_LEN];
    record[0] = GAME_START;
    record[VERSION_OFFSET..VERSION_OFFSET + 4].copy_from_slice(&[3, 9, 0, 0]);
    record[STAGE_OFFSET..STAGE_OFFSET + 2].copy_from_slice(&32u16.to_be_bytes());

    for port in 0..4 {
        record[PLAYER_TYPE_OFFSETS[port]] = 3;
    }

    for port in 0..2 {
        record[PLAYER_TYPE_OFFSETS[port]] = PLAYER_TYPE_HUMAN;
        record[EXTERNAL_CHARACTER_OFFSETS[port]] = 2 + port as u8;
        record[STOCKS_OFFSETS[port]] = 4;

        let name = format!("PLAYER {}", port + 1);
        record[DISPLAY_NAME_OFFSETS[port]..DISPLAY_NAME_OFFSETS[port] + name.len()]
            .copy_from_slice(name.as_bytes());
    }

    record
}

pub fn sample_game_end() -> Vec<u8> {
    vec![GAME_END, 2, 0, 0, 1, 0xFF, 0xFF]
}

fn key(name: &str) -> Vec<u8> {
    let mut out = vec![b'U', name.len() as u8];
    out.extend_from_slice(name.as_bytes());
    out
}

pub fn metadata_trailer(start_at: &str, last_frame: i32) -> Vec<u8> {
    let mut out = key("metadata");
    out.push(b'{');
    out.extend_from_slice(&key("startAt"));
    out.extend_from_slice(&[b'S', b'U', start_at.len() as u8]);
    out.extend_from_slice(start_at.as_bytes());
    out.extend_from_slice(&key("lastFrame"));
    out.push(b'l');
    out.extend_from_slice(&last_frame.to_be_bytes());
    out.push(b'}');
    out.push(b'}');
    out
}

pub fn build_replay(game_start: &[u8], game_end: &[u8], trailer: &[u8]) -> Vec<u8> {
    let mut table = Vec::new();
    table.push(GAME_START);
    table.extend_from_slice(&((game_start.len() - 1) as u16).to_be_bytes());
    table.push(GAME_END);
    table.extend_from_slice(&((game_end.len() - 1) as u16).to_be_bytes());
    assert_eq!(table.len(), SIZE_TABLE_LEN);

    let raw_len = 2 + table.len() + game_start.len() + game_end.len();

    let mut out = Vec::new();
    out.extend_from_slice(&RAW_MAGIC);
    out.extend_from_slice(&(raw_len as u32).to_be_bytes());
    out.push(EVENT_PAYLOADS);
    out.push((table.len() + 1) as u8);
    out.extend_from_slice(&table);
    out.extend_from_slice(game_start);
    out.extend_from_slice(game_end);
    out.extend_from_slice(trailer);
    out
}

pub fn sample_replay() -> Vec<u8> {
    build_replay(
        &sample_game_start(),
        &sample_game_end(),
        &metadata_trailer("2023-07-01T10:00:00.000Z", 9000),
    )
}
