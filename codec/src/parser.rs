//! The container parser: one file's bytes in, a validated record out.
//!
//! Parsing is a straight walk over the offsets in [`crate::layout`]: header,
//! payload size table, game start record, game end record, metadata trailer.
//! Later offsets are computed from earlier ones, so the read order is fixed.
//! Structural problems abort with a [`ParseError`]; semantic problems
//! (illegal stage, CPU port, short game) still produce a record, flagged
//! `is_valid = false`, so callers can show the user why.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ParseError, Result};
use crate::game::{Character, Stage};
use crate::layout;
use crate::record::{Player, ReplayRecord};
use crate::text;
use crate::ubjson::Metadata;

/// Reads and parses a single replay file.
pub fn parse_replay(path: &Path) -> Result<ReplayRecord> {
    let bytes = fs::read(path)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_bytes(file_name, path.to_path_buf(), &bytes)
}

/// Parses replay container bytes that have already been read from disk.
pub fn parse_bytes(file_name: String, file_path: PathBuf, bytes: &[u8]) -> Result<ReplayRecord> {
    let header = slice(bytes, 0, layout::HEADER_LEN)?;
    if header[..layout::RAW_MAGIC.len()] != layout::RAW_MAGIC {
        return Err(ParseError::BadMagic);
    }

    let raw_len = read_u32(bytes, layout::RAW_LENGTH_OFFSET)? as usize;

    let payloads_code = read_u8(bytes, layout::HEADER_LEN)?;
    if payloads_code != layout::EVENT_PAYLOADS {
        return Err(ParseError::WrongEventCode {
            expected: layout::EVENT_PAYLOADS,
            found: payloads_code,
            offset: layout::HEADER_LEN,
        });
    }

    // The declared payloads size counts its own command byte.
    let table_len = (read_u8(bytes, layout::HEADER_LEN + 1)? as usize).saturating_sub(1);
    let table = slice(bytes, layout::HEADER_LEN + 2, table_len)?;

    let (game_start_size, game_end_size) = scan_payload_sizes(table)?;

    let game_start_offset = layout::HEADER_LEN + 2 + table_len;
    let game_start = slice(bytes, game_start_offset, game_start_size)?;
    if game_start[0] != layout::GAME_START {
        return Err(ParseError::WrongEventCode {
            expected: layout::GAME_START,
            found: game_start[0],
            offset: game_start_offset,
        });
    }

    let version = read_u32(game_start, layout::VERSION_OFFSET)?;
    if version < layout::MIN_VERSION {
        return Err(ParseError::UnsupportedVersion(version));
    }

    let is_teams = read_u8(game_start, layout::IS_TEAMS_OFFSET)? != 0;
    let stage_id = read_u16(game_start, layout::STAGE_OFFSET)?;

    let mut is_valid = Stage::try_from(stage_id).is_ok();

    let mut players: [Player; 4] = Default::default();

    for (index, player) in players.iter_mut().enumerate() {
        player.port = index as u8 + 1;
        player.player_type = read_u8(game_start, layout::PLAYER_TYPE_OFFSETS[index])?;

        if player.is_occupied() {
            player.external_character_id = read_u8(game_start, layout::EXTERNAL_CHARACTER_OFFSETS[index])?;
            player.costume_index = read_u8(game_start, layout::COSTUME_OFFSETS[index])?;
            player.stocks_remaining = read_u8(game_start, layout::STOCKS_OFFSETS[index])?;

            // A CPU on an occupied port or an out-of-domain character makes
            // the whole set unreportable, but we still decode everything.
            if player.player_type == layout::PLAYER_TYPE_CPU {
                is_valid = false;
            }

            if Character::try_from(player.external_character_id).is_err() {
                is_valid = false;
            }
        }

        let nametag = text::decode_field(slice(game_start, layout::NAMETAG_OFFSETS[index], layout::NAMETAG_WIDTH)?);
        if !nametag.is_empty() {
            player.nametag = nametag;
        }

        let display_name = text::decode_field(slice(
            game_start,
            layout::DISPLAY_NAME_OFFSETS[index],
            layout::DISPLAY_NAME_WIDTH,
        )?);
        if !display_name.is_empty() {
            player.display_name = display_name;
        }

        let connect_code = text::decode_field(slice(
            game_start,
            layout::CONNECT_CODE_OFFSETS[index],
            layout::CONNECT_CODE_WIDTH,
        )?);
        if !connect_code.is_empty() {
            player.connect_code = connect_code;
        }
    }

    // The game end record sits flush against the metadata trailer, so it's
    // located backwards from the end of the raw element.
    let metadata_offset = raw_len + layout::HEADER_LEN;
    let game_end_offset = metadata_offset
        .checked_sub(game_end_size)
        .ok_or(ParseError::Truncated {
            expected: game_end_size,
            available: raw_len,
        })?;
    let game_end = slice(bytes, game_end_offset, game_end_size)?;

    let game_end_ok = game_end[0] == layout::GAME_END
        && game_end.len() > layout::PLACEMENT_OFFSETS[3]
        && layout::GAME_END_METHODS.contains(&game_end[1]);

    if game_end_ok {
        for (index, player) in players.iter_mut().enumerate() {
            player.is_winner = game_end[layout::PLACEMENT_OFFSETS[index]] == 0;
        }
    } else {
        // Winners stay false across the board.
        is_valid = false;
    }

    let metadata_bytes = &bytes[metadata_offset..];
    if metadata_bytes.is_empty() {
        return Err(ParseError::EmptyMetadata);
    }

    let metadata = Metadata::decode(metadata_bytes).map_err(|error| ParseError::Metadata(error.to_string()))?;

    let start_at = metadata.start_at().unwrap_or_default().to_string();
    let last_frame = metadata.last_frame().unwrap_or(0);

    if last_frame < layout::MIN_LAST_FRAME {
        is_valid = false;
    }

    Ok(ReplayRecord {
        file_name,
        file_path,
        stage_id,
        is_teams,
        players,
        last_frame,
        start_at,
        is_valid,
    })
}

/// Scans the payload size table for the game start and game end sizes. The
/// declared u16 excludes the command byte, so actual size is declared + 1.
fn scan_payload_sizes(table: &[u8]) -> Result<(usize, usize)> {
    let mut game_start_size = 0;
    let mut game_end_size = 0;

    for entry in table.chunks_exact(3) {
        let size = u16::from_be_bytes([entry[1], entry[2]]) as usize + 1;

        match entry[0] {
            layout::GAME_START => game_start_size = size,
            layout::GAME_END => game_end_size = size,
            _ => {},
        }
    }

    if game_start_size == 0 {
        return Err(ParseError::EventSizeNotFound {
            event: layout::GAME_START,
        });
    }

    if game_end_size == 0 {
        return Err(ParseError::EventSizeNotFound { event: layout::GAME_END });
    }

    Ok((game_start_size, game_end_size))
}

fn slice(bytes: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    bytes.get(offset..offset + len).ok_or(ParseError::Truncated {
        expected: offset + len,
        available: bytes.len(),
    })
}

fn read_u8(bytes: &[u8], offset: usize) -> Result<u8> {
    Ok(slice(bytes, offset, 1)?[0])
}

fn read_u16(bytes: &[u8], offset: usize) -> Result<u16> {
    let bytes = slice(bytes, offset, 2)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32> {
    let bytes = slice(bytes, offset, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
