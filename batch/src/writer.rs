//! The container patch-writer.
//!
//! Writes each selected replay back out byte-for-byte, except for the byte
//! ranges it deliberately overwrites: per-port display name fields in the
//! game start record, and the `startAt` string in the metadata trailer. The
//! metadata container's generic encoding isn't guaranteed to reproduce a
//! stable byte layout through a decode/re-encode round trip, so both patches
//! work in place on the raw bytes and never change the container's size.

use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use slp_codec::{layout, text, ubjson, ReplayRecord};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{what} count ({actual}) does not match the source count ({expected})")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("source replay {path:?} is malformed: {reason}")]
    MalformedSource { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where and how a batch of replays should be written.
#[derive(Debug, Default)]
pub struct WriteRequest {
    /// The destination directory.
    pub directory: PathBuf,

    /// Optional subdirectory under `directory`, sanitized before use.
    pub subdirectory: Option<String>,

    /// Optional per-record destination file names; when absent, each source
    /// file's own name is reused. Must match the source count.
    pub file_names: Option<Vec<String>>,

    /// Optional per-record replacement `startAt` strings. Must match the
    /// source count.
    pub start_times: Option<Vec<String>>,

    /// When set, each port's non-empty override display name is written
    /// into the game start record.
    pub apply_display_name_overrides: bool,
}

/// Writes every source record to the destination described by `request`.
///
/// Count preconditions are checked before any file is touched. Per-file I/O
/// errors fail the whole batch; files already written are not rolled back.
pub fn write_replays(sources: &[ReplayRecord], request: &WriteRequest) -> Result<(), WriteError> {
    if let Some(file_names) = &request.file_names {
        if file_names.len() != sources.len() {
            return Err(WriteError::CountMismatch {
                what: "file name",
                expected: sources.len(),
                actual: file_names.len(),
            });
        }
    }

    if let Some(start_times) = &request.start_times {
        if start_times.len() != sources.len() {
            return Err(WriteError::CountMismatch {
                what: "start time",
                expected: sources.len(),
                actual: start_times.len(),
            });
        }
    }

    let mut directory = request.directory.clone();
    if let Some(subdirectory) = &request.subdirectory {
        let subdirectory = sanitize(subdirectory);
        if !subdirectory.is_empty() {
            directory.push(subdirectory);
        }
    }
    fs::create_dir_all(&directory)?;

    for (index, record) in sources.iter().enumerate() {
        let file_name = match &request.file_names {
            Some(file_names) => sanitize(&file_names[index]),
            None => record.file_name.clone(),
        };

        let start_time = request.start_times.as_ref().map(|times| times[index].as_str());

        write_one(
            record,
            &directory.join(file_name),
            start_time,
            request.apply_display_name_overrides,
        )?;
    }

    Ok(())
}

/// Copies one replay from its source path to `destination`, patching the
/// in-memory copy where asked.
fn write_one(
    record: &ReplayRecord,
    destination: &Path,
    start_time: Option<&str>,
    apply_overrides: bool,
) -> Result<(), WriteError> {
    let mut source = fs::File::open(&record.file_path)?;

    let mut header = [0u8; layout::HEADER_LEN];
    source.read_exact(&mut header)?;

    let raw_len = u32::from_be_bytes([header[11], header[12], header[13], header[14]]) as usize;
    let mut raw = vec![0u8; raw_len];
    source.read_exact(&mut raw)?;

    let mut metadata = Vec::new();
    source.read_to_end(&mut metadata)?;
    drop(source);

    if apply_overrides {
        patch_display_names(&mut raw, record).map_err(|reason| WriteError::MalformedSource {
            path: record.file_path.clone(),
            reason,
        })?;
    }

    if let Some(start_time) = start_time {
        patch_start_at(&mut metadata, start_time);
    }

    let mut writer = BufWriter::new(fs::File::create(destination)?);
    writer.write_all(&header)?;
    writer.write_all(&raw)?;
    writer.write_all(&metadata)?;
    writer.flush()?;

    Ok(())
}

/// Overwrites each overridden port's display name field inside the raw
/// element, re-deriving the game start offset exactly the way the parser
/// does (shared offset tables, same table walk).
fn patch_display_names(raw: &mut [u8], record: &ReplayRecord) -> Result<(), String> {
    if raw.first() != Some(&layout::EVENT_PAYLOADS) {
        return Err("raw element does not open with the event payloads declaration".into());
    }

    let table_len = (*raw.get(1).ok_or("raw element is missing its size table")? as usize).saturating_sub(1);

    let game_start = raw
        .get_mut(2 + table_len..)
        .filter(|record| record.first() == Some(&layout::GAME_START))
        .ok_or("raw element does not hold a game start record after the size table")?;

    for (index, player) in record.players.iter().enumerate() {
        let name = &player.overrides.display_name;
        if name.is_empty() {
            continue;
        }

        let offset = layout::DISPLAY_NAME_OFFSETS[index];
        let field = game_start
            .get_mut(offset..offset + layout::DISPLAY_NAME_WIDTH)
            .ok_or("game start record is too short for its display name fields")?;

        let mut encoded = text::encode_field(name);
        encoded.truncate(layout::DISPLAY_NAME_WIDTH);

        // Fixed width, NUL padded, total size unchanged.
        field.fill(0);
        field[..encoded.len()].copy_from_slice(&encoded);
    }

    Ok(())
}

/// Locates the `startAt` field by tag search and overwrites its bytes in
/// place. A missing tag or a width mismatch is a silent no-op, not an error;
/// there's simply nothing safe to patch in that case.
fn patch_start_at(metadata: &mut [u8], replacement: &str) {
    let replacement = replacement.as_bytes();

    let Some(after_tag) = ubjson::find_tag(metadata, &layout::START_AT_TAG) else {
        tracing::debug!("Metadata carries no startAt tag, leaving trailer untouched");
        return;
    };

    let Some(&length) = metadata.get(after_tag) else {
        return;
    };

    if length as usize != layout::START_AT_WIDTH || replacement.len() != layout::START_AT_WIDTH {
        tracing::debug!(
            field_width = length,
            replacement_len = replacement.len(),
            "startAt width mismatch, leaving trailer untouched"
        );
        return;
    }

    if let Some(window) = metadata.get_mut(after_tag + 1..after_tag + 1 + layout::START_AT_WIDTH) {
        window.copy_from_slice(replacement);
    }
}

/// Strips filesystem-unsafe characters from a user-supplied path component.
fn sanitize(component: &str) -> String {
    component
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') && !c.is_control())
        .collect()
}
