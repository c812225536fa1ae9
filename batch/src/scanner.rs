//! Directory scanning for replay files.
//!
//! Each candidate file is parsed independently; a file that fails the
//! codec's structural checks simply doesn't appear in the results. One bad
//! file never affects the rest of the batch.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use slp_codec::{parser, ReplayRecord};

/// The file extension replay files are saved with.
pub const REPLAY_EXTENSION: &str = "slp";

/// Enumerates `directory` and parses every replay file in it, preserving
/// enumeration order. Per-file failures are swallowed (and logged at debug);
/// only a failure to read the directory itself is an error.
pub fn scan(directory: &Path) -> io::Result<Vec<ReplayRecord>> {
    let mut records = Vec::new();

    for entry in fs::read_dir(directory)? {
        let path = entry?.path();

        if path.extension().and_then(OsStr::to_str) != Some(REPLAY_EXTENSION) || !path.is_file() {
            continue;
        }

        match parser::parse_replay(&path) {
            Ok(record) => records.push(record),

            Err(error) => {
                tracing::debug!(?error, ?path, "Skipping replay that failed structural checks");
            },
        }
    }

    Ok(records)
}
