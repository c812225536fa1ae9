//! Structural parse failures.
//!
//! A file that trips any of these never becomes a [`crate::ReplayRecord`] at
//! all, which is distinct from a record that parses but carries
//! `is_valid = false`. The batch scanner swallows these per file.

use thiserror::Error;

/// Reasons a file can be rejected outright by the container parser.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("file does not start with the raw element magic")]
    BadMagic,

    #[error("truncated container: needed {expected} bytes, had {available}")]
    Truncated { expected: usize, available: usize },

    #[error("expected event code {expected:#04x} at offset {offset}, found {found:#04x}")]
    WrongEventCode {
        expected: u8,
        found: u8,
        offset: usize,
    },

    #[error("payload size table never declares event {event:#04x}")]
    EventSizeNotFound { event: u8 },

    #[error("replay version {0:#010x} predates display name support")]
    UnsupportedVersion(u32),

    #[error("metadata trailer is empty")]
    EmptyMetadata,

    #[error("metadata trailer is not decodable UBJSON: {0}")]
    Metadata(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
