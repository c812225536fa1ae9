//! The replay container codec: parses Slippi `.slp` files into validated
//! records, and supplies the shared byte layout and text codec that the
//! patch-writer uses to rewrite name and timestamp fields in place.
//!
//! Every parse is a pure function of the input bytes; the crate holds no
//! state or caches between calls. Structural failures (bad magic, short
//! reads, missing event declarations) are [`ParseError`]s and produce no
//! record; semantic problems produce a record with `is_valid = false`.

pub mod error;
pub mod game;
pub mod layout;
pub mod parser;
pub mod record;
pub mod text;
pub mod ubjson;

pub use error::ParseError;
pub use parser::{parse_bytes, parse_replay};
pub use record::{Player, PlayerOverrides, ReplayRecord};
