//! Batch operations over replay directories: scanning a folder into a list
//! of parsed records, and writing selected records back out with patched
//! display names and start times.
//!
//! Every file is an independent unit of work; nothing is shared or cached
//! between files, and a scan failure on one file never affects another.

pub mod scanner;
pub mod writer;

pub use scanner::{scan, REPLAY_EXTENSION};
pub use writer::{write_replays, WriteError, WriteRequest};
