//! The parsed, validated view of one replay file.
//!
//! These types are what the desktop UI and bracket-sync collaborators
//! consume, so they serialize with the camelCase field names that side of
//! the fence expects. The codec never mutates a record after construction;
//! only the `overrides` sub-records are written to from outside, and the
//! patch-writer re-reads them at write time.

use std::path::PathBuf;

/// Per-player fields populated by external collaborators (bracket sync,
/// manual annotation). Starts empty on every freshly parsed record.
#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOverrides {
    pub display_name: String,
    pub entrant_id: Option<i64>,
    pub participant_id: Option<i64>,
}

/// One hardware port slot of the game start record. Ports that are empty or
/// unplugged keep their defaults.
#[derive(Clone, Debug, Default, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Hardware port, 1 through 4.
    pub port: u8,

    /// 0 = human, 1 = CPU, anything else = empty slot.
    pub player_type: u8,

    pub external_character_id: u8,
    pub costume_index: u8,

    pub nametag: String,
    pub display_name: String,
    pub connect_code: String,

    pub stocks_remaining: u8,
    pub is_winner: bool,

    pub overrides: PlayerOverrides,
}

impl Player {
    /// Whether this port had anyone (human or CPU) plugged in.
    pub fn is_occupied(&self) -> bool {
        self.player_type == crate::layout::PLAYER_TYPE_HUMAN || self.player_type == crate::layout::PLAYER_TYPE_CPU
    }
}

/// The parsed, validated view of one file. Built once per successful
/// structural parse; files that fail structural checks yield no record.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayRecord {
    pub file_name: String,
    pub file_path: PathBuf,

    pub stage_id: u16,
    pub is_teams: bool,

    /// One slot per hardware port; array index is `port - 1`.
    pub players: [Player; 4],

    pub last_frame: i32,
    pub start_at: String,

    /// False when the stage is illegal, an occupied port is CPU-controlled,
    /// a character id is out of domain, the game end record is malformed, or
    /// the game is shorter than the minimum duration. Invalid records are
    /// still returned so callers can show why.
    pub is_valid: bool,
}
