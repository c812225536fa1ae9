//! Byte layout of the replay container.
//!
//! Every offset in here is part of the external file format contract, and the
//! per-port tables are shared by both the parser and the patch-writer so that
//! the two can never disagree about where a field lives. All multi-byte
//! integers in the container are big-endian.

/// The fixed magic prefix at the very start of every replay file. This is the
/// opening of the outer UBJSON object: an object key named `raw` whose value
/// is a `[$U#l`-typed (length-prefixed u8) array holding the event stream.
pub const RAW_MAGIC: [u8; 11] = [0x7B, 0x55, 0x03, b'r', b'a', b'w', 0x5B, 0x24, 0x55, 0x23, 0x6C];

/// Offset of the 4-byte big-endian raw element length.
pub const RAW_LENGTH_OFFSET: usize = 11;

/// Total size of the file header: magic prefix plus raw element length.
pub const HEADER_LEN: usize = 15;

/// Command byte of the event payloads declaration that opens the raw element.
pub const EVENT_PAYLOADS: u8 = 0x35;

/// Command byte of the game start event.
pub const GAME_START: u8 = 0x36;

/// Command byte of the game end event.
pub const GAME_END: u8 = 0x39;

/// The lowest replay format version that carries display name and connect
/// code fields in the game start record. Encoded as `major.minor.build.0`
/// for direct comparison against the on-disk u32.
pub const MIN_VERSION: u32 = 0x03_09_00_00;

/// Offsets inside the game start record (relative to its command byte).
pub const VERSION_OFFSET: usize = 0x01;
pub const IS_TEAMS_OFFSET: usize = 0x0D;
pub const STAGE_OFFSET: usize = 0x13;

/// Per-port offsets into the game start record, indexed by `port - 1`.
/// The per-port stride inside the game info block is 0x24 bytes.
pub const PLAYER_TYPE_OFFSETS: [usize; 4] = [0x66, 0x8A, 0xAE, 0xD2];
pub const EXTERNAL_CHARACTER_OFFSETS: [usize; 4] = [0x65, 0x89, 0xAD, 0xD1];
pub const STOCKS_OFFSETS: [usize; 4] = [0x67, 0x8B, 0xAF, 0xD3];
pub const COSTUME_OFFSETS: [usize; 4] = [0x68, 0x8C, 0xB0, 0xD4];

/// Fixed-width Shift-JIS text fields, one per port.
pub const NAMETAG_OFFSETS: [usize; 4] = [0x161, 0x171, 0x181, 0x191];
pub const NAMETAG_WIDTH: usize = 0x10;

pub const DISPLAY_NAME_OFFSETS: [usize; 4] = [0x1A5, 0x1C4, 0x1E3, 0x202];
pub const DISPLAY_NAME_WIDTH: usize = 0x1F;

pub const CONNECT_CODE_OFFSETS: [usize; 4] = [0x221, 0x22B, 0x235, 0x23F];
pub const CONNECT_CODE_WIDTH: usize = 0x0A;

/// Player type values found in the game start record.
pub const PLAYER_TYPE_HUMAN: u8 = 0;
pub const PLAYER_TYPE_CPU: u8 = 1;

/// End-method values we accept in the second byte of the game end record:
/// TIME!, GAME!, resolved, and no-contest.
pub const GAME_END_METHODS: [u8; 4] = [1, 2, 3, 7];

/// Per-port placement byte offsets inside the game end record. A placement
/// of zero marks the winning port.
pub const PLACEMENT_OFFSETS: [usize; 4] = [0x03, 0x04, 0x05, 0x06];

/// Games shorter than this many frames are warm-up or handwarmer noise, not
/// reportable sets.
pub const MIN_LAST_FRAME: i32 = 3596;

/// The UBJSON key sequence for the `startAt` field inside the metadata
/// trailer: a u8-length key named `startAt` followed by the `S` and `U`
/// markers of its string value. The byte after this tag is the string length.
pub const START_AT_TAG: [u8; 11] = [0x55, 0x07, b's', b't', b'a', b'r', b't', b'A', b't', 0x53, 0x55];

/// The only `startAt` width the patch-writer will overwrite in place.
pub const START_AT_WIDTH: usize = 24;
