//! Minimal UBJSON decoding for the metadata trailer.
//!
//! The trailer at the end of every replay file is the tail of the outer
//! UBJSON object: a `metadata` key, its object value, and the outer closing
//! brace. We decode it into a generic `serde_json::Value` tree and expose the
//! two fields the codec actually needs, plus a raw tag search used by the
//! patch-writer so patching never requires a full decode/re-encode cycle.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UbjsonError {
    #[error("unexpected end of metadata at offset {0}")]
    UnexpectedEof(usize),

    #[error("unexpected marker {marker:#04x} at offset {offset}")]
    UnexpectedMarker { marker: u8, offset: usize },

    #[error("metadata trailer does not open with a `metadata` key")]
    MissingMetadataKey,
}

/// The decoded metadata trailer.
#[derive(Debug)]
pub struct Metadata {
    root: Value,
}

impl Metadata {
    /// Decodes the raw trailer bytes. The trailer must open with the
    /// `metadata` key of the outer container object.
    pub fn decode(bytes: &[u8]) -> Result<Self, UbjsonError> {
        let mut reader = Reader { bytes, pos: 0 };

        let key_marker = reader.next()?;
        let key = reader.read_key(key_marker)?;
        if key != "metadata" {
            return Err(UbjsonError::MissingMetadataKey);
        }

        let value_marker = reader.next()?;
        let root = reader.read_value(value_marker)?;

        // Whatever follows is the outer object's closing brace; we don't
        // need to consume it to have a complete tree.
        Ok(Self { root })
    }

    /// The recorded start timestamp, if the trailer carries one.
    pub fn start_at(&self) -> Option<&str> {
        self.root.get("startAt").and_then(Value::as_str)
    }

    /// The final frame counter, if the trailer carries one.
    pub fn last_frame(&self) -> Option<i32> {
        self.root
            .get("lastFrame")
            .and_then(Value::as_i64)
            .map(|frame| frame as i32)
    }

    /// The full key/value tree, for collaborators that want more than the
    /// two fields above.
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Finds the first occurrence of `tag` in `haystack` and returns the offset
/// of the byte immediately after it.
pub fn find_tag(haystack: &[u8], tag: &[u8]) -> Option<usize> {
    haystack
        .windows(tag.len())
        .position(|window| window == tag)
        .map(|position| position + tag.len())
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn next(&mut self) -> Result<u8, UbjsonError> {
        let byte = *self.bytes.get(self.pos).ok_or(UbjsonError::UnexpectedEof(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }

    fn peek(&self) -> Result<u8, UbjsonError> {
        self.bytes.get(self.pos).copied().ok_or(UbjsonError::UnexpectedEof(self.pos))
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], UbjsonError> {
        if self.pos + count > self.bytes.len() {
            return Err(UbjsonError::UnexpectedEof(self.pos));
        }

        let slice = &self.bytes[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    /// Reads an integer value for the given type marker.
    fn read_int(&mut self, marker: u8) -> Result<i64, UbjsonError> {
        match marker {
            b'i' => Ok(i8::from_be_bytes([self.next()?]) as i64),
            b'U' => Ok(self.next()? as i64),
            b'I' => {
                let bytes = self.take(2)?;
                Ok(i16::from_be_bytes([bytes[0], bytes[1]]) as i64)
            },
            b'l' => {
                let bytes = self.take(4)?;
                Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64)
            },
            b'L' => {
                let bytes = self.take(8)?;
                let mut buf = [0u8; 8];
                buf.copy_from_slice(bytes);
                Ok(i64::from_be_bytes(buf))
            },
            marker => Err(UbjsonError::UnexpectedMarker {
                marker,
                offset: self.pos - 1,
            }),
        }
    }

    /// Reads a length-prefixed string body (the marker for the length has
    /// already been consumed). Name fields inside the metadata may carry
    /// non-UTF-8 bytes, so we decode lossily rather than reject the file.
    fn read_key(&mut self, length_marker: u8) -> Result<String, UbjsonError> {
        let length = self.read_int(length_marker)?.max(0) as usize;
        let bytes = self.take(length)?;

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn read_value(&mut self, marker: u8) -> Result<Value, UbjsonError> {
        match marker {
            b'i' | b'U' | b'I' | b'l' | b'L' => Ok(Value::from(self.read_int(marker)?)),
            b'd' => {
                let bytes = self.take(4)?;
                let mut buf = [0u8; 4];
                buf.copy_from_slice(bytes);
                Ok(Value::from(f32::from_be_bytes(buf) as f64))
            },
            b'D' => {
                let bytes = self.take(8)?;
                let mut buf = [0u8; 8];
                buf.copy_from_slice(bytes);
                Ok(Value::from(f64::from_be_bytes(buf)))
            },
            b'S' => {
                let length_marker = self.next()?;
                Ok(Value::from(self.read_key(length_marker)?))
            },
            b'C' => Ok(Value::from((self.next()? as char).to_string())),
            b'T' => Ok(Value::from(true)),
            b'F' => Ok(Value::from(false)),
            b'Z' => Ok(Value::Null),
            b'{' => self.read_object(),
            b'[' => self.read_array(),
            marker => Err(UbjsonError::UnexpectedMarker {
                marker,
                offset: self.pos - 1,
            }),
        }
    }

    fn read_object(&mut self) -> Result<Value, UbjsonError> {
        let mut map = Map::new();

        loop {
            let marker = self.next()?;

            match marker {
                b'}' => return Ok(Value::Object(map)),
                b'N' => continue,
                length_marker => {
                    let key = self.read_key(length_marker)?;
                    let value_marker = self.next()?;
                    let value = self.read_value(value_marker)?;
                    map.insert(key, value);
                },
            }
        }
    }

    fn read_array(&mut self) -> Result<Value, UbjsonError> {
        let mut items = Vec::new();

        while self.peek()? != b']' {
            let marker = self.next()?;
            if marker == b'N' {
                continue;
            }

            items.push(self.read_value(marker)?);
        }

        self.pos += 1;
        Ok(Value::Array(items))
    }
}
