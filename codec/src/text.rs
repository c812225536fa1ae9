//! Legacy double-byte text codec for the fixed-width name fields.
//!
//! Name fields in the game start record are NUL-padded Shift-JIS. Melee's
//! proportional font silently drops most single-byte ASCII punctuation, so
//! when we encode a name for writing we rewrite those code points into their
//! full-width Shift-JIS equivalents, which the font does render. Decoding
//! never reverses the substitution.

use encoding_rs::SHIFT_JIS;

/// Single-byte ASCII punctuation the in-game font cannot draw, mapped to the
/// visually equivalent full-width Shift-JIS sequence. The domain is strictly
/// single-byte codes; trail bytes of double-byte sequences are never matched.
const FULL_WIDTH_SUBSTITUTIONS: [(u8, [u8; 2]); 27] = [
    (b'!', [0x81, 0x49]),
    (b'"', [0x81, 0x68]),
    (b'#', [0x81, 0x94]),
    (b'$', [0x81, 0x90]),
    (b'%', [0x81, 0x93]),
    (b'&', [0x81, 0x95]),
    (b'(', [0x81, 0x69]),
    (b')', [0x81, 0x6A]),
    (b'*', [0x81, 0x96]),
    (b'+', [0x81, 0x7B]),
    (b':', [0x81, 0x46]),
    (b';', [0x81, 0x47]),
    (b'<', [0x81, 0x83]),
    (b'=', [0x81, 0x81]),
    (b'>', [0x81, 0x84]),
    (b'?', [0x81, 0x48]),
    (b'@', [0x81, 0x97]),
    (b'[', [0x81, 0x6D]),
    (b'\\', [0x81, 0x5F]),
    (b']', [0x81, 0x6E]),
    (b'^', [0x81, 0x4F]),
    (b'_', [0x81, 0x51]),
    (b'`', [0x81, 0x4D]),
    (b'{', [0x81, 0x6F]),
    (b'|', [0x81, 0x62]),
    (b'}', [0x81, 0x70]),
    (b'~', [0x81, 0x60]),
];

fn substitution(byte: u8) -> Option<[u8; 2]> {
    FULL_WIDTH_SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == byte)
        .map(|(_, to)| *to)
}

/// Lead bytes of two-byte Shift-JIS sequences. Their trail byte may fall in
/// the ASCII range, so the substitution pass has to step over both.
fn is_lead_byte(byte: u8) -> bool {
    matches!(byte, 0x81..=0x9F | 0xE0..=0xFC)
}

/// Decodes a fixed-width name field window. A NUL terminates the string and
/// everything after it is padding; a leading NUL means the field is empty.
pub fn decode_field(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    if end == 0 {
        return String::new();
    }

    let (decoded, _, _) = SHIFT_JIS.decode(&bytes[..end]);
    decoded.into_owned()
}

/// Encodes `text` into the legacy charset, applying the full-width
/// substitution table to any single-byte punctuation the font would drop.
///
/// The result is unpadded and unbounded; callers truncate and NUL-pad to the
/// destination field width before copying into the container.
pub fn encode_field(text: &str) -> Vec<u8> {
    let (encoded, _, _) = SHIFT_JIS.encode(text);
    let encoded = encoded.as_ref();

    let mut out = Vec::with_capacity(encoded.len() * 2);
    let mut index = 0;

    while index < encoded.len() {
        let byte = encoded[index];

        if is_lead_byte(byte) && index + 1 < encoded.len() {
            out.push(byte);
            out.push(encoded[index + 1]);
            index += 2;
            continue;
        }

        match substitution(byte) {
            Some(pair) => out.extend_from_slice(&pair),
            None => out.push(byte),
        }

        index += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_stops_at_nul() {
        let field = [b'M', b'a', b'n', b'g', 0x00, b'x', b'x', 0x00];
        assert_eq!(decode_field(&field), "Mang");
    }

    #[test]
    fn decode_empty_on_leading_nul() {
        let field = [0x00, b'j', b'u', b'n', b'k'];
        assert_eq!(decode_field(&field), "");
    }

    #[test]
    fn decode_handles_double_byte_text() {
        // "あい" in Shift-JIS.
        let field = [0x82, 0xA0, 0x82, 0xA2, 0x00, 0x00];
        assert_eq!(decode_field(&field), "あい");
    }

    #[test]
    fn encode_passes_plain_ascii_through() {
        assert_eq!(encode_field("Zain 44"), b"Zain 44");
    }

    #[test]
    fn encode_substitutes_hash_mark() {
        assert_eq!(encode_field("A#1"), vec![b'A', 0x81, 0x94, b'1']);
    }

    #[test]
    fn encode_substitutes_parentheses() {
        assert_eq!(encode_field("(a)"), vec![0x81, 0x69, b'a', 0x81, 0x6A]);
    }

    #[test]
    fn encode_leaves_double_byte_sequences_alone() {
        // The long vowel mark 0x815B has a trail byte that collides with
        // ASCII '[' and must not be rewritten a second time.
        let encoded = encode_field("ー");
        assert_eq!(encoded, vec![0x81, 0x5B]);
    }

    #[test]
    fn substitution_table_covers_expected_domain() {
        for (from, _) in FULL_WIDTH_SUBSTITUTIONS {
            assert!((0x21..=0x7E).contains(&from));
        }
        assert_eq!(FULL_WIDTH_SUBSTITUTIONS.len(), 27);
    }

    #[test]
    fn roundtrip_without_punctuation_is_identity() {
        for name in ["Mango", "ぷ", "KJH 01", "あいう"] {
            let encoded = encode_field(name);
            assert_eq!(decode_field(&encoded), *name);
        }
    }
}
