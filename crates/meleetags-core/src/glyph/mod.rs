//! Nametag glyph decoding.
//!
//! A nametag is stored as a length byte plus up to four 3-byte glyph
//! blocks. The first two bytes of each block are a big-endian glyph code.

mod table;

pub use table::GLYPH_TABLE;

/// Character for a glyph code, or `None` if the code is not in the table
pub fn lookup(code: u16) -> Option<&'static str> {
    GLYPH_TABLE
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|i| GLYPH_TABLE[i].1)
}

/// Decode a glyph code.
///
/// Unknown codes (uninitialized or garbage memory) decode to the empty
/// string rather than an error.
pub fn decode(code: u16) -> &'static str {
    lookup(code).unwrap_or("")
}

/// Number of glyphs encoded by a nametag length byte.
///
/// Only the low nibble matters, and it counts bytes of glyph data (three per
/// glyph): 3, 6, 9 and 12 map to one through four glyphs. Every other value
/// means no nametag.
pub fn glyph_count(length_byte: u8) -> usize {
    match length_byte & 0x0F {
        0x3 => 1,
        0x6 => 2,
        0x9 => 3,
        0xC => 4,
        _ => 0,
    }
}
