use std::fmt;

/// A decoded nametag: up to four glyphs, possibly empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nametag {
    text: String,
    glyphs: usize,
}

impl Nametag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decoded glyph. An empty string (unknown code) still counts
    /// as a glyph position but adds no text.
    pub fn push_glyph(&mut self, glyph: &str) {
        self.text.push_str(glyph);
        self.glyphs += 1;
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of glyph blocks that were decoded
    pub fn glyph_len(&self) -> usize {
        self.glyphs
    }
}

impl fmt::Display for Nametag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
