//! Memory layout constants for Melee running under Dolphin
//!
//! This module centralizes the hard-coded addresses and timing values used
//! for reading nametags. Addresses are logical (emulated console) addresses;
//! they are combined with the Dolphin module base address at read time.

/// Per-player nametag fields
pub mod nametag {
    /// Distance between consecutive player blocks
    pub const PLAYER_STRIDE: u64 = 0x4B0;

    /// Byte whose low nibble encodes the glyph count (player 1)
    pub const CHAR_COUNT: u64 = 0x80C4_5A13;

    /// First glyph block of the nametag (player 1)
    pub const GLYPH_BLOCK: u64 = 0x80C4_5D5F;

    /// Distance between glyph blocks inside one nametag
    pub const GLYPH_STRIDE: u64 = 3;

    /// Longest nametag the game can display
    pub const MAX_GLYPHS: usize = 4;

    /// Number of player slots
    pub const PLAYER_COUNT: usize = 4;
}

/// Addressing mode constants
pub mod addressing {
    /// Bias added to every logical address when Dolphin runs as a 64-bit process
    pub const EXTENDED_BIAS: u64 = 0x1_0000_0000;
}

/// Host process constants
pub mod process {
    /// Executable (and main module) name of the emulator
    pub const DOLPHIN_EXE: &str = "Dolphin.exe";
}

/// Timing constants for polling
pub mod timing {
    /// Poll ticks per second
    pub const POLL_RATE_HZ: u32 = 8;
}

/// Output naming
pub mod output {
    pub const FILE_PREFIX: &str = "player";
    pub const FILE_SUFFIX: &str = ".txt";
}
