use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

use crate::memory::RemoteAddress;
use crate::memory::layout::{addressing, nametag, output};

/// One of the four player ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerSlot(u8);

impl PlayerSlot {
    /// All slots in polling order
    pub const ALL: [PlayerSlot; nametag::PLAYER_COUNT] = [Self(0), Self(1), Self(2), Self(3)];

    pub fn new(index: usize) -> Option<Self> {
        (index < nametag::PLAYER_COUNT).then_some(Self(index as u8))
    }

    /// Zero-based index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// One-based port number as shown in game
    pub fn number(self) -> usize {
        self.index() + 1
    }

    /// Output name the slot's nametag is persisted under (e.g. `player1.txt`)
    pub fn output_name(self) -> String {
        format!("{}{}{}", output::FILE_PREFIX, self.number(), output::FILE_SUFFIX)
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}

/// A per-player field: the address for player 1 plus the distance between players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub base: u64,
    pub stride: u64,
}

impl FieldLayout {
    pub const fn new(base: u64, stride: u64) -> Self {
        Self { base, stride }
    }

    pub fn address(&self, slot: PlayerSlot) -> RemoteAddress {
        RemoteAddress::new(self.base + slot.index() as u64 * self.stride)
    }

    pub const fn biased(self, bias: u64) -> Self {
        Self {
            base: self.base + bias,
            stride: self.stride,
        }
    }
}

/// Two independent "is nametagged" flag bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateLayout {
    pub primary: FieldLayout,
    pub secondary: FieldLayout,
}

impl GateLayout {
    pub const fn biased(self, bias: u64) -> Self {
        Self {
            primary: self.primary.biased(bias),
            secondary: self.secondary.biased(bias),
        }
    }
}

/// Every address the extractor touches, for one addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressTable {
    /// Length byte; low nibble encodes the glyph count
    pub char_count: FieldLayout,
    /// First glyph block of the nametag
    pub glyph_block: FieldLayout,
    /// Activity flags checked before decoding; `None` decodes unconditionally
    pub gate: Option<GateLayout>,
}

impl AddressTable {
    pub const fn with_gate(self, gate: GateLayout) -> Self {
        Self {
            gate: Some(gate),
            ..self
        }
    }

    /// Same table with `bias` added to every field
    pub const fn biased(self, bias: u64) -> Self {
        Self {
            char_count: self.char_count.biased(bias),
            glyph_block: self.glyph_block.biased(bias),
            gate: match self.gate {
                Some(gate) => Some(gate.biased(bias)),
                None => None,
            },
        }
    }

    /// Address of the `glyph`-th block (0-based) of a slot's nametag
    pub fn glyph_address(&self, slot: PlayerSlot, glyph: usize) -> RemoteAddress {
        self.glyph_block
            .address(slot)
            .offset(glyph as u64 * nametag::GLYPH_STRIDE)
    }
}

/// Layout for 32-bit Dolphin
pub const STANDARD_TABLE: AddressTable = AddressTable {
    char_count: FieldLayout::new(nametag::CHAR_COUNT, nametag::PLAYER_STRIDE),
    glyph_block: FieldLayout::new(nametag::GLYPH_BLOCK, nametag::PLAYER_STRIDE),
    gate: None,
};

/// Layout for 64-bit Dolphin
pub const EXTENDED_TABLE: AddressTable = STANDARD_TABLE.biased(addressing::EXTENDED_BIAS);

/// How the emulator maps console memory into its own address space
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr,
)]
pub enum AddressingMode {
    #[strum(serialize = "32-bit")]
    Standard,
    #[default]
    #[strum(serialize = "64-bit")]
    Extended,
}

impl AddressingMode {
    pub fn from_x64(x64: bool) -> Self {
        if x64 { Self::Extended } else { Self::Standard }
    }

    pub fn table(self) -> &'static AddressTable {
        match self {
            Self::Standard => &STANDARD_TABLE,
            Self::Extended => &EXTENDED_TABLE,
        }
    }
}
