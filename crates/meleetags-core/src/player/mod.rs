//! Per-player nametag extraction.

mod extractor;
mod nametag;
mod slot;

pub use extractor::NametagExtractor;
pub use nametag::Nametag;
pub use slot::{
    AddressTable, AddressingMode, EXTENDED_TABLE, FieldLayout, GateLayout, PlayerSlot,
    STANDARD_TABLE,
};
