use tracing::{debug, trace};

use super::{AddressTable, GateLayout, Nametag, PlayerSlot};
use crate::glyph;
use crate::memory::{MemoryReader, ReadMemory, RemoteAddress};

/// Reads player nametags out of game memory.
///
/// Read failures never abort extraction: a failed read ends the current
/// slot's decode and whatever was decoded so far is returned. A failed length
/// byte therefore looks the same as an empty nametag.
pub struct NametagExtractor<R> {
    reader: MemoryReader<R>,
    table: AddressTable,
}

impl<R: ReadMemory> NametagExtractor<R> {
    pub fn new(reader: MemoryReader<R>, table: AddressTable) -> Self {
        Self { reader, table }
    }

    pub fn reader(&self) -> &MemoryReader<R> {
        &self.reader
    }

    pub fn table(&self) -> &AddressTable {
        &self.table
    }

    /// Decode one slot's nametag.
    ///
    /// With an activity gate, both flag bytes are read first and decoding
    /// only continues if either of them is exactly 1.
    pub fn read_player(&mut self, slot: PlayerSlot) -> Nametag {
        if let Some(gate) = self.table.gate {
            if !self.is_nametagged(&gate, slot) {
                trace!("{}: not nametagged", slot);
                return Nametag::new();
            }
        }
        self.decode_nametag(slot)
    }

    fn is_nametagged(&mut self, gate: &GateLayout, slot: PlayerSlot) -> bool {
        let primary = self.read_flag(gate.primary.address(slot), slot);
        let secondary = self.read_flag(gate.secondary.address(slot), slot);
        primary || secondary
    }

    fn read_flag(&mut self, address: RemoteAddress, slot: PlayerSlot) -> bool {
        match self.reader.read_u8(address) {
            Ok(flag) => flag == 1,
            Err(e) => {
                debug!("{}: nametag flag unreadable: {}", slot, e);
                false
            }
        }
    }

    fn decode_nametag(&mut self, slot: PlayerSlot) -> Nametag {
        let mut nametag = Nametag::new();

        let length = match self.reader.read_u8(self.table.char_count.address(slot)) {
            Ok(length) => length,
            Err(e) => {
                debug!("{}: length byte unreadable: {}", slot, e);
                return nametag;
            }
        };

        for i in 0..glyph::glyph_count(length) {
            match self.reader.read_u16_be(self.table.glyph_address(slot, i)) {
                Ok(code) => nametag.push_glyph(glyph::decode(code)),
                Err(e) => {
                    debug!("{}: glyph {} unreadable: {}", slot, i, e);
                    break;
                }
            }
        }

        nametag
    }
}
