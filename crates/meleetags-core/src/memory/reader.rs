use tracing::trace;

use super::RemoteAddress;
use crate::error::{Error, Result};

/// Size of the scratch buffer every read fills
pub const SCRATCH_SIZE: usize = 4;

/// Raw access to another process's memory.
///
/// Copies up to `buf.len()` bytes starting at the absolute `address` and
/// returns how many bytes were actually transferred. Zero means nothing could
/// be read; anything less than `buf.len()` is a partial read.
pub trait ReadMemory {
    fn read_raw(&self, address: RemoteAddress, buf: &mut [u8]) -> usize;
}

impl<T: ReadMemory + ?Sized> ReadMemory for &T {
    fn read_raw(&self, address: RemoteAddress, buf: &mut [u8]) -> usize {
        (**self).read_raw(address, buf)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threshold {
    /// Every requested byte must arrive
    Strict,
    /// At least one byte must arrive
    Lenient,
}

/// Reads a target process through a single reusable scratch buffer.
///
/// Logical addresses are relative to the module base address given at
/// construction. A returned slice borrows the scratch buffer, so it is only
/// valid until the next read; the borrow checker enforces that reads on one
/// reader are strictly sequential.
///
/// A failed read leaves the buffer holding the bytes of the last successful
/// read and never hands out partially transferred data as a strict result.
pub struct MemoryReader<R> {
    source: R,
    base_address: u64,
    buffer: [u8; SCRATCH_SIZE],
}

impl<R: ReadMemory> MemoryReader<R> {
    pub fn new(source: R, base_address: u64) -> Self {
        Self {
            source,
            base_address,
            buffer: [0; SCRATCH_SIZE],
        }
    }

    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    /// Bytes of the last successful read
    pub fn buffer(&self) -> &[u8; SCRATCH_SIZE] {
        &self.buffer
    }

    /// Absolute address for a logical one
    pub fn resolve(&self, address: RemoteAddress) -> RemoteAddress {
        address.offset(self.base_address)
    }

    /// Read the full scratch buffer at `address + base`.
    pub fn read(&mut self, address: RemoteAddress) -> Result<&[u8]> {
        let target = self.resolve(address);
        self.transfer(target, Threshold::Strict)?;
        Ok(&self.buffer[..])
    }

    /// Read at `address + base`, accepting any non-empty transfer.
    ///
    /// Returns only the bytes that were transferred.
    pub fn read_lenient(&mut self, address: RemoteAddress) -> Result<&[u8]> {
        let target = self.resolve(address);
        let transferred = self.transfer(target, Threshold::Lenient)?;
        Ok(&self.buffer[..transferred])
    }

    /// Read at `address + base`, then, if `offset` is given, treat the result
    /// as a little-endian 32-bit pointer `P` and read again at absolute `P + offset`.
    pub fn read_with_offset(
        &mut self,
        address: RemoteAddress,
        offset: Option<u64>,
    ) -> Result<&[u8]> {
        let target = self.resolve(address);
        let transferred = self.transfer(target, Threshold::Strict)?;
        if let Some(offset) = offset {
            let pointer = self.pointer_target(transferred, offset);
            self.transfer(pointer, Threshold::Strict)?;
        }
        Ok(&self.buffer[..])
    }

    /// Lenient counterpart of [`read_with_offset`](Self::read_with_offset).
    ///
    /// A partially transferred pointer is zero-extended from the bytes that
    /// actually arrived.
    pub fn read_lenient_with_offset(
        &mut self,
        address: RemoteAddress,
        offset: Option<u64>,
    ) -> Result<&[u8]> {
        let target = self.resolve(address);
        let mut transferred = self.transfer(target, Threshold::Lenient)?;
        if let Some(offset) = offset {
            let pointer = self.pointer_target(transferred, offset);
            transferred = self.transfer(pointer, Threshold::Lenient)?;
        }
        Ok(&self.buffer[..transferred])
    }

    /// First byte of a strict read
    pub fn read_u8(&mut self, address: RemoteAddress) -> Result<u8> {
        let bytes = self.read(address)?;
        Ok(bytes[0])
    }

    /// Big-endian u16 from the first two bytes of a strict read
    pub fn read_u16_be(&mut self, address: RemoteAddress) -> Result<u16> {
        let bytes = self.read(address)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn pointer_target(&self, transferred: usize, offset: u64) -> RemoteAddress {
        let mut raw = [0u8; SCRATCH_SIZE];
        raw[..transferred].copy_from_slice(&self.buffer[..transferred]);
        let pointer = u64::from(u32::from_le_bytes(raw));
        RemoteAddress::new(pointer).offset(offset)
    }

    fn transfer(&mut self, target: RemoteAddress, threshold: Threshold) -> Result<usize> {
        let mut scratch = [0u8; SCRATCH_SIZE];
        let transferred = self.source.read_raw(target, &mut scratch).min(SCRATCH_SIZE);

        let ok = match threshold {
            Threshold::Strict => transferred == SCRATCH_SIZE,
            Threshold::Lenient => transferred > 0,
        };
        if !ok {
            trace!(
                "Read at {} failed: {}/{} bytes ({:?})",
                target, transferred, SCRATCH_SIZE, threshold
            );
            return Err(Error::ShortRead {
                address: target.value(),
                requested: SCRATCH_SIZE,
                transferred,
            });
        }

        self.buffer[..transferred].copy_from_slice(&scratch[..transferred]);
        Ok(transferred)
    }
}
