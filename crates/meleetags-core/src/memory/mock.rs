//! In-memory stand-in for a target process.
//!
//! Bytes are stored sparsely by absolute address; a raw read copies
//! contiguous bytes until it reaches an unmapped address, which makes
//! partial transfers easy to set up. Every raw read request is logged so
//! tests can assert how many reads happened and where.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{ReadMemory, RemoteAddress};

pub struct MockMemoryReader {
    memory: BTreeMap<u64, u8>,
    reads: RefCell<Vec<RemoteAddress>>,
}

impl MockMemoryReader {
    /// Absolute addresses of every raw read, in order
    pub fn reads(&self) -> Vec<RemoteAddress> {
        self.reads.borrow().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn clear_reads(&self) {
        self.reads.borrow_mut().clear();
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_raw(&self, address: RemoteAddress, buf: &mut [u8]) -> usize {
        self.reads.borrow_mut().push(address);

        let mut transferred = 0;
        for (i, slot) in buf.iter_mut().enumerate() {
            match self.memory.get(&address.value().wrapping_add(i as u64)) {
                Some(byte) => {
                    *slot = *byte;
                    transferred += 1;
                }
                None => break,
            }
        }
        transferred
    }
}

#[derive(Default)]
pub struct MockMemoryBuilder {
    memory: BTreeMap<u64, u8>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(mut self, address: u64, bytes: &[u8]) -> Self {
        for (i, byte) in bytes.iter().enumerate() {
            self.memory.insert(address + i as u64, *byte);
        }
        self
    }

    pub fn zeros(self, address: u64, len: usize) -> Self {
        self.bytes(address, &vec![0; len])
    }

    pub fn u32_le(self, address: u64, value: u32) -> Self {
        self.bytes(address, &value.to_le_bytes())
    }

    pub fn u16_be(self, address: u64, value: u16) -> Self {
        self.bytes(address, &value.to_be_bytes())
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            memory: self.memory,
            reads: RefCell::new(Vec::new()),
        }
    }
}
