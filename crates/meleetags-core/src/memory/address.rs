use std::fmt;

/// An address in the target process's address space.
///
/// Never dereferenced locally; the only way to get at the bytes behind it is
/// through a [`ReadMemory`](super::ReadMemory) implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RemoteAddress(u64);

impl RemoteAddress {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Address `delta` bytes further on. Wraps at the top of the address space.
    pub const fn offset(self, delta: u64) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

impl From<u64> for RemoteAddress {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::LowerHex for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::Display for RemoteAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
