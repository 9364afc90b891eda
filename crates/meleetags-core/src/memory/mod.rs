mod address;
pub mod layout;
mod process;
mod reader;

#[cfg(test)]
pub mod mock;

pub use address::RemoteAddress;
pub use process::*;
pub use reader::{MemoryReader, ReadMemory, SCRATCH_SIZE};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
