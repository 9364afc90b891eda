//! # meleetags-core
//!
//! Core library for the Melee nametag reader.
//!
//! This crate provides:
//! - Windows process memory reading (Dolphin host process)
//! - Address tables for 32-bit and 64-bit Dolphin
//! - Nametag glyph decoding
//! - A fixed-rate poll loop writing one file per player for OBS

pub mod config;
pub mod error;
pub mod glyph;
pub mod memory;
pub mod player;
pub mod schedule;
pub mod stream;
pub mod tracker;

pub use config::{TrackerConfig, TrackerConfigBuilder};
pub use error::{Error, Result};
pub use memory::{MemoryReader, ProcessHandle, ReadMemory, RemoteAddress};
pub use player::{
    AddressTable, AddressingMode, FieldLayout, GateLayout, Nametag, NametagExtractor, PlayerSlot,
};
pub use schedule::{FixedRate, run_at_rate};
pub use stream::{FileOutput, OutputSink};
pub use tracker::{NametagTracker, TrackerState, attach};
