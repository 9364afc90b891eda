//! Tracker configuration.

use std::path::PathBuf;

use crate::memory::layout::{process, timing};
use crate::player::AddressingMode;

/// Configuration for the nametag tracker
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Emulator addressing mode; selects the address table
    pub mode: AddressingMode,
    /// Executable name of the emulator process
    pub process_name: String,
    /// Directory the per-player files are written to
    pub output_dir: PathBuf,
    /// Poll ticks per second
    pub poll_rate_hz: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            mode: AddressingMode::default(),
            process_name: process::DOLPHIN_EXE.to_string(),
            output_dir: PathBuf::from("."),
            poll_rate_hz: timing::POLL_RATE_HZ,
        }
    }
}

impl TrackerConfig {
    /// Create a new configuration builder
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }
}

/// Builder for TrackerConfig
#[derive(Debug, Clone, Default)]
pub struct TrackerConfigBuilder {
    mode: Option<AddressingMode>,
    process_name: Option<String>,
    output_dir: Option<PathBuf>,
    poll_rate_hz: Option<u32>,
}

impl TrackerConfigBuilder {
    pub fn mode(mut self, mode: AddressingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn process_name<S: Into<String>>(mut self, name: S) -> Self {
        self.process_name = Some(name.into());
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn poll_rate_hz(mut self, hz: u32) -> Self {
        self.poll_rate_hz = Some(hz);
        self
    }

    pub fn build(self) -> TrackerConfig {
        let default = TrackerConfig::default();
        TrackerConfig {
            mode: self.mode.unwrap_or(default.mode),
            process_name: self.process_name.unwrap_or(default.process_name),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            poll_rate_hz: self.poll_rate_hz.unwrap_or(default.poll_rate_hz),
        }
    }
}
