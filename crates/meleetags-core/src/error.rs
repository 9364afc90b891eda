use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error(
        "Short read at address {address:#x}: requested {requested} bytes, transferred {transferred}"
    )]
    ShortRead {
        address: u64,
        requested: usize,
        transferred: usize,
    },

    #[error("Failed to write {name}: {source}")]
    PersistFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tracker already terminated")]
    TrackerTerminated,

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error came from a memory read that did not transfer enough bytes
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Error::ShortRead { .. })
    }

    /// Errors that end the poll loop (anything except a per-field read failure)
    pub fn is_fatal(&self) -> bool {
        !self.is_read_failure()
    }
}
