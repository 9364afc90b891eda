//! Poll loop: read every player's nametag and persist it, at a fixed rate.

use strum::Display;
use tracing::{error, info, trace};

use crate::config::TrackerConfig;
use crate::error::{Error, Result};
use crate::memory::{MemoryReader, ProcessHandle, ReadMemory};
use crate::player::{NametagExtractor, PlayerSlot};
use crate::schedule;
use crate::stream::{FileOutput, OutputSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TrackerState {
    Idle,
    Tick,
    Terminated,
}

pub struct NametagTracker<R, S> {
    extractor: NametagExtractor<R>,
    sink: S,
    state: TrackerState,
    ticks: u64,
}

/// Attach to the emulator and set up file output as configured.
pub fn attach(config: &TrackerConfig) -> Result<NametagTracker<ProcessHandle, FileOutput>> {
    let process = ProcessHandle::find_and_open(&config.process_name)?;
    info!(
        "Found {} (pid {}, base: {:#x})",
        config.process_name, process.pid, process.base_address
    );

    let base_address = process.base_address;
    let reader = MemoryReader::new(process, base_address);
    let extractor = NametagExtractor::new(reader, *config.mode.table());
    let output = FileOutput::new(&config.output_dir);

    Ok(NametagTracker::new(extractor, output))
}

impl<R: ReadMemory, S: OutputSink> NametagTracker<R, S> {
    pub fn new(extractor: NametagExtractor<R>, sink: S) -> Self {
        Self {
            extractor,
            sink,
            state: TrackerState::Idle,
            ticks: 0,
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn extractor(&self) -> &NametagExtractor<R> {
        &self.extractor
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one tick: each slot in order is read and persisted before the next.
    ///
    /// A persistence failure terminates the tracker; the remaining slots of
    /// the tick are skipped and every later call fails.
    pub fn update(&mut self) -> Result<()> {
        if self.state == TrackerState::Terminated {
            return Err(Error::TrackerTerminated);
        }
        self.state = TrackerState::Tick;

        for slot in PlayerSlot::ALL {
            let nametag = self.extractor.read_player(slot);
            trace!("{}: {:?}", slot, nametag.as_str());

            if let Err(e) = self.sink.persist(&slot.output_name(), nametag.as_bytes()) {
                self.state = TrackerState::Terminated;
                return Err(e);
            }
        }

        self.ticks += 1;
        self.state = TrackerState::Idle;
        Ok(())
    }

    /// Poll at `rate_hz` until a tick fails. Only returns with an error.
    pub fn run(&mut self, rate_hz: u32) -> Result<()> {
        info!("Polling nametags at {} Hz", rate_hz);
        let result = schedule::run_at_rate(rate_hz, || self.update());
        if let Err(e) = &result {
            error!("Nametag polling stopped after {} ticks: {}", self.ticks, e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::memory::{MockMemoryBuilder, MockMemoryReader, RemoteAddress};
    use crate::player::{AddressTable, STANDARD_TABLE};

    const BASE: u64 = 0x7FF6_2000_0000;

    /// Records every write; fails the `fail_at`-th one (1-based)
    struct RecordingSink {
        writes: Vec<(String, Vec<u8>)>,
        fail_at: Option<usize>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail_at: None,
            }
        }

        fn failing_at(n: usize) -> Self {
            Self {
                writes: Vec::new(),
                fail_at: Some(n),
            }
        }
    }

    impl OutputSink for RecordingSink {
        fn persist(&mut self, name: &str, content: &[u8]) -> Result<()> {
            self.writes.push((name.to_string(), content.to_vec()));
            if self.fail_at == Some(self.writes.len()) {
                return Err(Error::PersistFailed {
                    name: name.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            Ok(())
        }
    }

    fn abs(address: RemoteAddress) -> u64 {
        address.value() + BASE
    }

    fn with_nametag(
        builder: MockMemoryBuilder,
        table: &AddressTable,
        slot: PlayerSlot,
        length: u8,
        codes: &[u16],
    ) -> MockMemoryBuilder {
        let mut builder = builder
            .bytes(abs(table.char_count.address(slot)), &[length, 0, 0, 0])
            .zeros(abs(table.glyph_block.address(slot)), 13);
        for (i, code) in codes.iter().enumerate() {
            builder = builder.u16_be(abs(table.glyph_address(slot, i)), *code);
        }
        builder
    }

    /// P1 "A", P2 empty (length unreadable), P3 "0ABC", P4 empty (unmapped length)
    fn game_memory() -> MockMemoryReader {
        let builder = with_nametag(
            MockMemoryBuilder::new(),
            &STANDARD_TABLE,
            PlayerSlot::ALL[0],
            0x03,
            &[0x200A],
        );
        let builder = with_nametag(
            builder,
            &STANDARD_TABLE,
            PlayerSlot::ALL[2],
            0x0C,
            &[0x2000, 0x200A, 0x200B, 0x200C],
        );
        with_nametag(builder, &STANDARD_TABLE, PlayerSlot::ALL[3], 0x05, &[0x200A]).build()
    }

    fn tracker<S: OutputSink>(sink: S) -> NametagTracker<MockMemoryReader, S> {
        let reader = MemoryReader::new(game_memory(), BASE);
        NametagTracker::new(NametagExtractor::new(reader, STANDARD_TABLE), sink)
    }

    #[test]
    fn test_update_persists_every_slot_in_order() {
        let mut tracker = tracker(RecordingSink::new());

        tracker.update().unwrap();

        let writes: Vec<(&str, &[u8])> = tracker
            .sink()
            .writes
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_slice()))
            .collect();
        assert_eq!(
            writes,
            vec![
                ("player1.txt", b"A".as_slice()),
                ("player2.txt", b"".as_slice()),
                ("player3.txt", b"0ABC".as_slice()),
                ("player4.txt", b"".as_slice()),
            ]
        );
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert_eq!(tracker.ticks(), 1);
    }

    #[test]
    fn test_nametags_rebuilt_every_tick() {
        let mut tracker = tracker(RecordingSink::new());

        tracker.update().unwrap();
        tracker.update().unwrap();

        let writes = &tracker.sink().writes;
        assert_eq!(writes.len(), 8);
        assert_eq!(writes[0], writes[4]);
        assert_eq!(writes[2], writes[6]);
        assert_eq!(tracker.ticks(), 2);
    }

    #[test]
    fn test_persist_failure_terminates() {
        let mut tracker = tracker(RecordingSink::failing_at(2));

        let err = tracker.update().unwrap_err();
        assert!(matches!(err, Error::PersistFailed { ref name, .. } if name == "player2.txt"));
        assert_eq!(tracker.state(), TrackerState::Terminated);
        assert_eq!(tracker.ticks(), 0);
        assert_eq!(tracker.sink().writes.len(), 2);

        // P3 was never read
        let p3_length =
            RemoteAddress::new(abs(STANDARD_TABLE.char_count.address(PlayerSlot::ALL[2])));
        assert!(
            !tracker
                .extractor()
                .reader()
                .source()
                .reads()
                .contains(&p3_length)
        );
    }

    #[test]
    fn test_no_resume_after_termination() {
        let mut tracker = tracker(RecordingSink::failing_at(1));

        assert!(tracker.update().is_err());
        let reads = tracker.extractor().reader().source().read_count();

        let err = tracker.update().unwrap_err();
        assert!(matches!(err, Error::TrackerTerminated));
        assert_eq!(tracker.sink().writes.len(), 1);
        assert_eq!(tracker.extractor().reader().source().read_count(), reads);
    }

    #[test]
    fn test_run_returns_persist_failure() {
        // Third tick fails on its first write
        let mut tracker = tracker(RecordingSink::failing_at(9));

        let err = tracker.run(1000).unwrap_err();
        assert!(matches!(err, Error::PersistFailed { .. }));
        assert_eq!(tracker.ticks(), 2);
        assert_eq!(tracker.state(), TrackerState::Terminated);
    }

    #[test]
    fn test_update_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker(FileOutput::new(dir.path()));

        tracker.update().unwrap();

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("player1.txt"), "A");
        assert_eq!(read("player2.txt"), "");
        assert_eq!(read("player3.txt"), "0ABC");
        assert_eq!(read("player4.txt"), "");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_attach_fails_without_process_access() {
        let config = TrackerConfig::default();
        assert!(matches!(
            attach(&config),
            Err(Error::UnsupportedPlatform(_))
        ));
    }
}
