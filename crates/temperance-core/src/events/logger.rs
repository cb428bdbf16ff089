//! Tick event log
//!
//! `--events <path>` writes every `SimEvent` the engine reports as one
//! JSON line, in tick order. A run replayed with the same seed produces
//! the same file byte for byte.

use bevy_ecs::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use temperance_events::{EventKind, SimEvent};

/// JSONL sink for tick reports. Each line carries `tick` plus the
/// `event_type` tag and fields of one `EventKind`.
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
}

impl EventLogger {
    /// Truncates `path`; a log always describes a single run.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
        })
    }

    /// Counts events without writing them, for runs started without `--events`.
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
        }
    }

    /// Events seen so far, written or not
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    pub fn log(&mut self, event: &SimEvent) -> std::io::Result<()> {
        self.event_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(event)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Append everything one `step()` reported
    pub fn log_tick(&mut self, events: &[SimEvent]) -> std::io::Result<()> {
        for event in events {
            self.log(event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(events = self.event_count, "event log not flushed: {}", e);
        }
    }
}

/// Events raised during the current tick, drained by the engine after it
#[derive(Resource, Debug, Default)]
pub struct PendingEvents {
    events: Vec<SimEvent>,
}

impl PendingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: u64, kind: EventKind) {
        self.events.push(SimEvent::new(tick, kind));
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufRead;
    use temperance_events::{Cell, EventType};

    fn died(tick: u64, agent_id: u32) -> SimEvent {
        SimEvent::new(
            tick,
            EventKind::Died {
                agent_id,
                at: Cell::new(1, 2),
            },
        )
    }

    #[test]
    fn test_event_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        logger.log_tick(&[died(3, 0), died(5, 2)]).unwrap();
        logger.flush().unwrap();
        assert_eq!(logger.event_count(), 2);

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"event_type\":\"died\""));
        assert!(lines[0].contains("\"tick\":3"));

        let parsed: SimEvent = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(parsed.tick, 5);
        assert_eq!(parsed.event_type(), EventType::Died);
        assert_eq!(parsed.kind.agent_id(), Some(2));
    }

    #[test]
    fn test_null_logger() {
        let mut logger = EventLogger::null();
        logger.log(&died(1, 0)).unwrap();
        assert_eq!(logger.event_count(), 1);
    }

    #[test]
    fn test_pending_events() {
        let mut pending = PendingEvents::new();
        assert!(pending.is_empty());

        pending.push(
            1,
            EventKind::Regrew {
                food_id: 0,
                at: Cell::new(0, 0),
            },
        );
        assert_eq!(pending.len(), 1);

        let drained = pending.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].tick, 1);
        assert!(pending.is_empty());
    }
}
