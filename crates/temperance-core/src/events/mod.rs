//! Tick events: queued during a tick, drained by the engine, optionally
//! appended to a JSONL log.

pub mod logger;

pub use logger::{EventLogger, PendingEvents};
pub use temperance_events::{EventKind, EventType, SimEvent};
