//! Event Types
//!
//! Everything the engine reports about a tick, one record per happening.

use serde::{Deserialize, Serialize};

/// A grid coordinate as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Primary event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PursuitStarted,
    Moved,
    Blocked,
    Consumed,
    PursuitInvalidated,
    Died,
    Regrew,
}

impl EventType {
    /// Returns all event type variants.
    pub fn all() -> &'static [EventType] {
        &[
            EventType::PursuitStarted,
            EventType::Moved,
            EventType::Blocked,
            EventType::Consumed,
            EventType::PursuitInvalidated,
            EventType::Died,
            EventType::Regrew,
        ]
    }
}

/// Event payload, tagged by `event_type` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventKind {
    /// An unattached agent committed to a food patch.
    PursuitStarted {
        agent_id: u32,
        food_id: u32,
        score: f64,
    },
    Moved {
        agent_id: u32,
        from: Cell,
        to: Cell,
    },
    /// The wanted cell was held by another agent, so the agent stayed put.
    Blocked {
        agent_id: u32,
        at: Cell,
        wanted: Cell,
    },
    Consumed {
        agent_id: u32,
        food_id: u32,
        amount: u8,
        health_after: f64,
        witnessed: bool,
        punished: bool,
    },
    /// Another agent took the food this agent was walking towards.
    PursuitInvalidated {
        agent_id: u32,
        food_id: u32,
    },
    Died {
        agent_id: u32,
        at: Cell,
    },
    Regrew {
        food_id: u32,
        at: Cell,
    },
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::PursuitStarted { .. } => EventType::PursuitStarted,
            EventKind::Moved { .. } => EventType::Moved,
            EventKind::Blocked { .. } => EventType::Blocked,
            EventKind::Consumed { .. } => EventType::Consumed,
            EventKind::PursuitInvalidated { .. } => EventType::PursuitInvalidated,
            EventKind::Died { .. } => EventType::Died,
            EventKind::Regrew { .. } => EventType::Regrew,
        }
    }

    /// The agent the event is about, if any.
    pub fn agent_id(&self) -> Option<u32> {
        match self {
            EventKind::PursuitStarted { agent_id, .. }
            | EventKind::Moved { agent_id, .. }
            | EventKind::Blocked { agent_id, .. }
            | EventKind::Consumed { agent_id, .. }
            | EventKind::PursuitInvalidated { agent_id, .. }
            | EventKind::Died { agent_id, .. } => Some(*agent_id),
            EventKind::Regrew { .. } => None,
        }
    }
}

/// A single event stamped with the tick it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl SimEvent {
    pub fn new(tick: u64, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}
