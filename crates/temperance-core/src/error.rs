//! Error types for configuration loading and the simulation engine.

use thiserror::Error;

use crate::components::{AgentId, FoodId};

/// Failure to read or parse a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SimError {
    /// A configured constant is out of its allowed range.
    #[error("invalid configuration: `{field}` {reason} (got {value})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// More entities were requested than the grid has cells.
    #[error("cannot place {requested} {kind} on a grid of {capacity} cells")]
    PlacementExhausted {
        kind: &'static str,
        requested: usize,
        capacity: usize,
    },

    /// An agent holds a pursuit or consumption reference that no longer
    /// resolves to a valid food patch.
    #[error("agent {agent} holds a stale {role} reference to food {food}")]
    StaleReference {
        agent: AgentId,
        food: FoodId,
        role: &'static str,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::PlacementExhausted {
            kind: "agents",
            requested: 26,
            capacity: 25,
        };
        assert_eq!(err.to_string(), "cannot place 26 agents on a grid of 25 cells");

        let err = SimError::InvalidConfiguration {
            field: "agents.metabolism",
            value: "0".to_string(),
            reason: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: `agents.metabolism` must be positive (got 0)"
        );

        let err = SimError::StaleReference {
            agent: AgentId(1),
            food: FoodId(3),
            role: "pursuing",
        };
        assert_eq!(err.to_string(), "agent A1 holds a stale pursuing reference to food F3");
    }
}
