//! Error types surfaced by the eat sequencer.
//!
//! Precondition failures are reported before any host command is issued;
//! everything else happens mid-sequence and is subject to `strict_errors`.
use food_core::Hand;
use thiserror::Error;

use super::Completion;

pub type Result<T> = std::result::Result<T, EatError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EatError {
    #[error("already eating")]
    AlreadyEating,

    #[error("eating is canceled")]
    Canceled,

    #[error("no food specified and none found in inventory")]
    NoFoodAvailable,

    #[error("failed to equip {item} into {hand} hand")]
    EquipFailed {
        item: String,
        hand: Hand,
        #[source]
        source: HostError,
    },

    #[error(
        "item switched early: expected {expected}, found {}",
        .found.as_deref().unwrap_or("nothing")
    )]
    ItemSwitchedEarly {
        expected: String,
        found: Option<String>,
    },

    #[error("eating timed out after {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },

    #[error("eating finished after only {elapsed_ms}ms")]
    FinishedTooQuickly { elapsed_ms: u64 },

    #[error("agent died while eating")]
    AgentDied,

    #[error("agent event stream closed")]
    EventStreamClosed,

    #[error("failed to restore {item} into {hand} hand")]
    RestoreFailed {
        item: String,
        hand: Hand,
        #[source]
        source: HostError,
    },
}

impl EatError {
    /// Errors raised before the sequence touched the host.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            EatError::AlreadyEating | EatError::Canceled | EatError::NoFoodAvailable
        )
    }

    pub fn completion(&self) -> Completion {
        match self {
            EatError::Canceled => Completion::Canceled,
            EatError::TimedOut { .. } => Completion::TimedOut,
            EatError::NoFoodAvailable => Completion::NoFood,
            _ => Completion::Interrupted,
        }
    }
}

/// Failure reported by the host while executing a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
