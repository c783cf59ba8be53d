//! One-shot abort signal for the in-flight sequence.
use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken;

use crate::api::EatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AbortReason {
    Canceled,
    AgentDied,
}

impl From<AbortReason> for EatError {
    fn from(reason: AbortReason) -> Self {
        match reason {
            AbortReason::Canceled => EatError::Canceled,
            AbortReason::AgentDied => EatError::AgentDied,
        }
    }
}

/// Cloneable handle that fires at most once.
///
/// The first reason recorded wins; later aborts only re-signal.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    token: CancellationToken,
    reason: Arc<OnceLock<AbortReason>>,
}

impl AbortHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call set the reason.
    pub fn abort(&self, reason: AbortReason) -> bool {
        let first = self.reason.set(reason).is_ok();
        self.token.cancel();
        first
    }

    pub fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn reason(&self) -> Option<AbortReason> {
        self.reason.get().copied()
    }

    /// Resolves once [`abort`](Self::abort) has been called.
    pub async fn aborted(&self) -> AbortReason {
        self.token.cancelled().await;
        self.reason().unwrap_or(AbortReason::Canceled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_reason_wins() {
        let handle = AbortHandle::new();
        assert!(!handle.is_aborted());

        assert!(handle.abort(AbortReason::AgentDied));
        assert!(!handle.abort(AbortReason::Canceled));

        assert!(handle.is_aborted());
        assert_eq!(handle.clone().aborted().await, AbortReason::AgentDied);
        assert_eq!(EatError::from(AbortReason::AgentDied), EatError::AgentDied);
    }
}
