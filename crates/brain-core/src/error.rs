use std::borrow::Cow;

use thiserror::Error;

use crate::{Activity, MemoryId};

/// Invalid brain assembly. An agent must not be instantiated from a configuration that fails
/// with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("activity group `{activity}` has no behaviors")]
    EmptyGroup { activity: Activity },

    #[error("priority of behavior #{index} in activity group `{activity}` overflows i32")]
    PriorityOverflow { activity: Activity, index: usize },

    #[error("activity `{activity}` is registered more than once")]
    DuplicateActivity { activity: Activity },

    #[error("activity `{activity}` is neither a core activity nor in the activity priorities")]
    UnlistedActivity { activity: Activity },
}

/// A fault raised by a behavior's `start` or `tick` hook.
///
/// Faults are contained by the brain: the faulting behavior is stopped and the sweep continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    #[error("{0}")]
    Failed(Cow<'static, str>),

    #[error("expected memory {} to be present", .id.0)]
    MissingMemory { id: MemoryId },

    #[error("world rejected request: {0}")]
    World(String),
}

impl BehaviorError {
    pub fn failed(reason: impl Into<Cow<'static, str>>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn missing(id: impl Into<MemoryId>) -> Self {
        Self::MissingMemory { id: id.into() }
    }
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
