//! Deterministic, engine-agnostic behavior scheduling for autonomous agents.
//!
//! An agent's [`Brain`] owns a [`Blackboard`] of expiring facts and a set of
//! [`ActivityGroup`]s. Every tick the brain gates each group on its blackboard
//! conditions, sweeps the behaviors of the active groups in priority order, and
//! drives each one through the [`Behavior`] lifecycle.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod activity;
pub mod behavior;
pub mod blackboard;
pub mod brain;
pub mod error;
pub mod host;
pub mod memory;
pub mod rng;

pub use activity::{Activity, ActivityGroup, ActivityGroupBuilder};
pub use behavior::{Behavior, BehaviorId, BehaviorState, StopReason, Transition, TransitionKind};
pub use blackboard::Blackboard;
pub use brain::{tick_brains, Brain, BrainBuilder, BrainConfig};
pub use error::{BehaviorError, BehaviorResult, ConfigError};
pub use host::{AgentId, TickContext, WorldMut, WorldView};
pub use memory::{MemoryId, MemoryKey, MemoryRequirement, MemoryStatus};
pub use rng::{DeterministicRng, SplitMix64};
