//! The boundary between the scheduling core and the host simulation.

use core::fmt::Debug;

use crate::{rng, SplitMix64};

/// Stable handle of the agent a brain drives.
///
/// Multi-agent stepping is ordered by `Ord`; `stable_id` seeds per-agent RNG streams and
/// staggers think ticks.
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        u64::from(self)
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Read-only view of the host world.
///
/// The core makes no queries of its own. Leaf behaviors describe what they need from the host
/// through extension traits bounded on this one.
pub trait WorldView {
    type Agent: AgentId;
}

/// Host world that behaviors may mutate (movement requests, item use, ...).
pub trait WorldMut: WorldView {}

/// Per-tick input from the host: the tick counter drives fact expiry and lifecycle bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickContext {
    pub tick: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64) -> Self {
        Self { tick, seed: 0 }
    }

    /// Deterministic RNG for one agent and one named stream during this tick.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed ^ self.tick, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
