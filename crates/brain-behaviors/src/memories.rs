//! Facts shared between the bundled behaviors.

use brain_core::MemoryKey;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Host-side identity of another entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRef(pub u64);

/// Where to walk, how fast, and how close counts as arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WalkTarget {
    pub target: EntityRef,
    pub speed: f32,
    pub close_enough: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LookTarget {
    pub target: EntityRef,
    /// Look at the target's eyes rather than its feet.
    pub eye_level: bool,
}

pub const ATTACK_TARGET: MemoryKey<EntityRef> = MemoryKey::new(0x5B00_0001);
pub const WALK_TARGET: MemoryKey<WalkTarget> = MemoryKey::new(0x5B00_0002);
pub const LOOK_TARGET: MemoryKey<LookTarget> = MemoryKey::new(0x5B00_0003);
