//! Reusable leaf behaviors.
//!
//! Each behavior states what it needs from the host through a small capability trait
//! ([`FluidWorld`], [`ItemUser`], [`Targeting`]); a host world implements the traits it supports
//! and can then register the matching behaviors in any activity group.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod memories;
pub mod misc;
pub mod movement;
pub mod path;

pub use memories::{EntityRef, LookTarget, WalkTarget, ATTACK_TARGET, LOOK_TARGET, WALK_TARGET};
pub use misc::{BlockWithShield, Hand, ItemUser};
pub use movement::{FloatToSurfaceOfFluid, FluidWorld};
pub use path::{SetWalkTargetToAttackTarget, Targeting};

use brain_core::MemoryRequirement;

pub(crate) const NO_REQUIREMENT: &MemoryRequirement = &MemoryRequirement::none();
