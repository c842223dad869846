//! Umbrella crate that re-exports the `brain-*` building blocks.
//!
//! A typical agent type assembles its brain once per spawned agent:
//!
//! ```ignore
//! let brain = Brain::builder(agent)
//!     .activity(ActivityGroup::core_tasks(vec![Box::new(FloatToSurfaceOfFluid::new())]))
//!     .activity(ActivityGroup::fight_tasks(ATTACK_TARGET, vec![
//!         Box::new(SetWalkTargetToAttackTarget::new()),
//!     ]))
//!     .build()?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use brain_core as core;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use brain_tools as tools;

#[cfg(feature = "behaviors")]
#[cfg_attr(docsrs, doc(cfg(feature = "behaviors")))]
pub use brain_behaviors as behaviors;

#[cfg(feature = "core")]
pub use brain_core::{Activity, ActivityGroup, Behavior, Blackboard, Brain, BrainConfig, TickContext};
