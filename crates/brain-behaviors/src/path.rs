use std::sync::LazyLock;

use brain_core::{
    Behavior, BehaviorError, BehaviorResult, Blackboard, MemoryRequirement, TickContext, WorldMut,
    WorldView,
};

use crate::{EntityRef, LookTarget, WalkTarget, ATTACK_TARGET, LOOK_TARGET, WALK_TARGET};

static REQUIREMENT: LazyLock<MemoryRequirement> = LazyLock::new(|| {
    MemoryRequirement::none()
        .has(ATTACK_TARGET)
        .uses(WALK_TARGET)
        .uses(LOOK_TARGET)
});

/// Host support for agents that chase targets.
pub trait Targeting: WorldMut {
    fn has_line_of_sight(&self, agent: Self::Agent, target: EntityRef) -> bool;

    fn is_within_attack_range(&self, agent: Self::Agent, target: EntityRef) -> bool;
}

type TargetFn<W, T> = Box<dyn Fn(&W, <W as WorldView>::Agent, EntityRef) -> T>;

/// Point the walk target at the current attack target.
///
/// One-shot: when the target is visible and in attack range the walk target is cleared,
/// otherwise the agent is told to look at and walk towards it.
pub struct SetWalkTargetToAttackTarget<W>
where
    W: Targeting + 'static,
{
    speed_mod: TargetFn<W, f32>,
    close_enough: TargetFn<W, u32>,
}

impl<W> Default for SetWalkTargetToAttackTarget<W>
where
    W: Targeting + 'static,
{
    fn default() -> Self {
        Self {
            speed_mod: Box::new(|_: &W, _, _| 1.0),
            close_enough: Box::new(|_: &W, _, _| 0),
        }
    }
}

impl<W> SetWalkTargetToAttackTarget<W>
where
    W: Targeting + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement speed multiplier for the walk, computed per start.
    pub fn speed_mod(mut self, f: impl Fn(&W, W::Agent, EntityRef) -> f32 + 'static) -> Self {
        self.speed_mod = Box::new(f);
        self
    }

    /// Distance (in blocks) at which the agent is close enough to stop pathing.
    pub fn close_enough_dist(mut self, f: impl Fn(&W, W::Agent, EntityRef) -> u32 + 'static) -> Self {
        self.close_enough = Box::new(f);
        self
    }
}

impl<W> Behavior<W> for SetWalkTargetToAttackTarget<W>
where
    W: Targeting + 'static,
{
    fn memory_requirement(&self) -> &MemoryRequirement {
        &REQUIREMENT
    }

    fn name(&self) -> &'static str {
        "set_walk_target_to_attack_target"
    }

    fn start(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        let target = blackboard
            .get(ATTACK_TARGET)
            .copied()
            .ok_or(BehaviorError::missing(ATTACK_TARGET))?;

        if world.has_line_of_sight(agent, target) && world.is_within_attack_range(agent, target) {
            blackboard.erase(WALK_TARGET);
            return Ok(());
        }

        let view: &W = world;
        let walk = WalkTarget {
            target,
            speed: (self.speed_mod)(view, agent, target),
            close_enough: (self.close_enough)(view, agent, target),
        };
        blackboard.set(
            LOOK_TARGET,
            LookTarget {
                target,
                eye_level: true,
            },
        );
        blackboard.set(WALK_TARGET, walk);
        Ok(())
    }
}
