use brain_core::{
    Behavior, BehaviorResult, Blackboard, DeterministicRng, MemoryRequirement, TickContext,
    WorldMut,
};

use crate::NO_REQUIREMENT;

const RISE_STREAM: u64 = 0xF10A7;

/// Host support for swimming agents.
pub trait FluidWorld: WorldMut {
    /// Height of the fluid at the agent's position, `None` outside fluid or on fluid the agent
    /// can stand on.
    fn fluid_height(&self, agent: Self::Agent) -> Option<f32>;

    /// Fluid height above which the agent has to paddle to stay afloat.
    fn fluid_jump_threshold(&self, agent: Self::Agent) -> f32;

    fn jump(&mut self, agent: Self::Agent);
}

/// Rise to the surface of a fluid and float there.
///
/// Runs while the agent is deeper than its jump threshold, jumping with
/// [`rise_chance`](Self::rise_chance) (default 0.8) each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatToSurfaceOfFluid {
    rise_chance: f32,
}

impl Default for FloatToSurfaceOfFluid {
    fn default() -> Self {
        Self { rise_chance: 0.8 }
    }
}

impl FloatToSurfaceOfFluid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-tick jump chance, clamped to `[0, 1]`.
    pub fn rise_chance(mut self, chance: f32) -> Self {
        self.rise_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn submerged<W: FluidWorld>(world: &W, agent: W::Agent) -> bool {
        world
            .fluid_height(agent)
            .is_some_and(|height| height > world.fluid_jump_threshold(agent))
    }
}

impl<W> Behavior<W> for FloatToSurfaceOfFluid
where
    W: FluidWorld + 'static,
{
    fn memory_requirement(&self) -> &MemoryRequirement {
        NO_REQUIREMENT
    }

    fn name(&self) -> &'static str {
        "float_to_surface"
    }

    fn check_extra_start_conditions(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        Self::submerged(world, agent)
    }

    fn should_keep_running(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        Self::submerged(world, agent)
    }

    fn tick(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        if ctx.rng_for_agent(agent, RISE_STREAM).chance(self.rise_chance) {
            world.jump(agent);
        }
        Ok(())
    }
}
