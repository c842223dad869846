//! A one-dimensional arena: one agent, an optional hostile, and a stretch of deep water.

use std::sync::LazyLock;

use anyhow::Result;
use brain_behaviors::{
    BlockWithShield, EntityRef, FloatToSurfaceOfFluid, FluidWorld, Hand, ItemUser,
    SetWalkTargetToAttackTarget, Targeting, ATTACK_TARGET, WALK_TARGET,
};
use brain_core::{
    Activity, ActivityGroup, Behavior, BehaviorResult, Blackboard, Brain, MemoryRequirement,
    TickContext, WorldMut, WorldView,
};
use brain_tools::{record_transitions, TraceLog, TRACE_LOG};

use crate::config::ScenarioConfig;

pub const AGENT: u64 = 1;
const HOSTILE: EntityRef = EntityRef(2);

#[derive(Debug, Default)]
pub struct Arena {
    pub agent_x: i32,
    pub hostile_x: Option<i32>,
    pub in_water: bool,
    pub jumps: u32,
    pub blocking: bool,
}

impl WorldView for Arena {
    type Agent = u64;
}

impl WorldMut for Arena {}

impl FluidWorld for Arena {
    fn fluid_height(&self, _agent: u64) -> Option<f32> {
        self.in_water.then_some(1.0)
    }

    fn fluid_jump_threshold(&self, _agent: u64) -> f32 {
        0.4
    }

    fn jump(&mut self, _agent: u64) {
        self.jumps += 1;
    }
}

impl ItemUser for Arena {
    fn holds_blocking_item(&self, _agent: u64, hand: Hand) -> bool {
        hand == Hand::Off
    }

    fn start_using_item(&mut self, _agent: u64, _hand: Hand) {
        self.blocking = true;
    }

    fn is_blocking(&self, _agent: u64) -> bool {
        self.blocking
    }

    fn stop_using_item(&mut self, _agent: u64) {
        self.blocking = false;
    }
}

impl Targeting for Arena {
    fn has_line_of_sight(&self, _agent: u64, _target: EntityRef) -> bool {
        self.hostile_x.is_some()
    }

    fn is_within_attack_range(&self, _agent: u64, _target: EntityRef) -> bool {
        self.distance().is_some_and(|d| d <= 1)
    }
}

impl Arena {
    fn distance(&self) -> Option<u32> {
        self.hostile_x.map(|x| x.abs_diff(self.agent_x))
    }

    /// Host-side perception: spawn or despawn the hostile and report it on the blackboard.
    fn sense(&mut self, tick: u64, config: &ScenarioConfig, blackboard: &mut Blackboard) {
        self.in_water = config.water.is_some_and(|w| w.contains(tick));

        let hostile = &config.hostile;
        if tick == hostile.appears_at {
            self.hostile_x = Some(self.agent_x + hostile.distance);
        }
        if tick == hostile.leaves_at {
            self.hostile_x = None;
        }

        match self.hostile_x {
            Some(_) if !blackboard.contains(ATTACK_TARGET) => blackboard.set(ATTACK_TARGET, HOSTILE),
            None => blackboard.erase(ATTACK_TARGET),
            Some(_) => {}
        }
    }
}

static WALK_REQUIREMENT: LazyLock<MemoryRequirement> =
    LazyLock::new(|| MemoryRequirement::none().has(WALK_TARGET));

/// Step one block per tick towards the walk target until close enough.
struct WalkToWalkTarget;

impl Behavior<Arena> for WalkToWalkTarget {
    fn memory_requirement(&self) -> &MemoryRequirement {
        &WALK_REQUIREMENT
    }

    fn name(&self) -> &'static str {
        "walk_to_walk_target"
    }

    fn should_keep_running(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &Arena,
        blackboard: &Blackboard,
    ) -> bool {
        let Some(walk) = blackboard.get(WALK_TARGET) else {
            return false;
        };
        world.distance().is_some_and(|d| d > walk.close_enough.max(1))
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        world: &mut Arena,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        if let Some(x) = world.hostile_x {
            world.agent_x += (x - world.agent_x).signum();
        }
        Ok(())
    }

    fn stop(
        &mut self,
        _ctx: &TickContext,
        _agent: u64,
        _world: &mut Arena,
        blackboard: &mut Blackboard,
    ) {
        blackboard.erase(WALK_TARGET);
    }
}

/// Idle filler: glance around every few ticks.
struct LookAround;

impl Behavior<Arena> for LookAround {
    fn memory_requirement(&self) -> &MemoryRequirement {
        const NONE: &MemoryRequirement = &MemoryRequirement::none();
        NONE
    }

    fn name(&self) -> &'static str {
        "look_around"
    }

    fn start(
        &mut self,
        ctx: &TickContext,
        agent: u64,
        world: &mut Arena,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        tracing::info!(agent, tick = ctx.tick, x = world.agent_x, "looks around");
        Ok(())
    }

    fn cooldown_ticks(&self) -> u64 {
        5
    }
}

pub fn build_brain(config: &ScenarioConfig) -> Result<Brain<Arena>> {
    let brain = Brain::<Arena>::builder(AGENT)
        .config(config.brain)
        .activity(ActivityGroup::core_tasks(vec![
            Box::new(FloatToSurfaceOfFluid::new()),
            Box::new(WalkToWalkTarget),
        ]))
        .activity(ActivityGroup::idle_tasks(vec![Box::new(LookAround)]))
        .activity(ActivityGroup::fight_tasks(
            ATTACK_TARGET,
            vec![
                Box::new(SetWalkTargetToAttackTarget::<Arena>::new().close_enough_dist(|_, _, _| 1)),
                Box::new(BlockWithShield::new()),
            ],
        ))
        .core_activities([Activity::CORE])
        .activity_priorities([Activity::FIGHT, Activity::IDLE])
        .build()?;
    Ok(brain)
}

/// Run the scenario and return the recorded transition trace.
pub fn run(config: &ScenarioConfig) -> Result<(Arena, TraceLog)> {
    let mut brain = build_brain(config)?;
    brain.blackboard.set(TRACE_LOG, TraceLog::default());
    let mut arena = Arena::default();

    for tick in 0..config.ticks {
        arena.sense(tick, config, brain.blackboard_mut());
        let ctx = TickContext { tick, seed: config.seed };
        brain.tick(&ctx, &mut arena);
        record_transitions(&mut brain);
    }

    tracing::info!(
        ticks = config.ticks,
        x = arena.agent_x,
        jumps = arena.jumps,
        "scenario finished"
    );
    let trace = brain.blackboard.remove(TRACE_LOG).unwrap_or_default();
    Ok((arena, trace))
}

#[cfg(test)]
mod tests {
    use brain_tools::{TAG_START, TAG_STOP};

    use super::*;

    fn starts_of<'a>(trace: &'a TraceLog, name: &'a str) -> impl Iterator<Item = u64> + 'a {
        trace
            .with_tag(TAG_START)
            .filter(move |e| e.detail == name)
            .map(|e| e.tick)
    }

    #[test]
    fn agent_closes_in_and_blocks_then_stands_down() {
        let config = ScenarioConfig::default();
        let (arena, trace) = run(&config).unwrap();

        let chase: Vec<u64> = starts_of(&trace, "set_walk_target_to_attack_target").collect();
        assert_eq!(chase.first().copied(), Some(config.hostile.appears_at));
        assert!(starts_of(&trace, "walk_to_walk_target").count() >= 1);
        assert_eq!(arena.agent_x, config.hostile.distance - 1);

        // Fight group stops once the hostile leaves, lowering the shield.
        assert!(!arena.blocking);
        assert!(trace
            .with_tag(TAG_STOP)
            .any(|e| e.tick == config.hostile.leaves_at && e.detail == "deactivated"));
    }

    #[test]
    fn agent_paddles_while_in_water() {
        let config = ScenarioConfig::default();
        let (arena, trace) = run(&config).unwrap();

        assert_eq!(starts_of(&trace, "float_to_surface").next(), Some(1));
        assert!(arena.jumps <= 2);
    }

    #[test]
    fn idle_is_suspended_during_the_fight() {
        let config = ScenarioConfig::default();
        let (_, trace) = run(&config).unwrap();

        let fight = config.hostile.appears_at..config.hostile.leaves_at;
        assert!(starts_of(&trace, "look_around").all(|t| !fight.contains(&t)));
        assert!(starts_of(&trace, "look_around").any(|t| t < fight.start));
    }
}
