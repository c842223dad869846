use brain_behaviors::{
    BlockWithShield, EntityRef, FloatToSurfaceOfFluid, FluidWorld, Hand, ItemUser,
    SetWalkTargetToAttackTarget, Targeting, ATTACK_TARGET, LOOK_TARGET, WALK_TARGET,
};
use brain_core::{
    Activity, ActivityGroup, Behavior, Brain, StopReason, TickContext, TransitionKind, WorldMut,
    WorldView,
};

#[derive(Debug, Default)]
struct Arena {
    fluid_height: Option<f32>,
    jumps: u32,
    shield_hand: Option<Hand>,
    using: Option<Hand>,
    stops: u32,
    visible: bool,
    in_range: bool,
}

impl WorldView for Arena {
    type Agent = u64;
}

impl WorldMut for Arena {}

impl FluidWorld for Arena {
    fn fluid_height(&self, _agent: u64) -> Option<f32> {
        self.fluid_height
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
        self.shield_hand == Some(hand)
    }

    fn start_using_item(&mut self, _agent: u64, hand: Hand) {
        self.using = Some(hand);
    }

    fn is_blocking(&self, _agent: u64) -> bool {
        self.using.is_some() && self.using == self.shield_hand
    }

    fn stop_using_item(&mut self, _agent: u64) {
        self.using = None;
        self.stops += 1;
    }
}

impl Targeting for Arena {
    fn has_line_of_sight(&self, _agent: u64, _target: EntityRef) -> bool {
        self.visible
    }

    fn is_within_attack_range(&self, _agent: u64, _target: EntityRef) -> bool {
        self.in_range
    }
}

fn ctx(tick: u64) -> TickContext {
    TickContext { tick, seed: 11 }
}

#[test]
fn float_to_surface_jumps_while_submerged() {
    let mut brain = Brain::<Arena>::builder(1)
        .activity(ActivityGroup::core_tasks(vec![Box::new(
            FloatToSurfaceOfFluid::new().rise_chance(1.0),
        )]))
        .build()
        .unwrap();
    let mut arena = Arena {
        fluid_height: Some(0.9),
        ..Default::default()
    };

    for tick in 0..4 {
        brain.tick(&ctx(tick), &mut arena);
    }
    // Started on 0, jumped on 1..=3.
    assert_eq!(arena.jumps, 3);

    arena.fluid_height = Some(0.2);
    brain.tick(&ctx(4), &mut arena);
    assert_eq!(
        brain.transitions()[0].kind,
        TransitionKind::Stopped(StopReason::Finished)
    );
    assert_eq!(arena.jumps, 3);
}

#[test]
fn float_to_surface_never_jumps_with_zero_chance() {
    let mut behavior = FloatToSurfaceOfFluid::new().rise_chance(0.0);
    let mut arena = Arena {
        fluid_height: Some(2.0),
        ..Default::default()
    };
    let mut bb = brain_core::Blackboard::new();

    for tick in 0..32 {
        Behavior::<Arena>::tick(&mut behavior, &ctx(tick), 1, &mut arena, &mut bb).unwrap();
    }
    assert_eq!(arena.jumps, 0);
}

#[test]
fn float_to_surface_ignores_dry_land() {
    let mut behavior = FloatToSurfaceOfFluid::new();
    let arena = Arena::default();
    let bb = brain_core::Blackboard::new();
    assert!(!Behavior::<Arena>::check_extra_start_conditions(
        &mut behavior,
        &ctx(0),
        1,
        &arena,
        &bb
    ));
}

#[test]
fn shield_prefers_main_hand_and_falls_back_to_off_hand() {
    let mut shield = BlockWithShield::new();
    let bb = brain_core::Blackboard::new();
    let arena = Arena {
        shield_hand: Some(Hand::Off),
        ..Default::default()
    };

    assert!(Behavior::<Arena>::check_extra_start_conditions(
        &mut shield,
        &ctx(0),
        1,
        &arena,
        &bb
    ));
    assert_eq!(shield.hand(), Hand::Off);
}

#[test]
fn shield_is_raised_and_lowered_by_the_brain() {
    let mut brain = Brain::<Arena>::builder(1)
        .activity(ActivityGroup::core_tasks(vec![Box::new(BlockWithShield::new())]))
        .build()
        .unwrap();
    let mut arena = Arena {
        shield_hand: Some(Hand::Main),
        ..Default::default()
    };

    brain.tick(&ctx(0), &mut arena);
    assert_eq!(arena.using, Some(Hand::Main));

    brain.tick(&ctx(1), &mut arena);
    assert!(brain.transitions().is_empty());

    brain.stop_all(&ctx(2), &mut arena);
    assert_eq!(arena.using, None);
    assert_eq!(arena.stops, 1);
}

#[test]
fn shield_stop_leaves_other_item_use_alone() {
    let mut shield = BlockWithShield::new();
    let mut bb = brain_core::Blackboard::new();
    let mut arena = Arena {
        shield_hand: Some(Hand::Main),
        using: Some(Hand::Off),
        ..Default::default()
    };

    Behavior::<Arena>::stop(&mut shield, &ctx(0), 1, &mut arena, &mut bb);
    assert_eq!(arena.using, Some(Hand::Off));
    assert_eq!(arena.stops, 0);
}

fn fight_brain() -> Brain<Arena> {
    Brain::<Arena>::builder(1)
        .activity(ActivityGroup::fight_tasks(
            ATTACK_TARGET,
            vec![Box::new(
                SetWalkTargetToAttackTarget::<Arena>::new()
                    .speed_mod(|_, _, _| 1.25)
                    .close_enough_dist(|_, _, _| 2),
            )],
        ))
        .build()
        .unwrap()
}

#[test]
fn walk_target_follows_attack_target() {
    let mut brain = fight_brain();
    let mut arena = Arena::default();

    brain.tick(&ctx(0), &mut arena);
    assert!(!brain.blackboard.contains(WALK_TARGET));
    assert!(!brain.is_active(Activity::FIGHT));

    brain.blackboard.set(ATTACK_TARGET, EntityRef(9));
    brain.tick(&ctx(1), &mut arena);

    let walk = brain.blackboard.get(WALK_TARGET).copied().unwrap();
    assert_eq!(walk.target, EntityRef(9));
    assert_eq!(walk.speed, 1.25);
    assert_eq!(walk.close_enough, 2);
    assert_eq!(
        brain.blackboard.get(LOOK_TARGET).map(|l| l.target),
        Some(EntityRef(9))
    );
}

#[test]
fn walk_target_is_cleared_when_target_is_in_reach() {
    let mut brain = fight_brain();
    let mut arena = Arena {
        visible: true,
        in_range: true,
        ..Default::default()
    };

    brain.blackboard.set(ATTACK_TARGET, EntityRef(9));
    brain.tick(&ctx(0), &mut arena);
    assert!(!brain.blackboard.contains(WALK_TARGET));

    arena.in_range = false;
    brain.tick(&ctx(1), &mut arena); // one-shot stops
    brain.tick(&ctx(2), &mut arena); // and restarts
    assert!(brain.blackboard.contains(WALK_TARGET));

    brain.blackboard.erase(ATTACK_TARGET);
    brain.tick(&ctx(3), &mut arena);
    assert!(!brain.is_active(Activity::FIGHT));
    assert!(!brain.blackboard.contains(ATTACK_TARGET));
}
