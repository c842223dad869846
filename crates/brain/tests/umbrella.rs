#![cfg(feature = "full")]

use brain::behaviors::{BlockWithShield, Hand, ItemUser};
use brain::core::{WorldMut, WorldView};
use brain::{Activity, ActivityGroup, Brain, TickContext};

#[derive(Default)]
struct Knight {
    blocking: bool,
}

impl WorldView for Knight {
    type Agent = u64;
}

impl WorldMut for Knight {}

impl ItemUser for Knight {
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

#[test]
fn reexports_compose_into_a_brain() {
    let mut brain = Brain::<Knight>::builder(3)
        .activity(ActivityGroup::core_tasks(vec![Box::new(BlockWithShield::new())]))
        .build()
        .unwrap();
    let mut knight = Knight::default();

    brain.tick(&TickContext::new(0), &mut knight);
    assert!(knight.blocking);
    assert!(brain.is_active(Activity::CORE));
    assert!(brain.blackboard().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn brain_config_json_roundtrip() {
    let config = brain::BrainConfig::deterministic(5u64, 3);
    let json = serde_json::to_string(&config).unwrap();
    let back: brain::BrainConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
