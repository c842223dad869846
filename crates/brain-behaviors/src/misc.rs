use brain_core::{Behavior, BehaviorResult, Blackboard, MemoryRequirement, TickContext, WorldMut};

use crate::NO_REQUIREMENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Main,
    Off,
}

/// Host support for agents that hold and use items.
pub trait ItemUser: WorldMut {
    /// Whether the item held in `hand` blocks when used.
    fn holds_blocking_item(&self, agent: Self::Agent, hand: Hand) -> bool;

    fn start_using_item(&mut self, agent: Self::Agent, hand: Hand);

    /// Whether the agent is currently using an item that blocks.
    fn is_blocking(&self, agent: Self::Agent) -> bool;

    fn stop_using_item(&mut self, agent: Self::Agent);
}

/// Raise a shield held in either hand, main hand first, and keep it up while blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWithShield {
    hand: Hand,
}

impl Default for BlockWithShield {
    fn default() -> Self {
        Self { hand: Hand::Main }
    }
}

impl BlockWithShield {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand chosen by the last successful start check.
    pub fn hand(&self) -> Hand {
        self.hand
    }
}

impl<W> Behavior<W> for BlockWithShield
where
    W: ItemUser + 'static,
{
    fn memory_requirement(&self) -> &MemoryRequirement {
        NO_REQUIREMENT
    }

    fn name(&self) -> &'static str {
        "block_with_shield"
    }

    fn check_extra_start_conditions(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        let Some(hand) = [Hand::Main, Hand::Off]
            .into_iter()
            .find(|&hand| world.holds_blocking_item(agent, hand))
        else {
            return false;
        };
        self.hand = hand;
        true
    }

    fn start(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        world.start_using_item(agent, self.hand);
        Ok(())
    }

    fn should_keep_running(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        world.is_blocking(agent)
    }

    fn stop(
        &mut self,
        _ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
        // Only lower the shield; leave any other item use alone.
        if world.is_blocking(agent) {
            world.stop_using_item(agent);
        }
    }
}
