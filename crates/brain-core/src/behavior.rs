use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{BehaviorError, BehaviorResult, Blackboard, MemoryRequirement, TickContext, WorldMut};

/// A lifecycle-driven unit of agent action.
///
/// The brain owns the run state; implementors only provide the hooks. Per tick a stopped
/// behavior is started when its [`memory_requirement`](Behavior::memory_requirement) holds and
/// [`check_extra_start_conditions`](Behavior::check_extra_start_conditions) agrees. A running
/// behavior is ticked while its requirement holds and
/// [`should_keep_running`](Behavior::should_keep_running) agrees, and stopped otherwise.
///
/// Long-running external work must not block: fire it in `start`, poll it in
/// `should_keep_running`, release it in `stop`.
pub trait Behavior<W>: 'static
where
    W: WorldMut + 'static,
{
    /// Facts that must hold for this behavior to start or keep running.
    ///
    /// Must not depend on blackboard contents.
    fn memory_requirement(&self) -> &MemoryRequirement;

    fn name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Behavior-specific start guard. May remember a decision for `start`.
    fn check_extra_start_conditions(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        true
    }

    fn start(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        Ok(())
    }

    /// Checked every tick while running. The default runs the behavior for a single tick.
    fn should_keep_running(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &W,
        _blackboard: &Blackboard,
    ) -> bool {
        false
    }

    fn tick(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) -> BehaviorResult<()> {
        Ok(())
    }

    /// Release whatever `start` acquired. Called exactly once per run, including runs whose
    /// `start` failed.
    fn stop(
        &mut self,
        _ctx: &TickContext,
        _agent: W::Agent,
        _world: &mut W,
        _blackboard: &mut Blackboard,
    ) {
    }

    /// Upper bound on a single run, in ticks.
    fn max_run_ticks(&self) -> Option<u64> {
        None
    }

    /// Ticks after a stop during which the behavior may not start again.
    fn cooldown_ticks(&self) -> u64 {
        0
    }
}

/// Position of a behavior in its brain: registration index of the group and index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BehaviorId {
    pub group: usize,
    pub index: usize,
}

impl BehaviorId {
    pub const fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

impl fmt::Display for BehaviorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.group, self.index)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BehaviorState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopReason {
    /// `should_keep_running` returned false.
    Finished,
    RequirementLost,
    TimedOut,
    /// The owning activity group stopped being active.
    Deactivated,
    /// `start` or `tick` returned an error.
    Fault,
    /// The brain was stopped as a whole (agent removed or respawned).
    Removed,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::Finished => "finished",
            StopReason::RequirementLost => "requirement_lost",
            StopReason::TimedOut => "timed_out",
            StopReason::Deactivated => "deactivated",
            StopReason::Fault => "fault",
            StopReason::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TransitionKind {
    Started,
    Stopped(StopReason),
}

/// One applied lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Transition {
    pub tick: u64,
    pub behavior: BehaviorId,
    pub name: &'static str,
    pub kind: TransitionKind,
}

pub(crate) enum SlotEvent {
    Started,
    Stopped(StopReason),
    /// The hook failed and the behavior has already been stopped.
    Faulted {
        started: bool,
        error: BehaviorError,
    },
}

/// A behavior plus the run state the brain tracks for it.
pub(crate) struct BehaviorSlot<W>
where
    W: WorldMut + 'static,
{
    pub(crate) id: BehaviorId,
    pub(crate) priority: i32,
    behavior: Box<dyn Behavior<W>>,
    state: BehaviorState,
    started_at: Option<u64>,
    stopped_at: Option<u64>,
}

impl<W> BehaviorSlot<W>
where
    W: WorldMut + 'static,
{
    pub(crate) fn new(id: BehaviorId, priority: i32, behavior: Box<dyn Behavior<W>>) -> Self {
        Self {
            id,
            priority,
            behavior,
            state: BehaviorState::Stopped,
            started_at: None,
            stopped_at: None,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        self.behavior.name()
    }

    pub(crate) fn state(&self) -> BehaviorState {
        self.state
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state == BehaviorState::Running
    }

    pub(crate) fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    fn cooling_down(&self, tick: u64) -> bool {
        let cooldown = self.behavior.cooldown_ticks();
        match self.stopped_at {
            Some(stopped) if cooldown > 0 => tick < stopped.saturating_add(cooldown),
            _ => false,
        }
    }

    /// Stopped -> Running when every guard passes.
    pub(crate) fn try_start(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Option<SlotEvent> {
        if self.is_running() || self.cooling_down(ctx.tick) {
            return None;
        }
        if !self.behavior.memory_requirement().is_met(blackboard) {
            return None;
        }
        if !self
            .behavior
            .check_extra_start_conditions(ctx, agent, world, blackboard)
        {
            return None;
        }

        self.state = BehaviorState::Running;
        self.started_at = Some(ctx.tick);
        match self.behavior.start(ctx, agent, world, blackboard) {
            Ok(()) => Some(SlotEvent::Started),
            Err(error) => {
                self.halt(ctx, agent, world, blackboard);
                Some(SlotEvent::Faulted {
                    started: true,
                    error,
                })
            }
        }
    }

    /// Running -> Running (tick) or Running -> Stopped.
    pub(crate) fn tick_or_stop(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) -> Option<SlotEvent> {
        if !self.is_running() {
            return None;
        }

        let elapsed = ctx.tick.saturating_sub(self.started_at.unwrap_or(ctx.tick));
        let reason = if self.behavior.max_run_ticks().is_some_and(|max| elapsed >= max) {
            Some(StopReason::TimedOut)
        } else if !self.behavior.memory_requirement().is_met(blackboard) {
            Some(StopReason::RequirementLost)
        } else if !self
            .behavior
            .should_keep_running(ctx, agent, world, blackboard)
        {
            Some(StopReason::Finished)
        } else {
            None
        };

        if let Some(reason) = reason {
            return self.force_stop(ctx, agent, world, blackboard, reason);
        }

        match self.behavior.tick(ctx, agent, world, blackboard) {
            Ok(()) => None,
            Err(error) => {
                self.halt(ctx, agent, world, blackboard);
                Some(SlotEvent::Faulted {
                    started: false,
                    error,
                })
            }
        }
    }

    /// Stop a running behavior. A no-op for a stopped one.
    pub(crate) fn force_stop(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
        reason: StopReason,
    ) -> Option<SlotEvent> {
        if !self.is_running() {
            return None;
        }
        self.halt(ctx, agent, world, blackboard);
        Some(SlotEvent::Stopped(reason))
    }

    fn halt(
        &mut self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &mut W,
        blackboard: &mut Blackboard,
    ) {
        self.behavior.stop(ctx, agent, world, blackboard);
        self.state = BehaviorState::Stopped;
        self.stopped_at = Some(ctx.tick);
    }
}
