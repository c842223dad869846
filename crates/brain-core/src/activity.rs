use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::behavior::BehaviorSlot;
use crate::{Behavior, BehaviorId, ConfigError, MemoryId, MemoryRequirement, MemoryStatus, WorldMut};

/// Identity of a thematic set of behaviors (idle, fight, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Activity(pub &'static str);

impl Activity {
    pub const CORE: Activity = Activity("core");
    pub const IDLE: Activity = Activity("idle");
    pub const WORK: Activity = Activity("work");
    pub const PLAY: Activity = Activity("play");
    pub const REST: Activity = Activity("rest");
    pub const MEET: Activity = Activity("meet");
    pub const PANIC: Activity = Activity("panic");
    pub const RAID: Activity = Activity("raid");
    pub const PRE_RAID: Activity = Activity("pre_raid");
    pub const HIDE: Activity = Activity("hide");
    pub const FIGHT: Activity = Activity("fight");
    pub const CELEBRATE: Activity = Activity("celebrate");
    pub const ADMIRE_ITEM: Activity = Activity("admire_item");
    pub const AVOID: Activity = Activity("avoid");
    pub const RIDE: Activity = Activity("ride");

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Assembly-time description of an [`ActivityGroup`].
///
/// Behavior priorities are assigned in insertion order starting at [`priority`](Self::priority),
/// so the first behavior added is the most urgent one of the group.
pub struct ActivityGroupBuilder<W>
where
    W: WorldMut + 'static,
{
    activity: Activity,
    priority_start: i32,
    behaviors: Vec<Box<dyn Behavior<W>>>,
    conditions: MemoryRequirement,
    wipe_on_finish: Vec<MemoryId>,
    allow_empty: bool,
}

impl<W> ActivityGroupBuilder<W>
where
    W: WorldMut + 'static,
{
    pub fn priority(mut self, priority_start: i32) -> Self {
        self.priority_start = priority_start;
        self
    }

    pub fn behavior(mut self, behavior: impl Behavior<W>) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    pub fn behaviors(mut self, behaviors: Vec<Box<dyn Behavior<W>>>) -> Self {
        self.behaviors.extend(behaviors);
        self
    }

    /// Gate the whole group on a fact status.
    pub fn only_start_with_memory_status(
        mut self,
        id: impl Into<MemoryId>,
        status: MemoryStatus,
    ) -> Self {
        self.conditions.insert(id.into(), status);
        self
    }

    /// Erase these facts whenever the group stops being active.
    pub fn wipe_memories_when_finished<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MemoryId>,
    {
        for id in ids {
            let id = id.into();
            if !self.wipe_on_finish.contains(&id) {
                self.wipe_on_finish.push(id);
            }
        }
        self
    }

    /// The group consumes these facts: it only runs while they are present and erases them when
    /// it stops, so a stale fact cannot re-trigger the group forever.
    pub fn require_and_wipe_memories_on_use<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<MemoryId>,
    {
        let ids: Vec<MemoryId> = ids.into_iter().map(Into::into).collect();
        for &id in &ids {
            self.conditions.insert(id, MemoryStatus::Present);
        }
        self.wipe_memories_when_finished(ids)
    }

    /// Accept a group without behaviors (e.g. a placeholder rest activity).
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// Validate and freeze the group. Behavior ids are renumbered when the group is registered
    /// with a brain.
    pub fn build(self) -> Result<ActivityGroup<W>, ConfigError> {
        let activity = self.activity;
        if self.behaviors.is_empty() && !self.allow_empty {
            return Err(ConfigError::EmptyGroup { activity });
        }

        let mut slots = Vec::with_capacity(self.behaviors.len());
        for (index, behavior) in self.behaviors.into_iter().enumerate() {
            let priority = i32::try_from(index)
                .ok()
                .and_then(|offset| self.priority_start.checked_add(offset))
                .ok_or(ConfigError::PriorityOverflow { activity, index })?;
            slots.push(BehaviorSlot::new(
                BehaviorId::new(0, index),
                priority,
                behavior,
            ));
        }

        Ok(ActivityGroup {
            activity,
            priority_start: self.priority_start,
            conditions: self.conditions,
            wipe_on_finish: self.wipe_on_finish,
            slots,
        })
    }
}

/// An activity's behaviors, their activation gate, and the facts to erase when it ends.
///
/// Configuration is fixed once built; only the behaviors' run state changes afterwards.
pub struct ActivityGroup<W>
where
    W: WorldMut + 'static,
{
    activity: Activity,
    priority_start: i32,
    conditions: MemoryRequirement,
    wipe_on_finish: Vec<MemoryId>,
    pub(crate) slots: Vec<BehaviorSlot<W>>,
}

impl<W> ActivityGroup<W>
where
    W: WorldMut + 'static,
{
    pub fn builder(activity: Activity) -> ActivityGroupBuilder<W> {
        ActivityGroupBuilder {
            activity,
            priority_start: 0,
            behaviors: Vec::new(),
            conditions: MemoryRequirement::none(),
            wipe_on_finish: Vec::new(),
            allow_empty: false,
        }
    }

    /// Always-on maintenance behaviors at the top of the priority range.
    pub fn core_tasks(behaviors: Vec<Box<dyn Behavior<W>>>) -> ActivityGroupBuilder<W> {
        Self::builder(Activity::CORE).priority(0).behaviors(behaviors)
    }

    pub fn idle_tasks(behaviors: Vec<Box<dyn Behavior<W>>>) -> ActivityGroupBuilder<W> {
        Self::builder(Activity::IDLE).priority(10).behaviors(behaviors)
    }

    /// Fight behaviors, active only while `attack_target` is present and clearing it on exit.
    pub fn fight_tasks(
        attack_target: impl Into<MemoryId>,
        behaviors: Vec<Box<dyn Behavior<W>>>,
    ) -> ActivityGroupBuilder<W> {
        Self::builder(Activity::FIGHT)
            .priority(10)
            .behaviors(behaviors)
            .require_and_wipe_memories_on_use([attack_target.into()])
    }

    pub fn empty() -> ActivityGroupBuilder<W> {
        Self::builder(Activity::REST).allow_empty()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn priority_start(&self) -> i32 {
        self.priority_start
    }

    pub fn activation_conditions(&self) -> &MemoryRequirement {
        &self.conditions
    }

    pub fn wipe_on_finish(&self) -> &[MemoryId] {
        &self.wipe_on_finish
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(absolute priority, behavior name)` in registration order.
    pub fn priorities(&self) -> impl Iterator<Item = (i32, &'static str)> + '_ {
        self.slots.iter().map(|s| (s.priority, s.name()))
    }

    pub(crate) fn set_group_index(&mut self, group: usize) {
        for slot in &mut self.slots {
            slot.id.group = group;
        }
    }
}
