use core::fmt::Debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::behavior::{BehaviorSlot, SlotEvent};
use crate::{
    Activity, ActivityGroup, ActivityGroupBuilder, AgentId, BehaviorId, BehaviorState, Blackboard,
    ConfigError, StopReason, TickContext, Transition, TransitionKind, WorldMut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrainConfig {
    /// Elect activities and start behaviors every N ticks. On the ticks in between running
    /// behaviors are still continued or stopped, and groups whose gate fails are deactivated.
    pub think_every_ticks: u32,
    pub think_offset_ticks: u32,
    /// Physically drop expired facts at the start of each tick.
    pub sweep_expired: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            think_every_ticks: 1,
            think_offset_ticks: 0,
            sweep_expired: true,
        }
    }
}

impl BrainConfig {
    /// Think every `think_every_ticks`, staggering agents by their stable id.
    pub fn deterministic(agent: impl AgentId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        let offset = (agent.stable_id() % u64::from(every)) as u32;
        Self {
            think_every_ticks: every,
            think_offset_ticks: offset,
            ..Self::default()
        }
    }

    pub fn should_think(&self, tick: u64) -> bool {
        let every = u64::from(self.think_every_ticks.max(1));
        (tick % every + u64::from(self.think_offset_ticks) % every) % every == 0
    }
}

enum Election {
    AllEligible,
    Prioritized {
        core: Vec<Activity>,
        order: Vec<Activity>,
    },
}

pub struct BrainBuilder<W>
where
    W: WorldMut + 'static,
{
    agent: W::Agent,
    config: BrainConfig,
    groups: Vec<Result<ActivityGroup<W>, ConfigError>>,
    core_activities: Vec<Activity>,
    activity_priorities: Vec<Activity>,
}

impl<W> BrainBuilder<W>
where
    W: WorldMut + 'static,
{
    pub fn config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a group; assembly errors surface from [`BrainBuilder::build`].
    pub fn activity(mut self, group: ActivityGroupBuilder<W>) -> Self {
        self.groups.push(group.build());
        self
    }

    pub fn group(mut self, group: ActivityGroup<W>) -> Self {
        self.groups.push(Ok(group));
        self
    }

    /// Activities that run alongside whichever prioritized activity is elected.
    pub fn core_activities(mut self, activities: impl IntoIterator<Item = Activity>) -> Self {
        self.core_activities.extend(activities);
        self
    }

    /// Elect at most one non-core activity per tick: the first eligible one in this order.
    ///
    /// Without priorities every eligible group is active.
    pub fn activity_priorities(mut self, activities: impl IntoIterator<Item = Activity>) -> Self {
        self.activity_priorities.extend(activities);
        self
    }

    pub fn build(self) -> Result<Brain<W>, ConfigError> {
        let mut groups: Vec<ActivityGroup<W>> = Vec::with_capacity(self.groups.len());
        for (index, group) in self.groups.into_iter().enumerate() {
            let mut group = group?;
            let activity = group.activity();
            if groups.iter().any(|g| g.activity() == activity) {
                return Err(ConfigError::DuplicateActivity { activity });
            }
            group.set_group_index(index);
            groups.push(group);
        }

        let election = if self.activity_priorities.is_empty() {
            Election::AllEligible
        } else {
            if let Some(group) = groups.iter().find(|g| {
                !self.core_activities.contains(&g.activity())
                    && !self.activity_priorities.contains(&g.activity())
            }) {
                return Err(ConfigError::UnlistedActivity {
                    activity: group.activity(),
                });
            }
            Election::Prioritized {
                core: self.core_activities,
                order: self.activity_priorities,
            }
        };

        let mut order: Vec<(i32, BehaviorId)> = groups
            .iter()
            .flat_map(|g| g.slots.iter().map(|s| (s.priority, s.id)))
            .collect();
        order.sort_by_key(|&(priority, id)| (priority, id));

        let active = vec![false; groups.len()];
        Ok(Brain {
            agent: self.agent,
            config: self.config,
            blackboard: Blackboard::new(),
            groups,
            active,
            order: order.into_iter().map(|(_, id)| id).collect(),
            election,
            transitions: Vec::new(),
        })
    }
}

/// Per-agent scheduler: the agent's blackboard plus its activity groups.
///
/// [`Brain::tick`] is the only entry point and must be called once per simulation step.
pub struct Brain<W>
where
    W: WorldMut + 'static,
{
    pub agent: W::Agent,
    pub config: BrainConfig,
    pub blackboard: Blackboard,
    groups: Vec<ActivityGroup<W>>,
    active: Vec<bool>,
    /// Every behavior sorted by (priority, group, index).
    order: Vec<BehaviorId>,
    election: Election,
    transitions: Vec<Transition>,
}

impl<W> Brain<W>
where
    W: WorldMut + 'static,
{
    pub fn builder(agent: W::Agent) -> BrainBuilder<W> {
        BrainBuilder {
            agent,
            config: BrainConfig::default(),
            groups: Vec::new(),
            core_activities: Vec::new(),
            activity_priorities: Vec::new(),
        }
    }

    pub fn tick(&mut self, ctx: &TickContext, world: &mut W) {
        self.transitions.clear();
        self.blackboard.advance_to(ctx.tick);
        if self.config.sweep_expired {
            let dropped = self.blackboard.sweep_expired();
            if dropped > 0 {
                tracing::trace!(agent = ?self.agent, tick = ctx.tick, dropped, "expired facts swept");
            }
        }

        // Gates are enforced every tick; elections and starts wait for a think tick.
        let think = self.config.should_think(ctx.tick);
        let elected = self.settle_activities(ctx, world, think);
        if !think {
            self.continue_running(ctx, world);
            return;
        }

        for (index, (group, &now)) in self.groups.iter().zip(&elected).enumerate() {
            if now && !self.active[index] {
                tracing::debug!(
                    agent = ?self.agent,
                    activity = %group.activity(),
                    tick = ctx.tick,
                    "activity activated"
                );
            }
        }
        self.active = elected;

        for &id in &self.order {
            if !self.active[id.group] {
                continue;
            }
            let slot = &mut self.groups[id.group].slots[id.index];
            let event = if slot.is_running() {
                slot.tick_or_stop(ctx, self.agent, world, &mut self.blackboard)
            } else {
                slot.try_start(ctx, self.agent, world, &mut self.blackboard)
            };
            if let Some(event) = event {
                record(&mut self.transitions, self.agent, ctx.tick, slot, event);
            }
        }
    }

    /// Force-stop every running behavior and deactivate every group, without wiping facts.
    ///
    /// Used when the agent leaves the simulation.
    pub fn stop_all(&mut self, ctx: &TickContext, world: &mut W) {
        self.transitions.clear();
        for &id in &self.order {
            let slot = &mut self.groups[id.group].slots[id.index];
            if let Some(event) =
                slot.force_stop(ctx, self.agent, world, &mut self.blackboard, StopReason::Removed)
            {
                record(&mut self.transitions, self.agent, ctx.tick, slot, event);
            }
        }
        self.active.iter_mut().for_each(|a| *a = false);
    }

    /// Stop everything and forget every fact, as on respawn.
    pub fn reset(&mut self, ctx: &TickContext, world: &mut W) {
        self.stop_all(ctx, world);
        self.blackboard.clear();
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    /// Transitions applied by the most recent `tick` (or `stop_all`).
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn running(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        self.order.iter().copied().filter(|&id| {
            self.slot(id).is_some_and(BehaviorSlot::is_running)
        })
    }

    pub fn state(&self, id: BehaviorId) -> Option<BehaviorState> {
        self.slot(id).map(BehaviorSlot::state)
    }

    /// Tick at which the behavior last started.
    pub fn started_at(&self, id: BehaviorId) -> Option<u64> {
        self.slot(id)?.started_at()
    }

    pub fn behavior_name(&self, id: BehaviorId) -> Option<&'static str> {
        self.slot(id).map(BehaviorSlot::name)
    }

    pub fn active_activities(&self) -> impl Iterator<Item = Activity> + '_ {
        self.groups
            .iter()
            .zip(&self.active)
            .filter(|(_, &active)| active)
            .map(|(g, _)| g.activity())
    }

    pub fn is_active(&self, activity: Activity) -> bool {
        self.active_activities().any(|a| a == activity)
    }

    pub fn groups(&self) -> &[ActivityGroup<W>] {
        &self.groups
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up a behavior id by activity and position within the group.
    pub fn behavior_id(&self, activity: Activity, index: usize) -> Option<BehaviorId> {
        let group = self.groups.iter().position(|g| g.activity() == activity)?;
        (index < self.groups[group].len()).then_some(BehaviorId::new(group, index))
    }

    fn slot(&self, id: BehaviorId) -> Option<&BehaviorSlot<W>> {
        self.groups.get(id.group)?.slots.get(id.index)
    }

    /// Groups that should be active. Between think ticks an active group only stays active while
    /// its own gate holds; nothing new is elected.
    fn elect(&self, think: bool) -> Vec<bool> {
        let eligible: Vec<bool> = self
            .groups
            .iter()
            .map(|g| g.activation_conditions().is_met(&self.blackboard))
            .collect();

        if !think {
            return eligible.iter().zip(&self.active).map(|(&ok, &a)| ok && a).collect();
        }

        match &self.election {
            Election::AllEligible => eligible,
            Election::Prioritized { core, order } => {
                let chosen = order.iter().copied().find(|&activity| {
                    self.groups
                        .iter()
                        .zip(&eligible)
                        .any(|(g, &ok)| ok && g.activity() == activity)
                });
                self.groups
                    .iter()
                    .zip(&eligible)
                    .map(|(g, &ok)| {
                        ok && (core.contains(&g.activity()) || Some(g.activity()) == chosen)
                    })
                    .collect()
            }
        }
    }

    /// Deactivate groups that lost their election, then re-elect after any wipe so that a
    /// group unblocked by another group's wipe starts this very tick.
    fn settle_activities(&mut self, ctx: &TickContext, world: &mut W, think: bool) -> Vec<bool> {
        let mut elected = self.elect(think);
        loop {
            let mut wiped = false;
            for group in 0..self.groups.len() {
                if !self.active[group] || elected[group] {
                    continue;
                }
                self.deactivate(group, ctx, world);
                wiped |= !self.groups[group].wipe_on_finish().is_empty();
            }
            if !wiped {
                return elected;
            }
            elected = self.elect(think);
        }
    }

    fn deactivate(&mut self, group: usize, ctx: &TickContext, world: &mut W) {
        let agent = self.agent;
        let g = &mut self.groups[group];
        tracing::debug!(
            agent = ?agent,
            activity = %g.activity(),
            tick = ctx.tick,
            "activity deactivated"
        );

        for slot in g.slots.iter_mut() {
            if let Some(event) =
                slot.force_stop(ctx, agent, world, &mut self.blackboard, StopReason::Deactivated)
            {
                record(&mut self.transitions, agent, ctx.tick, slot, event);
            }
        }
        for &id in g.wipe_on_finish() {
            tracing::trace!(agent = ?agent, activity = %g.activity(), memory = id.0, "wiping memory");
            self.blackboard.erase(id);
        }
        self.active[group] = false;
    }

    fn continue_running(&mut self, ctx: &TickContext, world: &mut W) {
        for &id in &self.order {
            let slot = &mut self.groups[id.group].slots[id.index];
            if let Some(event) = slot.tick_or_stop(ctx, self.agent, world, &mut self.blackboard) {
                record(&mut self.transitions, self.agent, ctx.tick, slot, event);
            }
        }
    }
}

fn record<W>(
    transitions: &mut Vec<Transition>,
    agent: impl Debug,
    tick: u64,
    slot: &BehaviorSlot<W>,
    event: SlotEvent,
) where
    W: WorldMut + 'static,
{
    let behavior = slot.id;
    let name = slot.name();
    let push = |transitions: &mut Vec<Transition>, kind: TransitionKind| {
        transitions.push(Transition {
            tick,
            behavior,
            name,
            kind,
        })
    };

    match event {
        SlotEvent::Started => {
            tracing::debug!(agent = ?agent, behavior = name, id = %behavior, tick, "behavior started");
            push(transitions, TransitionKind::Started);
        }
        SlotEvent::Stopped(reason) => {
            tracing::debug!(
                agent = ?agent,
                behavior = name,
                id = %behavior,
                tick,
                reason = reason.as_str(),
                "behavior stopped"
            );
            push(transitions, TransitionKind::Stopped(reason));
        }
        SlotEvent::Faulted { started, error } => {
            tracing::warn!(
                agent = ?agent,
                behavior = name,
                id = %behavior,
                tick,
                error = %error,
                "behavior fault, forced stop"
            );
            if started {
                push(transitions, TransitionKind::Started);
            }
            push(transitions, TransitionKind::Stopped(StopReason::Fault));
        }
    }
}

/// Tick many brains in stable agent order.
pub fn tick_brains<W>(ctx: &TickContext, world: &mut W, brains: &mut [Brain<W>])
where
    W: WorldMut + 'static,
{
    brains.sort_by_key(|b| b.agent.stable_id());
    for brain in brains.iter_mut() {
        brain.tick(ctx, world);
    }
}
