#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use brain_core::{Blackboard, Brain, MemoryKey, Transition, TransitionKind, WorldMut};

pub const TAG_START: &str = "brain.behavior.start";
pub const TAG_STOP: &str = "brain.behavior.stop";

/// Flat record of something the scheduler did.
///
/// For behavior transitions `a` is the group index and `b` the behavior index within it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
    /// Behavior name, or stop reason for stops.
    pub detail: Cow<'static, str>,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
            detail: Cow::Borrowed(""),
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = detail.into();
        self
    }
}

impl From<&Transition> for TraceEvent {
    fn from(t: &Transition) -> Self {
        let (tag, detail) = match t.kind {
            TransitionKind::Started => (TAG_START, t.name),
            TransitionKind::Stopped(reason) => (TAG_STOP, reason.as_str()),
        };
        TraceEvent::new(t.tick, tag)
            .with_a(t.behavior.group as u64)
            .with_b(t.behavior.index as u64)
            .with_detail(detail)
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.tag == tag)
    }
}

/// Blackboard key for collecting events in memory.
pub const TRACE_LOG: MemoryKey<TraceLog> = MemoryKey::new(0xB4A1_7ACE_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: MemoryKey<Box<dyn TraceSink>> = MemoryKey::new(0xB4A1_7ACE_0000_0002);

/// Send an event to whichever of [`TRACE_LOG`] / [`TRACE_SINK`] is on the blackboard.
pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event.clone());
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}

/// Emit the transitions of the brain's most recent tick into its own blackboard.
///
/// Call once after each `Brain::tick`. Returns the number of events emitted.
pub fn record_transitions<W>(brain: &mut Brain<W>) -> usize
where
    W: WorldMut + 'static,
{
    let events: Vec<TraceEvent> = brain.transitions().iter().map(TraceEvent::from).collect();
    let count = events.len();
    for event in events {
        emit(&mut brain.blackboard, event);
    }
    count
}
