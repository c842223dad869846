use std::any::Any;
use std::collections::BTreeMap;

use crate::{MemoryId, MemoryKey, MemoryStatus};

struct Fact {
    value: Box<dyn Any>,
    expires_at: Option<u64>,
}

impl Fact {
    fn is_live(&self, now: u64) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Per-agent store of typed, optionally expiring facts.
///
/// A fact is either present (a value is stored and its expiry, if any, has not elapsed) or
/// absent. Unknown keys are absent. Expired facts read as absent immediately and are physically
/// dropped by [`Blackboard::sweep_expired`] or the next write to the same key.
///
/// The blackboard's clock only moves through [`Blackboard::advance_to`]; the owning brain calls
/// it at the start of every tick.
#[derive(Default)]
pub struct Blackboard {
    facts: BTreeMap<u64, Fact>,
    now: u64,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn advance_to(&mut self, tick: u64) {
        self.now = tick;
    }

    /// Drop every fact whose expiry has elapsed, returning how many were dropped.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.now;
        let before = self.facts.len();
        self.facts.retain(|_, fact| fact.is_live(now));
        before - self.facts.len()
    }

    pub fn clear(&mut self) {
        self.facts.clear();
    }

    /// Number of present facts.
    pub fn len(&self) -> usize {
        self.facts.values().filter(|f| f.is_live(self.now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self, id: impl Into<MemoryId>) -> MemoryStatus {
        match self.live(id.into().0) {
            Some(_) => MemoryStatus::Present,
            None => MemoryStatus::Absent,
        }
    }

    pub fn contains<T: 'static>(&self, key: MemoryKey<T>) -> bool {
        self.status(key) == MemoryStatus::Present
    }

    /// Tick at which a present fact stops being present, if it expires at all.
    pub fn expires_at(&self, id: impl Into<MemoryId>) -> Option<u64> {
        self.live(id.into().0)?.expires_at
    }

    pub fn set<T: 'static>(&mut self, key: MemoryKey<T>, value: T) {
        self.set_with_ttl(key, value, None);
    }

    /// Store `value`, expiring `ttl` ticks from now when given.
    ///
    /// A fact set at tick `t` with ttl `n` is present for ticks `t..t + n`.
    pub fn set_with_ttl<T: 'static>(&mut self, key: MemoryKey<T>, value: T, ttl: Option<u64>) {
        let expires_at = ttl.map(|ttl| self.now.saturating_add(ttl));
        self.facts.insert(
            key.id().0,
            Fact {
                value: Box::new(value),
                expires_at,
            },
        );
    }

    pub fn get<T: 'static>(&self, key: MemoryKey<T>) -> Option<&T> {
        let id = key.id().0;
        let fact = self.live(id)?;
        fact.value.downcast_ref::<T>().or_else(|| type_mismatch(id))
    }

    pub fn get_mut<T: 'static>(&mut self, key: MemoryKey<T>) -> Option<&mut T> {
        let id = key.id().0;
        let now = self.now;
        let fact = self.facts.get_mut(&id).filter(|f| f.is_live(now))?;
        fact.value.downcast_mut::<T>().or_else(|| type_mismatch(id))
    }

    /// Make the fact absent. Erasing an absent fact is a no-op.
    pub fn erase(&mut self, id: impl Into<MemoryId>) {
        self.facts.remove(&id.into().0);
    }

    /// Make the fact absent, returning its value if it was present.
    pub fn remove<T: 'static>(&mut self, key: MemoryKey<T>) -> Option<T> {
        let id = key.id().0;
        let fact = self.facts.remove(&id)?;
        if !fact.is_live(self.now) {
            return None;
        }
        fact.value
            .downcast::<T>()
            .map(|b| *b)
            .ok()
            .or_else(|| type_mismatch(id))
    }

    fn live(&self, id: u64) -> Option<&Fact> {
        self.facts.get(&id).filter(|f| f.is_live(self.now))
    }
}

fn type_mismatch<R>(id: u64) -> Option<R> {
    panic!("blackboard type mismatch for key id={id} (stored type differs from requested)")
}
