use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Blackboard;

/// Untyped identity of a blackboard fact.
///
/// Condition sets and wipe sets only care about *which* fact is meant, not its value type, so
/// they are expressed in `MemoryId`s. Every [`MemoryKey`] converts into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MemoryId(pub u64);

/// Typed key of a blackboard fact.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemoryKey<T: 'static> {
    id: u64,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for MemoryKey<T> {}

impl<T: 'static> Clone for MemoryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> MemoryKey<T> {
    pub const fn new(id: u64) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub const fn id(self) -> MemoryId {
        MemoryId(self.id)
    }
}

impl<T: 'static> From<MemoryKey<T>> for MemoryId {
    fn from(key: MemoryKey<T>) -> Self {
        key.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MemoryStatus {
    Absent,
    Present,
}

/// A conjunction of `(fact, status)` conditions checked against a blackboard.
///
/// Requirements are plain immutable values. A behavior type that always declares the same
/// requirement should build it once (e.g. in a `static LazyLock`) and hand out references.
///
/// Keys registered through [`MemoryRequirement::uses`] are declared for diagnostics only and never
/// take part in evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRequirement {
    conditions: Vec<(MemoryId, MemoryStatus)>,
    uses: Vec<MemoryId>,
}

impl MemoryRequirement {
    pub const fn none() -> Self {
        Self {
            conditions: Vec::new(),
            uses: Vec::new(),
        }
    }

    /// Require the fact to be present.
    pub fn has(self, id: impl Into<MemoryId>) -> Self {
        self.require(id, MemoryStatus::Present)
    }

    /// Require the fact to be absent.
    pub fn lacks(self, id: impl Into<MemoryId>) -> Self {
        self.require(id, MemoryStatus::Absent)
    }

    /// Declare a fact the behavior reads or writes without gating on it.
    pub fn uses(mut self, id: impl Into<MemoryId>) -> Self {
        let id = id.into();
        if !self.uses.contains(&id) {
            self.uses.push(id);
        }
        self
    }

    pub fn require(mut self, id: impl Into<MemoryId>, status: MemoryStatus) -> Self {
        self.insert(id.into(), status);
        self
    }

    /// Add a condition, returning `false` if the exact pair was already present.
    ///
    /// Conflicting pairs for the same fact are kept; the conjunction then never holds.
    pub fn insert(&mut self, id: MemoryId, status: MemoryStatus) -> bool {
        if self.conditions.contains(&(id, status)) {
            return false;
        }
        self.conditions.push((id, status));
        true
    }

    pub fn conditions(&self) -> &[(MemoryId, MemoryStatus)] {
        &self.conditions
    }

    pub fn used(&self) -> &[MemoryId] {
        &self.uses
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// `true` when there are no conditions; an empty requirement always holds.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn is_met(&self, blackboard: &Blackboard) -> bool {
        self.unmet(blackboard).is_none()
    }

    /// First condition (in declaration order) that does not hold.
    pub fn unmet(&self, blackboard: &Blackboard) -> Option<(MemoryId, MemoryStatus)> {
        self.conditions
            .iter()
            .copied()
            .find(|&(id, status)| blackboard.status(id) != status)
    }
}
