//! Entity identifiers, id issuance, and entity construction.
//!
//! An [`EntityId`] is an opaque 64-bit integer. Ids are issued by an
//! [`IdFactory`] in strictly increasing order starting from a configurable
//! seed and are never reused. An [`Entity`] is nothing more than a value
//! wrapping its id: component data lives in the component stores, keyed by
//! id, never on the entity itself.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// An opaque entity identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// Raw `u64` representation.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct from a raw `u64`.
    ///
    /// Any value is accepted; stores treat ids as opaque keys and do not
    /// check that the id was issued by an [`IdFactory`].
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An immutable handle exposing just its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    id: EntityId,
}

impl Entity {
    #[inline]
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }

    /// The id this entity wraps.
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

// ---------------------------------------------------------------------------
// EntityFactory
// ---------------------------------------------------------------------------

/// Builds one [`Entity`] per call from an id.
///
/// Iterators take the factory as a parameter so that hosts can wrap entity
/// construction. Any `Fn(EntityId) -> Entity` is a factory.
pub trait EntityFactory {
    fn create(&self, id: EntityId) -> Entity;
}

impl<F> EntityFactory for F
where
    F: Fn(EntityId) -> Entity,
{
    #[inline]
    fn create(&self, id: EntityId) -> Entity {
        self(id)
    }
}

/// The default factory: [`Entity::new`].
pub type DefaultEntityFactory = fn(EntityId) -> Entity;

/// Returns the default entity factory.
pub fn default_entity_factory() -> DefaultEntityFactory {
    Entity::new
}

// ---------------------------------------------------------------------------
// IdFactory
// ---------------------------------------------------------------------------

/// Issues monotonically increasing [`EntityId`]s.
///
/// Each facade owns exactly one factory; independent factories give
/// independent id spaces. There is no reset and no recycling.
#[derive(Debug, Clone)]
pub struct IdFactory {
    seed: u64,
    /// `None` once `u64::MAX` has been issued.
    next_id: Option<u64>,
    last_issued: Option<u64>,
}

impl IdFactory {
    /// The seed used by [`IdFactory::default`].
    pub const DEFAULT_SEED: u64 = 1;

    /// Create a factory whose first issued id is `seed`.
    ///
    /// Ids are positive: a seed of `0` is raised to `1`.
    pub fn new(seed: u64) -> Self {
        let seed = seed.max(1);
        Self {
            seed,
            next_id: Some(seed),
            last_issued: None,
        }
    }

    /// Issue the next id.
    ///
    /// # Panics
    ///
    /// Panics if every id up to `u64::MAX` has already been issued.
    pub fn create(&mut self) -> EntityId {
        let Some(id) = self.next_id else {
            panic!("entity id space exhausted after {}", u64::MAX);
        };
        self.next_id = id.checked_add(1);
        self.last_issued = Some(id);
        EntityId(id)
    }

    /// The id the next call to [`create`](Self::create) will return, or
    /// `None` if the id space is exhausted.
    pub fn peek_next(&self) -> Option<EntityId> {
        self.next_id.map(EntityId)
    }

    /// The first id this factory issues.
    pub fn seed(&self) -> EntityId {
        EntityId(self.seed)
    }

    /// The first and last issued ids, or `None` if nothing was issued yet.
    ///
    /// Ids are contiguous, so every id in the range was issued.
    pub fn issued_range(&self) -> Option<(EntityId, EntityId)> {
        self.last_issued().map(|last| (self.seed(), last))
    }

    /// The most recently issued id, or `None` if nothing was issued yet.
    pub fn last_issued(&self) -> Option<EntityId> {
        self.last_issued.map(EntityId)
    }
}

impl Default for IdFactory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
