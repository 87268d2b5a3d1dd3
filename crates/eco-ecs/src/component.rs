//! Per-component sparse storage.
//!
//! Every registered component name owns one [`ComponentStore`]: a sparse map
//! from [`EntityId`] to that component's instance data, plus the factory
//! resolved from the component's [`ComponentDefinition`]. Names that were
//! never registered resolve to the [`NullComponentStore`], which answers
//! every read with "absent" so that lookups by name never fail.

use crate::definition::{ComponentDefinition, ComponentFactory};
use crate::entity::EntityId;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ComponentStorage
// ---------------------------------------------------------------------------

/// Read interface shared by real stores and the null store.
pub trait ComponentStorage {
    /// Instance data for `entity`, or `None` if it was never set.
    fn get(&self, entity: EntityId) -> Option<&Value>;

    /// Whether data was ever set for `entity`.
    fn has(&self, entity: EntityId) -> bool;

    /// Number of entities holding this component.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// ComponentStore
// ---------------------------------------------------------------------------

/// Sparse `EntityId -> instance data` map for a single component name.
///
/// Entries are created on the first [`set`](Self::set) for an id and
/// replaced on every later one. Each write runs the resolved factory against
/// the override, so template components always merge against the original
/// defaults rather than the previous value.
pub struct ComponentStore {
    entities: HashMap<EntityId, Value>,
    factory: ComponentFactory,
}

impl ComponentStore {
    /// Create an empty store, resolving `definition` into its factory.
    pub fn new(definition: impl Into<ComponentDefinition>) -> Self {
        Self {
            entities: HashMap::new(),
            factory: definition.into().resolve(),
        }
    }

    /// Store `factory(data)` for `entity`, replacing any previous value.
    ///
    /// Pass [`Value::Null`] to use the defaults alone.
    pub fn set(&mut self, entity: EntityId, data: Value) {
        let instance = (self.factory)(data);
        self.entities.insert(entity, instance);
    }

    /// Mutable access to the stored instance data.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut Value> {
        self.entities.get_mut(&entity)
    }

    /// Ids holding this component, sorted ascending.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl ComponentStorage for ComponentStore {
    fn get(&self, entity: EntityId) -> Option<&Value> {
        self.entities.get(&entity)
    }

    fn has(&self, entity: EntityId) -> bool {
        self.entities.contains_key(&entity)
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl fmt::Debug for ComponentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentStore")
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// NullComponentStore
// ---------------------------------------------------------------------------

/// Stand-in for component names that were never registered.
///
/// Read-only: it has no `set`, reports `has == false` and `get == None` for
/// every id, and is never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullComponentStore;

impl ComponentStorage for NullComponentStore {
    fn get(&self, _entity: EntityId) -> Option<&Value> {
        None
    }

    fn has(&self, _entity: EntityId) -> bool {
        false
    }

    fn len(&self) -> usize {
        0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
