//! Name-keyed registry of component stores.

use crate::component::{ComponentStorage, ComponentStore, NullComponentStore};
use crate::definition::ComponentDefinition;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Registry mapping component names to their [`ComponentStore`]s.
///
/// Lookups by name are total: unknown names resolve to the shared null
/// object (a [`NullComponentStore`] unless replaced via
/// [`set_null_object`](Self::set_null_object)).
pub struct ComponentCollection {
    stores: HashMap<String, ComponentStore>,
    null_object: Box<dyn ComponentStorage>,
}

impl ComponentCollection {
    /// Create an empty collection backed by a [`NullComponentStore`].
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
            null_object: Box::new(NullComponentStore),
        }
    }

    /// Register `name`, building a fresh store from `definition`.
    ///
    /// Re-registering a name replaces the previous store and discards its
    /// data.
    pub fn set(
        &mut self,
        name: &str,
        definition: impl Into<ComponentDefinition>,
    ) -> &mut ComponentStore {
        let definition = definition.into();
        debug!(component = name, kind = definition.kind(), "registering component");
        let store = ComponentStore::new(definition);
        match self.stores.entry(name.to_owned()) {
            Entry::Occupied(mut slot) => {
                let previous = slot.insert(store);
                debug!(
                    component = name,
                    discarded = previous.len(),
                    "component re-registered; previous store dropped"
                );
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(store),
        }
    }

    /// The store for `name`, or the null object if `name` is unknown.
    pub fn get(&self, name: &str) -> &dyn ComponentStorage {
        match self.stores.get(name) {
            Some(store) => store as &dyn ComponentStorage,
            None => &*self.null_object,
        }
    }

    /// Writable access to a registered store.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ComponentStore> {
        self.stores.get_mut(name)
    }

    /// Whether `name` has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.stores.contains_key(name)
    }

    pub fn get_null_object(&self) -> &dyn ComponentStorage {
        &*self.null_object
    }

    /// Replace the object returned for unknown names.
    pub fn set_null_object(&mut self, store: impl ComponentStorage + 'static) {
        self.null_object = Box::new(store);
    }

    /// Number of registered component names.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Registered component names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stores.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }
}

impl Default for ComponentCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentCollection")
            .field("stores", &self.stores)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
