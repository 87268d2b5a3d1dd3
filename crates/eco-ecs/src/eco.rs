//! The top-level facade.
//!
//! [`Eco`] wires a [`ComponentCollection`], an [`IdFactory`] and an
//! [`IteratorFactory`] together. It adds no behavior of its own beyond
//! delegation and the checked write path [`Eco::set_component`].

use crate::collection::ComponentCollection;
use crate::component::{ComponentStorage, ComponentStore};
use crate::definition::ComponentDefinition;
use crate::entity::{
    default_entity_factory, DefaultEntityFactory, Entity, EntityFactory, EntityId, IdFactory,
};
use crate::iter::{EntityIterator, EntitySequence, IteratorFactory};
use crate::EcoError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// EcoConfig
// ---------------------------------------------------------------------------

/// Construction-time settings for an [`Eco`] instance.
///
/// Serde-friendly so hosts can embed it in their own configuration; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoConfig {
    /// First entity id issued. Ids are positive, so `0` is treated as `1`.
    pub id_seed: u64,
}

impl Default for EcoConfig {
    fn default() -> Self {
        Self {
            id_seed: IdFactory::DEFAULT_SEED,
        }
    }
}

// ---------------------------------------------------------------------------
// Eco
// ---------------------------------------------------------------------------

/// Entity-component data store.
#[derive(Debug)]
pub struct Eco {
    components: ComponentCollection,
    ids: IdFactory,
    entity_factory: DefaultEntityFactory,
    iterators: IteratorFactory,
}

impl Eco {
    /// Create a store with the default configuration (ids start at 1).
    pub fn new() -> Self {
        Self::with_config(EcoConfig::default())
    }

    pub fn with_config(config: EcoConfig) -> Self {
        Self::with_id_factory(IdFactory::new(config.id_seed))
    }

    /// Create a store drawing ids from `ids`.
    pub fn with_id_factory(ids: IdFactory) -> Self {
        Self::from_parts(ComponentCollection::new(), ids)
    }

    /// Assemble a store from an existing collection and id factory.
    pub fn from_parts(components: ComponentCollection, ids: IdFactory) -> Self {
        Self {
            components,
            ids,
            entity_factory: default_entity_factory(),
            iterators: IteratorFactory::new(),
        }
    }

    // -- components ---------------------------------------------------------

    /// Register component `name` and return its new store.
    ///
    /// Re-registering a name replaces the previous store and its data.
    pub fn create_component(
        &mut self,
        name: &str,
        definition: impl Into<ComponentDefinition>,
    ) -> &mut ComponentStore {
        self.components.set(name, definition)
    }

    /// The store for `name`; the null store if `name` is unknown.
    pub fn component(&self, name: &str) -> &dyn ComponentStorage {
        self.components.get(name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut ComponentStore> {
        self.components.get_mut(name)
    }

    /// Write `data` for `entity` into the store registered as `name`.
    ///
    /// Writes to unregistered names are rejected rather than silently
    /// dropped; register the component first.
    pub fn set_component(
        &mut self,
        name: &str,
        entity: EntityId,
        data: Value,
    ) -> Result<(), EcoError> {
        match self.components.get_mut(name) {
            Some(store) => {
                store.set(entity, data);
                Ok(())
            }
            None => {
                warn!(component = name, %entity, "write to unregistered component");
                Err(EcoError::UnknownComponent {
                    name: name.to_owned(),
                    registered: self.components.names().join(", "),
                })
            }
        }
    }

    pub fn components(&self) -> &ComponentCollection {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentCollection {
        &mut self.components
    }

    // -- entities -----------------------------------------------------------

    /// Issue a fresh entity.
    pub fn create_entity(&mut self) -> Entity {
        let id = self.ids.create();
        debug!(entity = %id, "created entity");
        self.entity_factory.create(id)
    }

    pub fn id_factory(&self) -> &IdFactory {
        &self.ids
    }

    // -- iteration ----------------------------------------------------------

    /// Entities in `[start, end]` holding every component in `required`.
    ///
    /// An empty `required` yields every id in the range. `end == None`
    /// stops at the last issued id; nothing is yielded before the first
    /// entity is created.
    pub fn iter<S: AsRef<str>>(
        &self,
        start: EntityId,
        end: Option<EntityId>,
        required: &[S],
    ) -> EntitySequence<'_> {
        match end.or_else(|| self.ids.last_issued()) {
            Some(end) => self.iterators.create(&self.components, start, Some(end), required),
            None => EntitySequence::Plain(EntityIterator::empty()),
        }
    }

    /// Every entity issued so far by this instance.
    pub fn entities(&self) -> EntitySequence<'_> {
        let none: &[&str] = &[];
        self.query(none)
    }

    /// Issued entities holding every component in `required`.
    pub fn query<S: AsRef<str>>(&self, required: &[S]) -> EntitySequence<'_> {
        match self.ids.issued_range() {
            Some((first, last)) => self.iter(first, Some(last), required),
            None => EntitySequence::Plain(EntityIterator::empty()),
        }
    }
}

impl Default for Eco {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(iter: impl Iterator<Item = Entity>) -> Vec<u64> {
        iter.map(|e| e.id().to_raw()).collect()
    }

    #[test]
    fn create_entity_issues_sequential_ids() {
        let mut eco = Eco::new();
        let a = eco.create_entity();
        let b = eco.create_entity();
        assert_eq!(a.id().to_raw(), 1);
        assert_eq!(b.id().to_raw(), 2);
    }

    #[test]
    fn config_sets_id_seed() {
        let mut eco = Eco::with_config(EcoConfig { id_seed: 100 });
        assert_eq!(eco.create_entity().id().to_raw(), 100);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EcoConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EcoConfig::default());
        let config: EcoConfig = serde_json::from_str(r#"{"id_seed": 9}"#).unwrap();
        assert_eq!(config.id_seed, 9);
    }

    #[test]
    fn independent_instances_have_independent_id_spaces() {
        let mut a = Eco::new();
        let mut b = Eco::with_id_factory(IdFactory::new(1));
        a.create_entity();
        a.create_entity();
        assert_eq!(b.create_entity().id().to_raw(), 1);
    }

    #[test]
    fn create_component_returns_writable_store() {
        let mut eco = Eco::new();
        let e = eco.create_entity();
        eco.create_component("health", json!({"hp": 100, "max": 100}))
            .set(e.id(), json!({"hp": 40}));
        assert_eq!(
            eco.component("health").get(e.id()),
            Some(&json!({"hp": 40, "max": 100}))
        );
    }

    #[test]
    fn set_component_rejects_unregistered_names() {
        let mut eco = Eco::new();
        eco.create_component("position", json!({"x": 0}));
        let e = eco.create_entity();
        let err = eco
            .set_component("velocity", e.id(), json!({"dx": 1}))
            .unwrap_err();
        match err {
            EcoError::UnknownComponent { name, registered } => {
                assert_eq!(name, "velocity");
                assert_eq!(registered, "position");
            }
        }
        assert!(!eco.component("velocity").has(e.id()));
    }

    #[test]
    fn set_component_writes_registered_store() {
        let mut eco = Eco::new();
        eco.create_component("tag", json!(true));
        let e = eco.create_entity();
        eco.set_component("tag", e.id(), Value::Null).unwrap();
        assert!(eco.component("tag").has(e.id()));
    }

    #[test]
    fn entities_covers_every_issued_id() {
        let mut eco = Eco::with_config(EcoConfig { id_seed: 10 });
        assert!(ids(eco.entities()).is_empty());
        for _ in 0..3 {
            eco.create_entity();
        }
        assert_eq!(ids(eco.entities()), vec![10, 11, 12]);
    }

    #[test]
    fn query_filters_issued_entities() {
        let mut eco = Eco::new();
        let all: Vec<Entity> = (0..5).map(|_| eco.create_entity()).collect();
        let tag = eco.create_component("tag", json!(true));
        tag.set(all[1].id(), Value::Null);
        tag.set(all[3].id(), Value::Null);
        assert_eq!(ids(eco.query(&["tag"])), vec![2, 4]);
    }

    #[test]
    fn open_ended_iter_stops_at_last_issued_id() {
        let mut eco = Eco::new();
        let none: &[&str] = &[];
        assert!(ids(eco.iter(EntityId::from_raw(1), None, none)).is_empty());

        for _ in 0..3 {
            eco.create_entity();
        }
        let all = eco.iter(EntityId::from_raw(1), None, none);
        assert_eq!(all.size_hint(), (3, Some(3)));
        assert_eq!(ids(all.take(10)), vec![1, 2, 3]);

        eco.create_component("never-set", json!({}));
        assert!(eco.iter(EntityId::from_raw(1), None, &["never-set"]).next().is_none());
        assert_eq!(ids(eco.iter(EntityId::from_raw(2), None, none)), vec![2, 3]);
    }

    #[test]
    fn iter_over_explicit_range() {
        let mut eco = Eco::new();
        eco.create_component("pos", json!({}));
        for _ in 0..5 {
            let e = eco.create_entity();
            if e.id().to_raw() % 2 == 1 {
                eco.set_component("pos", e.id(), Value::Null).unwrap();
            }
        }
        let range = eco.iter(EntityId::from_raw(2), Some(EntityId::from_raw(5)), &["pos"]);
        assert_eq!(ids(range), vec![3, 5]);
    }
}
