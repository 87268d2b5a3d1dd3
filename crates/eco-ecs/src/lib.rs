//! Eco ECS -- a minimal entity-component data store.
//!
//! Entities are bare ids. Components are named categories of JSON-like data,
//! each kept in its own sparse store keyed by entity id. Registering a
//! component resolves its default ([`ComponentDefinition`](definition::ComponentDefinition))
//! into a factory that every write runs through, so object defaults are
//! shallow-merged with per-entity overrides. Iteration walks an id range and
//! can be filtered to entities holding a set of components.
//!
//! There are no systems, no scheduling and no persistence here; this is the
//! storage layer underneath them.
//!
//! # Quick Start
//!
//! ```
//! use eco_ecs::prelude::*;
//! use serde_json::json;
//!
//! let mut eco = Eco::new();
//! let player = eco.create_entity();
//! let rock = eco.create_entity();
//!
//! eco.create_component("position", json!({"x": 0, "y": 0}))
//!     .set(player.id(), json!({"x": 3}));
//! eco.create_component("player", json!(true))
//!     .set(player.id(), json!(null));
//!
//! assert_eq!(
//!     eco.component("position").get(player.id()),
//!     Some(&json!({"x": 3, "y": 0}))
//! );
//! assert!(!eco.component("position").has(rock.id()));
//!
//! let players: Vec<Entity> = eco.query(&["position", "player"]).collect();
//! assert_eq!(players, vec![player]);
//! ```

#![deny(unsafe_code)]

pub mod collection;
pub mod component;
pub mod definition;
pub mod eco;
pub mod entity;
pub mod iter;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by store operations.
///
/// Reads never fail; only writes addressed by component name can.
#[derive(Debug, thiserror::Error)]
pub enum EcoError {
    /// A write named a component that has not been registered.
    #[error("component '{name}' not registered. Registered components: [{registered}]")]
    UnknownComponent { name: String, registered: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::collection::ComponentCollection;
    pub use crate::component::{ComponentStorage, ComponentStore, NullComponentStore};
    pub use crate::definition::{merge_objects, ComponentDefinition, ComponentFactory};
    pub use crate::eco::{Eco, EcoConfig};
    pub use crate::entity::{Entity, EntityFactory, EntityId, IdFactory};
    pub use crate::iter::{EntityIterator, EntitySequence, FilteredIterator, IteratorFactory};
    pub use crate::EcoError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
