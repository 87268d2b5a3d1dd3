//! Component definitions and their resolution into instance factories.
//!
//! A [`ComponentDefinition`] describes how instance data is produced from the
//! override data handed to [`ComponentStore::set`](crate::component::ComponentStore::set).
//! It is resolved exactly once, at registration, into a [`ComponentFactory`]
//! so that no shape inspection happens on the write path.

use serde_json::{Map, Value};
use std::fmt;

/// A resolved `override -> instance` function.
pub type ComponentFactory = Box<dyn Fn(Value) -> Value>;

// ---------------------------------------------------------------------------
// ComponentDefinition
// ---------------------------------------------------------------------------

/// The default supplied when a component is registered.
#[derive(Default)]
pub enum ComponentDefinition {
    /// A user function with full control over the instance data.
    Factory(ComponentFactory),
    /// Keyed defaults, shallow-merged with object overrides.
    Template(Map<String, Value>),
    /// A value returned for every write, whatever the override.
    Constant(Value),
    /// No default; the override is stored as given.
    #[default]
    Identity,
}

impl ComponentDefinition {
    /// Wrap a closure as a [`ComponentDefinition::Factory`].
    pub fn factory<F>(f: F) -> Self
    where
        F: Fn(Value) -> Value + 'static,
    {
        Self::Factory(Box::new(f))
    }

    /// Resolve this definition into its instance factory.
    pub fn resolve(self) -> ComponentFactory {
        match self {
            Self::Factory(f) => f,
            Self::Template(defaults) => {
                Box::new(move |data: Value| merge_objects(&defaults, &data))
            }
            Self::Constant(value) => Box::new(move |_: Value| value.clone()),
            Self::Identity => Box::new(|data: Value| data),
        }
    }

    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Factory(_) => "factory",
            Self::Template(_) => "template",
            Self::Constant(_) => "constant",
            Self::Identity => "identity",
        }
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Template(map) => f.debug_tuple("Template").field(map).finish(),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Identity => f.write_str("Identity"),
        }
    }
}

/// Objects become templates; every other value, `null` and arrays
/// included, becomes a constant.
impl From<Value> for ComponentDefinition {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Template(map),
            other => Self::Constant(other),
        }
    }
}

impl From<Map<String, Value>> for ComponentDefinition {
    fn from(map: Map<String, Value>) -> Self {
        Self::Template(map)
    }
}

impl From<Option<Value>> for ComponentDefinition {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Identity, Self::from)
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Shallow-merge `data` over `defaults` into a fresh object.
///
/// Every default key is copied in insertion order; if `data` is an object,
/// its keys then overwrite in place or are appended. Non-object `data`
/// (`null`, arrays, scalars) leaves the defaults untouched. Nested values
/// are replaced wholesale. Neither input is modified.
pub fn merge_objects(defaults: &Map<String, Value>, data: &Value) -> Value {
    let mut instance = defaults.clone();
    if let Value::Object(overrides) = data {
        for (key, value) in overrides {
            instance.insert(key.clone(), value.clone());
        }
    }
    Value::Object(instance)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
