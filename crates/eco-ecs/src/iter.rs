//! Lazy entity iteration over id ranges.
//!
//! [`EntityIterator`] walks an inclusive id range and builds one fresh
//! [`Entity`] per id as it is consumed. [`FilteredIterator`] wraps any entity
//! sequence and drops entities missing one of a list of required components.
//! [`IteratorFactory`] picks between the two.
//!
//! Iterators hold a shared borrow of the [`ComponentCollection`], so store
//! presence is read at the moment each entity is pulled. Nothing is
//! materialized up front; memory stays proportional to what is consumed.

use crate::collection::ComponentCollection;
use crate::entity::{
    default_entity_factory, DefaultEntityFactory, Entity, EntityFactory, EntityId,
};

// ---------------------------------------------------------------------------
// EntityIterator
// ---------------------------------------------------------------------------

/// Yields an [`Entity`] for every id in `[start, end]`.
///
/// `end == None` leaves the range unbounded above (up to `u64::MAX`).
/// The iterator is `Clone`, and [`restart`](Self::restart) rewinds it to
/// `start`.
#[derive(Debug, Clone)]
pub struct EntityIterator<F = DefaultEntityFactory> {
    start: u64,
    end: Option<u64>,
    /// Next id to yield; `None` once the range is exhausted.
    cursor: Option<u64>,
    factory: F,
}

impl EntityIterator {
    /// Iterate `[start, end]` with the default entity factory.
    pub fn new(start: EntityId, end: Option<EntityId>) -> Self {
        Self::with_factory(start, end, default_entity_factory())
    }

    /// An iterator over no ids.
    pub fn empty() -> Self {
        Self::new(EntityId::from_raw(1), Some(EntityId::from_raw(0)))
    }
}

impl<F: EntityFactory> EntityIterator<F> {
    /// Iterate `[start, end]`, building entities with `factory`.
    pub fn with_factory(start: EntityId, end: Option<EntityId>, factory: F) -> Self {
        let start = start.to_raw();
        let end = end.map(EntityId::to_raw);
        Self {
            start,
            end,
            cursor: Self::first_cursor(start, end),
            factory,
        }
    }

    /// Rewind to the start of the range.
    pub fn restart(&mut self) {
        self.cursor = Self::first_cursor(self.start, self.end);
    }

    fn first_cursor(start: u64, end: Option<u64>) -> Option<u64> {
        match end {
            Some(end) if end < start => None,
            _ => Some(start),
        }
    }
}

impl<F: EntityFactory> Iterator for EntityIterator<F> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        let id = self.cursor?;
        let limit = self.end.unwrap_or(u64::MAX);
        self.cursor = if id < limit { Some(id + 1) } else { None };
        Some(self.factory.create(EntityId::from_raw(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.cursor, self.end) {
            (None, _) => (0, Some(0)),
            (Some(id), Some(end)) => {
                let remaining = (end - id)
                    .checked_add(1)
                    .and_then(|n| usize::try_from(n).ok());
                (remaining.unwrap_or(usize::MAX), remaining)
            }
            (Some(_), None) => (usize::MAX, None),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredIterator
// ---------------------------------------------------------------------------

/// Passes through only entities that hold every required component.
///
/// Checks stop at the first missing component for an entity. Inner order is
/// preserved. Unknown component names resolve to the null store, so an
/// unknown required name filters out every entity.
#[derive(Debug, Clone)]
pub struct FilteredIterator<'c, I> {
    inner: I,
    components: &'c ComponentCollection,
    required: Vec<String>,
}

impl<'c, I> FilteredIterator<'c, I>
where
    I: Iterator<Item = Entity>,
{
    pub fn new<S: AsRef<str>>(
        inner: I,
        components: &'c ComponentCollection,
        required: &[S],
    ) -> Self {
        Self {
            inner,
            components,
            required: required.iter().map(|s| s.as_ref().to_owned()).collect(),
        }
    }

    /// The component names an entity must hold to be yielded.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    fn matches(&self, entity: &Entity) -> bool {
        self.required
            .iter()
            .all(|name| self.components.get(name).has(entity.id()))
    }
}

impl<I> Iterator for FilteredIterator<'_, I>
where
    I: Iterator<Item = Entity>,
{
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        loop {
            let entity = self.inner.next()?;
            if self.matches(&entity) {
                return Some(entity);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

// ---------------------------------------------------------------------------
// IteratorFactory
// ---------------------------------------------------------------------------

/// A plain or filtered entity sequence, as built by [`IteratorFactory`].
#[derive(Debug, Clone)]
pub enum EntitySequence<'c, F = DefaultEntityFactory> {
    Plain(EntityIterator<F>),
    Filtered(FilteredIterator<'c, EntityIterator<F>>),
}

impl<F: EntityFactory> Iterator for EntitySequence<'_, F> {
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        match self {
            Self::Plain(iter) => iter.next(),
            Self::Filtered(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Plain(iter) => iter.size_hint(),
            Self::Filtered(iter) => iter.size_hint(),
        }
    }
}

/// Builds entity sequences over a range, filtered when component names are
/// given.
#[derive(Debug, Clone, Copy)]
pub struct IteratorFactory<F = DefaultEntityFactory> {
    entity_factory: F,
}

impl IteratorFactory {
    pub fn new() -> Self {
        Self::with_entity_factory(default_entity_factory())
    }
}

impl Default for IteratorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: EntityFactory + Clone> IteratorFactory<F> {
    pub fn with_entity_factory(entity_factory: F) -> Self {
        Self { entity_factory }
    }

    /// A plain iterator when `required` is empty, otherwise a filtered one.
    pub fn create<'c, S: AsRef<str>>(
        &self,
        components: &'c ComponentCollection,
        start: EntityId,
        end: Option<EntityId>,
        required: &[S],
    ) -> EntitySequence<'c, F> {
        let plain = EntityIterator::with_factory(start, end, self.entity_factory.clone());
        if required.is_empty() {
            EntitySequence::Plain(plain)
        } else {
            EntitySequence::Filtered(FilteredIterator::new(plain, components, required))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
