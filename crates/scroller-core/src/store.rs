//! Stable-slot entity storage paired with a [`Finder`].
//!
//! Entities live in generational slots, so a [`Handle`] stays valid while
//! other entities come and go, and a handle to a removed entity never
//! resolves to whatever reuses its slot. Every mutation that can move an
//! entity goes through [`SpatialStore::modify`], which re-indexes the entity
//! before returning. The collection and its index cannot drift apart.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::finder::Finder;
use crate::geometry::{HasBounds, Rect};

/// Typed index into a [`SpatialStore<T>`].
pub struct Handle<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

// Manual impls: derives would needlessly require `T: Trait`.
impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> PartialOrd for Handle<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Handle<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.index, self.generation).cmp(&(other.index, other.generation))
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}v{})", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Owning collection of `T` with a spatial index over their rectangles.
#[derive(Debug, Clone)]
pub struct SpatialStore<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    finder: Finder<Handle<T>>,
}

impl<T: HasBounds> Default for SpatialStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasBounds> SpatialStore<T> {
    pub fn new() -> Self {
        Self::with_finder(Finder::new())
    }

    pub fn with_cell_size(cell_size: i32) -> Self {
        Self::with_finder(Finder::with_cell_size(cell_size))
    }

    fn with_finder(finder: Finder<Handle<T>>) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            finder,
        }
    }

    pub fn len(&self) -> usize {
        self.finder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finder.is_empty()
    }

    /// Take ownership of `value` and index it at its current rectangle.
    pub fn insert(&mut self, value: T) -> Handle<T> {
        let rect = value.rect();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                Handle::new(index, slot.generation)
            },
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                Handle::new(index, 0)
            },
        };
        self.finder.add(handle, rect);
        handle
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.get(handle).is_some()
    }

    /// Mutate an entity and re-index it at its new rectangle.
    ///
    /// Returns `None` without calling `f` if the handle is stale.
    pub fn modify<R>(&mut self, handle: Handle<T>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?;
        let value = slot.value.as_mut()?;
        let out = f(value);
        let rect = value.rect();
        self.finder.update(handle, rect);
        Some(out)
    }

    /// Remove an entity from both the collection and the index.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let slot = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.finder.remove(handle);
        Some(value)
    }

    /// Handles of every entity intersecting `rect`, in handle order.
    pub fn query(&self, rect: &Rect) -> BTreeSet<Handle<T>> {
        self.finder.query(rect)
    }

    /// Rectangle the index currently holds for `handle`.
    pub fn indexed_rect(&self, handle: Handle<T>) -> Option<Rect> {
        self.finder.rect_of(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|v| (Handle::new(i as u32, slot.generation), v))
        })
    }
}

impl<T: HasBounds> FromIterator<T> for SpatialStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = Self::new();
        for value in iter {
            store.insert(value);
        }
        store
    }
}
