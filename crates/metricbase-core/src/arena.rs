//! Generational arena with an explicit iteration order.
//!
//! Keys carry the generation of the slot they were issued for. Removing an
//! entry bumps the slot generation, so an old key resolves to `None` instead of
//! aliasing whatever later reuses the slot.

use std::marker::PhantomData;

/// Slot index plus generation. `T` only brands the key.
pub struct ArenaKey<T> {
    index: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaKey<T> {
    fn new(index: u32, generation: u32) -> Self {
        Self {
            index,
            generation,
            _marker: PhantomData,
        }
    }
}

// Manual impls so `T` needs no bounds.
impl<T> Clone for ArenaKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaKey<T> {}

impl<T> PartialEq for ArenaKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<T> Eq for ArenaKey<T> {}

impl<T> std::hash::Hash for ArenaKey<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<T> std::fmt::Debug for ArenaKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

fn resolve<T>(slots: &[Slot<T>], key: ArenaKey<T>) -> Option<&T> {
    slots
        .get(key.index as usize)
        .filter(|slot| slot.generation == key.generation)
        .and_then(|slot| slot.value.as_ref())
}

#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    order: Vec<ArenaKey<T>>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }
}

impl<T> Arena<T> {
    /// Append at the end of the iteration order.
    pub(crate) fn insert(&mut self, value: T) -> ArenaKey<T> {
        let key = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                ArenaKey::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                ArenaKey::new(index, 0)
            }
        };
        self.order.push(key);
        key
    }

    pub(crate) fn get(&self, key: ArenaKey<T>) -> Option<&T> {
        resolve(&self.slots, key)
    }

    pub(crate) fn get_mut(&mut self, key: ArenaKey<T>) -> Option<&mut T> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Remove every entry matching `pred`. Returns how many were removed.
    pub(crate) fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let slots = &mut self.slots;
        let free = &mut self.free;
        self.order.retain(|key| {
            let Some(slot) = slots.get_mut(key.index as usize) else {
                return false;
            };
            let hit = slot.value.as_ref().map_or(true, &mut pred);
            if hit {
                slot.value = None;
                slot.generation = slot.generation.wrapping_add(1);
                free.push(key.index);
                removed += 1;
            }
            !hit
        });
        removed
    }

    /// First key in iteration order whose entry matches `pred`.
    pub(crate) fn find_key(&self, mut pred: impl FnMut(&T) -> bool) -> Option<ArenaKey<T>> {
        self.order
            .iter()
            .copied()
            .find(|key| self.get(*key).is_some_and(&mut pred))
    }

    /// Entries in iteration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (ArenaKey<T>, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.get(*key).map(|value| (*key, value)))
    }

    /// Reorder by a key computed once per entry. Stable; an entry that cannot
    /// be resolved sorts before every resolved one.
    pub(crate) fn sort_by_cached_key<K: Ord>(&mut self, mut key_fn: impl FnMut(&T) -> K) {
        let slots = &self.slots;
        let mut keyed: Vec<(Option<K>, ArenaKey<T>)> = self
            .order
            .iter()
            .map(|key| (resolve(slots, *key).map(&mut key_fn), *key))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        self.order = keyed.into_iter().map(|(_, key)| key).collect();
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_key_does_not_alias_reused_slot() {
        let mut arena = Arena::default();
        let a = arena.insert("a");
        assert_eq!(arena.remove_where(|v| *v == "a"), 1);
        let b = arena.insert("b");

        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_ne!(a, b);
    }

    #[test]
    fn order_is_insertion_until_sorted() {
        let mut arena = Arena::default();
        for v in [3, 1, 2] {
            arena.insert(v);
        }
        let values: Vec<i32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![3, 1, 2]);

        arena.sort_by_cached_key(|v| *v);
        let values: Vec<i32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn clear_invalidates_keys() {
        let mut arena = Arena::default();
        let k = arena.insert(1);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(k), None);
        let k2 = arena.insert(2);
        assert_eq!(arena.get(k2), Some(&2));
    }
}
