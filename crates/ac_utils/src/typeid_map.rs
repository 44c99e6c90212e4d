use core::any::TypeId;
use core::fmt::Debug;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`].
///
/// Backs the type info cells of generic types, the type traits of a
/// registered type and the registry itself. `TypeId` is already a hash,
/// so the map skips hashing it again.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use ac_utils::TypeIdMap;
///
/// let mut names = TypeIdMap::new();
/// assert!(names.try_insert(TypeId::of::<u8>(), || "byte"));
/// assert!(!names.try_insert(TypeId::of::<u8>(), || "octet"));
///
/// assert_eq!(names.get(&TypeId::of::<u8>()), Some(&"byte"));
/// assert!(!names.contains(&TypeId::of::<u16>()));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Stores `f()` under `type_id` unless an entry exists.
    ///
    /// Returns whether `f` ran.
    #[inline]
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        let Entry::Vacant(slot) = self.0.entry(type_id) else {
            return false;
        };
        slot.insert(f());
        true
    }

    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    /// Replaces the entry of `type_id`, returning the previous value.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }

    /// Entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TypeId, &V)> {
        self.0.iter().map(|(type_id, value)| (*type_id, value))
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Debug> Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries() {
        let mut map = TypeIdMap::new();
        assert!(map.is_empty());

        *map.get_or_insert(TypeId::of::<i64>(), || 5) += 1;
        *map.get_or_insert(TypeId::of::<i64>(), || 0) += 1;
        assert_eq!(map.get(&TypeId::of::<i64>()), Some(&7));

        assert_eq!(map.insert(TypeId::of::<i64>(), 1), Some(7));
        assert_eq!(map.insert(TypeId::of::<i32>(), 2), None);
        assert_eq!(map.len(), 2);

        let mut values: alloc::vec::Vec<_> = map.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, [1, 2]);
        assert!(map.iter().any(|(id, value)| id == TypeId::of::<i32>() && *value == 2));
    }
}
