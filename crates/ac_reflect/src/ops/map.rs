use alloc::boxed::Box;

use crate::Reflect;

/// A key/value map.
///
/// Entries are inserted as whole boxed values: keys are immutable once
/// inside the map, so callers decode into [`new_key`](Map::new_key) and
/// [`new_value`](Map::new_value) first.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ac_reflect::{Reflect, ops::Map};
///
/// let mut map: BTreeMap<String, u8> = BTreeMap::new();
/// let ops = map.reflect_mut().as_map().unwrap();
///
/// let mut key = ops.new_key();
/// key.set("a".to_string().into_boxed_reflect()).unwrap();
/// ops.insert_boxed(key, 1_u8.into_boxed_reflect()).unwrap();
///
/// assert_eq!(map["a"], 1);
/// ```
pub trait Map: Reflect {
    fn len(&self) -> usize;

    /// Iterates the entries, in the iteration order of the underlying map.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    fn clear(&mut self);

    /// Creates a default key of the map's key type.
    fn new_key(&self) -> Box<dyn Reflect>;

    /// Creates a default value of the map's value type.
    fn new_value(&self) -> Box<dyn Reflect>;

    /// Inserts an entry, replacing the value of an equal key.
    ///
    /// Returns the offending box if the key or value has the wrong type.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
