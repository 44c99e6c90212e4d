//! Hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! The aliases default to [`FixedHashState`], so iteration order only
//! depends on the inserted keys and is stable between runs.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_state_map() {
        let mut map: HashMap<&str, u32> = HashMap::with_hasher(FixedHashState);
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);

        let mut set: HashSet<&str> = HashSet::default();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
    }
}
