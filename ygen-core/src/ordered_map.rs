//! Insertion-ordered collection for `ordered-by user` YANG lists.
//!
//! An [`OrderedMap`] is a key → value table that remembers list order. Keys
//! are unique and deletion keeps the order of the remaining entries. The map
//! is not internally synchronized.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

/// A list element that can report and be built from its key.
pub trait KeyedEntry {
    /// Key type of the list. Multi-key lists use a generated key struct.
    type Key: Clone + Eq + Hash + Debug;

    /// Returns the element key, or `None` if any key field is unset.
    fn key(&self) -> Option<Self::Key>;

    /// Creates a zero-initialized element with its key fields populated.
    fn from_key(key: Self::Key) -> Self;
}

/// Insertion-ordered, key-addressed collection.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Clone + Eq + Hash + Debug,
    V: KeyedEntry<Key = K>,
{
    /// Creates an empty ordered map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` at the end of the list.
    ///
    /// # Errors
    /// Returns [`Error::MissingKey`] if a key field of `value` is unset and
    /// [`Error::DuplicateKey`] if its key is already present.
    pub fn append(&mut self, value: V) -> Result<()> {
        let key = value.key().ok_or(Error::MissingKey)?;
        match self.entries.entry(key) {
            Entry::Occupied(slot) => Err(Error::DuplicateKey {
                key: format!("{:?}", slot.key()),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Appends a new zero-initialized element carrying `key` and returns it.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateKey`] if `key` is already present.
    pub fn append_new(&mut self, key: K) -> Result<&mut V> {
        match self.entries.entry(key) {
            Entry::Occupied(slot) => Err(Error::DuplicateKey {
                key: format!("{:?}", slot.key()),
            }),
            Entry::Vacant(slot) => {
                let value = V::from_key(slot.key().clone());
                Ok(slot.insert(value))
            }
        }
    }

    /// Returns the element stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the element stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    /// Removes the element stored under `key`.
    ///
    /// Returns `None` when the key is not found; the map is left untouched.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        self.entries.shift_remove(key)
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the keys in list order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the values in list order.
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, v)| v).collect()
    }

    /// Iterates over `(key, value)` pairs in list order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Lookups on a possibly absent ordered map, so accessors can be chained
/// through unset containers.
pub trait OptionalOrderedMap<K, V> {
    /// Returns the element stored under `key`, or `None` if the map itself is
    /// absent.
    fn get(&self, key: &K) -> Option<&V>;

    /// Returns the number of elements, zero for an absent map.
    fn len(&self) -> usize;
}

impl<K, V> OptionalOrderedMap<K, V> for Option<&OrderedMap<K, V>>
where
    K: Clone + Eq + Hash + Debug,
    V: KeyedEntry<Key = K>,
{
    fn get(&self, key: &K) -> Option<&V> {
        self.and_then(|map| map.get(key))
    }

    fn len(&self) -> usize {
        self.map_or(0, OrderedMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Rule {
        name: Option<String>,
        action: Option<String>,
    }

    impl KeyedEntry for Rule {
        type Key = String;

        fn key(&self) -> Option<String> {
            self.name.clone()
        }

        fn from_key(key: String) -> Self {
            Self {
                name: Some(key),
                ..Self::default()
            }
        }
    }

    fn rule(name: &str) -> Rule {
        Rule {
            name: Some(name.to_string()),
            action: Some("accept".to_string()),
        }
    }

    #[test]
    fn test_append_then_get() {
        let mut map = OrderedMap::new();
        map.append(rule("r1")).unwrap();
        assert_eq!(map.get(&"r1".to_string()), Some(&rule("r1")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_delete_round_trip() {
        let mut map = OrderedMap::new();
        map.append(rule("r1")).unwrap();

        assert_eq!(map.delete(&"r1".to_string()), Some(rule("r1")));
        assert!(map.get(&"r1".to_string()).is_none());
        assert!(map.delete(&"r1".to_string()).is_none());
        assert_eq!(map.keys().len(), map.len());
    }

    #[test]
    fn test_append_duplicate_rejected() {
        let mut map = OrderedMap::new();
        map.append(rule("r1")).unwrap();
        let err = map.append(rule("r1")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
        assert_eq!(map.len(), 1);
        assert_eq!(map.keys().len(), map.len());
    }

    #[test]
    fn test_append_missing_key_rejected() {
        let mut map: OrderedMap<String, Rule> = OrderedMap::new();
        assert_eq!(map.append(Rule::default()), Err(Error::MissingKey));
        assert!(map.is_empty());
    }

    #[test]
    fn test_append_new() {
        let mut map: OrderedMap<String, Rule> = OrderedMap::new();
        let created = map.append_new("r9".to_string()).unwrap();
        assert_eq!(created.name.as_deref(), Some("r9"));
        assert!(created.action.is_none());
        created.action = Some("drop".to_string());

        assert_eq!(
            map.get(&"r9".to_string()).unwrap().action.as_deref(),
            Some("drop")
        );
        assert!(matches!(
            map.append_new("r9".to_string()),
            Err(Error::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_order_is_insertion_order() {
        let mut map = OrderedMap::new();
        for name in ["zeta", "alpha", "mid"] {
            map.append(rule(name)).unwrap();
        }
        assert_eq!(map.keys(), vec!["zeta", "alpha", "mid"]);

        map.delete(&"alpha".to_string());
        map.append(rule("alpha")).unwrap();
        assert_eq!(map.keys(), vec!["zeta", "mid", "alpha"]);

        let names: Vec<_> = map
            .values()
            .iter()
            .map(|r| r.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["zeta", "mid", "alpha"]);
        assert_eq!(map.keys().len(), map.len());
    }

    #[test]
    fn test_delete_keeps_order_of_remaining_entries() {
        let mut map = OrderedMap::new();
        for name in ["a", "b", "c", "d"] {
            map.append(rule(name)).unwrap();
        }
        assert!(map.delete(&"b".to_string()).is_some());
        assert_eq!(map.keys(), vec!["a", "c", "d"]);
        assert!(map.get(&"c".to_string()).is_some());
        assert!(!map.contains_key(&"b".to_string()));
    }

    #[test]
    fn test_equality_follows_list_order() {
        let mut forward = OrderedMap::new();
        let mut backward = OrderedMap::new();
        for name in ["a", "b"] {
            forward.append(rule(name)).unwrap();
        }
        for name in ["b", "a"] {
            backward.append(rule(name)).unwrap();
        }
        assert_ne!(forward, backward);
        backward.delete(&"b".to_string());
        backward.append(rule("b")).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_keys_is_a_copy() {
        let mut map = OrderedMap::new();
        map.append(rule("a")).unwrap();
        let mut keys = map.keys();
        keys.push("b".to_string());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_absent_map_lookup() {
        let absent: Option<&OrderedMap<String, Rule>> = None;
        assert!(absent.get(&"r1".to_string()).is_none());
        assert_eq!(OptionalOrderedMap::len(&absent), 0);

        let mut map = OrderedMap::new();
        map.append(rule("r1")).unwrap();
        let present = Some(&map);
        assert!(present.get(&"r1".to_string()).is_some());
    }

    #[test]
    fn test_clear() {
        let mut map = OrderedMap::new();
        map.append(rule("a")).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
    }
}
