//! Ordered members of a JSON object.
//!
//! This module provides [`Map`], the member list of an object value. Members
//! are kept in the order they were appended, and a key may be appended more
//! than once: the builder never merges or reorders members.
//!
//! Whether repeated keys survive into the output is a serialization-time
//! decision ([`DuplicateKeys`]). Resolution goes through an [`IndexMap`], so a
//! surviving member always sits where its key was first seen.
//!
//! ## Examples
//!
//! ```rust
//! use json_data::{Map, Value};
//!
//! let mut map = Map::new();
//! map.append("name".to_string(), Value::from("Singing Sword"));
//! map.append("value".to_string(), Value::from(1200));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Singing Sword"));
//! ```

use crate::{DuplicateKeys, Error, Result, Value};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

/// An ordered list of `(key, value)` members.
///
/// # Examples
///
/// ```rust
/// use json_data::{Map, Value};
///
/// let mut map = Map::new();
/// map.append("first".to_string(), Value::from(1));
/// map.append("second".to_string(), Value::from(2));
///
/// // Iteration follows append order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(Vec<(String, Value)>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(Vec::with_capacity(capacity))
    }

    /// Appends a member at the end, regardless of whether `key` is already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.append("hp".to_string(), Value::from(10));
    /// map.append("hp".to_string(), Value::from(12));
    /// assert_eq!(map.len(), 2);
    /// assert!(map.has_duplicate_keys());
    /// ```
    pub fn append(&mut self, key: String, value: Value) {
        self.0.push((key, value));
    }

    /// Returns the value most recently appended under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns every value appended under `key`, in append order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Returns the number of members, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in append order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over the values, in append order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over the members, in append order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn has_duplicate_keys(&self) -> bool {
        let mut seen = IndexSet::with_capacity(self.0.len());
        self.0.iter().any(|(k, _)| !seen.insert(k.as_str()))
    }

    /// Members that survive `policy`, borrowed from this map.
    ///
    /// On [`DuplicateKeys::Reject`] the first repeated key is returned as the error.
    pub(crate) fn resolved(
        &self,
        policy: DuplicateKeys,
    ) -> std::result::Result<Vec<(&str, &Value)>, &str> {
        if policy == DuplicateKeys::Keep {
            return Ok(self.0.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }

        let mut members: IndexMap<&str, &Value> = IndexMap::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match members.entry(key.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => match policy {
                    DuplicateKeys::FirstWins | DuplicateKeys::Keep => {}
                    DuplicateKeys::LastWins => {
                        slot.insert(value);
                    }
                    DuplicateKeys::Reject => return Err(key.as_str()),
                },
            }
        }
        Ok(members.into_iter().collect())
    }

    /// Returns a copy with repeated keys collapsed according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] under [`DuplicateKeys::Reject`] when a key repeats.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use json_data::{DuplicateKeys, Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.append("a".to_string(), Value::from(1));
    /// map.append("b".to_string(), Value::from(2));
    /// map.append("a".to_string(), Value::from(3));
    ///
    /// let last = map.deduplicated(DuplicateKeys::LastWins).unwrap();
    /// let members: Vec<_> = last.iter().map(|(k, v)| (k.as_str(), v.as_i64().unwrap())).collect();
    /// assert_eq!(members, vec![("a", 3), ("b", 2)]);
    /// ```
    pub fn deduplicated(&self, policy: DuplicateKeys) -> Result<Map> {
        let members = self
            .resolved(policy)
            .map_err(|key| Error::duplicate_key("", key))?;
        Ok(members
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect())
    }
}

impl From<IndexMap<String, Value>> for Map {
    fn from(map: IndexMap<String, Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(Vec::from_iter(iter))
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Map {
        let mut map = Map::new();
        map.append("a".to_string(), Value::from(1));
        map.append("b".to_string(), Value::from(2));
        map.append("a".to_string(), Value::from(3));
        map
    }

    fn pairs(members: Vec<(&str, &Value)>) -> Vec<(String, i64)> {
        members
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.as_i64().unwrap()))
            .collect()
    }

    #[test]
    fn test_lookup_prefers_last_append() {
        let map = sample();
        assert_eq!(map.get("a"), Some(&Value::from(3)));
        assert_eq!(map.get_all("a").count(), 2);
        assert!(map.contains_key("b"));
        assert!(!map.contains_key("c"));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn test_resolve_keep() {
        let map = sample();
        let kept = map.resolved(DuplicateKeys::Keep).unwrap();
        assert_eq!(
            pairs(kept),
            vec![("a".into(), 1), ("b".into(), 2), ("a".into(), 3)]
        );
    }

    #[test]
    fn test_resolve_first_and_last_wins_keep_first_position() {
        let map = sample();
        assert_eq!(
            pairs(map.resolved(DuplicateKeys::FirstWins).unwrap()),
            vec![("a".into(), 1), ("b".into(), 2)]
        );
        assert_eq!(
            pairs(map.resolved(DuplicateKeys::LastWins).unwrap()),
            vec![("a".into(), 3), ("b".into(), 2)]
        );
    }

    #[test]
    fn test_resolve_reject() {
        let map = sample();
        assert_eq!(map.resolved(DuplicateKeys::Reject).unwrap_err(), "a");
        assert!(matches!(
            map.deduplicated(DuplicateKeys::Reject),
            Err(Error::DuplicateKey { key, .. }) if key == "a"
        ));
    }

    #[test]
    fn test_unique_keys_are_untouched() {
        let mut map = Map::new();
        map.append("x".to_string(), Value::Null);
        map.append("y".to_string(), Value::Null);
        assert!(!map.has_duplicate_keys());
        assert_eq!(map.deduplicated(DuplicateKeys::Reject).unwrap(), map);
    }
}
