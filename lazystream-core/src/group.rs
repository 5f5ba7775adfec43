//! # Grouping State
//!
//! Per-key state used by the grouping and reduction operators.
//!
//! ## Tables
//!
//! - [`GroupTable`] — List of values per key (`group_by_key`, `group_by`)
//! - [`FoldTable`] — Single accumulated value per key (`reduce_by_key`, `fold_by_key`)
//!
//! Both tables remember the order in which keys were first seen and yield their
//! entries in that order. Values within a group keep their insertion order.

use crate::types::{OrderedMap, StreamKey};

/// Insertion-ordered list state: `key -> [values]`.
#[derive(Debug, Clone)]
pub struct GroupTable<K, V> {
    groups: OrderedMap<K, Vec<V>>,
}

impl<K, V> GroupTable<K, V>
where
    K: StreamKey,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            groups: OrderedMap::default(),
        }
    }

    /// Append `value` to the group of `key`, creating the group on first sight.
    pub fn add(&mut self, key: K, value: V) {
        self.groups.entry(key).or_default().push(value);
    }

    /// Values collected for `key` so far.
    pub fn get(&self, key: &K) -> Option<&[V]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of values across all groups.
    pub fn total_values(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Consume the table, returning the groups in first-seen key order.
    pub fn into_groups(self) -> OrderedMap<K, Vec<V>> {
        self.groups
    }
}

impl<K: StreamKey, V> Default for GroupTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StreamKey, V> Extend<(K, V)> for GroupTable<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: StreamKey, V> FromIterator<(K, V)> for GroupTable<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> IntoIterator for GroupTable<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = indexmap::map::IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Insertion-ordered value state: `key -> accumulator`.
///
/// A slot is `None` only while its accumulator is being replaced.
#[derive(Debug, Clone)]
pub struct FoldTable<K, A> {
    slots: OrderedMap<K, Option<A>>,
}

impl<K, A> FoldTable<K, A>
where
    K: StreamKey,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: OrderedMap::default(),
        }
    }

    /// Combine `value` into the accumulator of `key`.
    ///
    /// The first value seen for a key becomes its accumulator as-is; later values
    /// are merged with `reduce(accumulator, value)`.
    pub fn reduce_with<F>(&mut self, key: K, value: A, reduce: F)
    where
        F: FnOnce(A, A) -> A,
    {
        let slot = self.slots.entry(key).or_insert(None);
        let next = match slot.take() {
            Some(acc) => reduce(acc, value),
            None => value,
        };
        *slot = Some(next);
    }

    /// Fold `value` into the accumulator of `key`, starting from `initial()` when
    /// the key has not been seen yet.
    pub fn fold_with<V, I, F>(&mut self, key: K, value: V, initial: I, fold: F)
    where
        I: FnOnce() -> A,
        F: FnOnce(A, V) -> A,
    {
        let slot = self.slots.entry(key).or_insert(None);
        let acc = slot.take().unwrap_or_else(initial);
        *slot = Some(fold(acc, value));
    }

    /// Current accumulator of `key`.
    pub fn get(&self, key: &K) -> Option<&A> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consume the table, returning accumulators in first-seen key order.
    pub fn into_map(self) -> OrderedMap<K, A> {
        self.slots
            .into_iter()
            .filter_map(|(key, acc)| acc.map(|acc| (key, acc)))
            .collect()
    }
}

impl<K: StreamKey, A> Default for FoldTable<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_table_first_seen_order() {
        let mut table = GroupTable::new();
        table.add(2, "foo");
        table.add(3, "baz");
        table.add(2, "bar");

        let groups: Vec<_> = table.into_iter().collect();
        assert_eq!(groups, vec![(2, vec!["foo", "bar"]), (3, vec!["baz"])]);
    }

    #[test]
    fn test_group_table_counts() {
        let table: GroupTable<char, i32> =
            vec![('a', 1), ('b', 2), ('a', 3), ('c', 4)].into_iter().collect();

        assert_eq!(table.len(), 3);
        assert_eq!(table.total_values(), 4);
        assert_eq!(table.get(&'a'), Some(&[1, 3][..]));
        assert_eq!(table.get(&'z'), None);
    }

    #[test]
    fn test_group_table_empty() {
        let table: GroupTable<String, i32> = GroupTable::default();
        assert!(table.is_empty());
        assert_eq!(table.total_values(), 0);
        assert!(table.into_groups().is_empty());
    }

    #[test]
    fn test_fold_table_reduce() {
        let mut table = FoldTable::new();
        for (key, value) in [("a", 1), ("b", 2), ("a", 3)] {
            table.reduce_with(key, value, |acc, v| acc + v);
        }

        assert_eq!(table.get(&"a"), Some(&4));
        let entries: Vec<_> = table.into_map().into_iter().collect();
        assert_eq!(entries, vec![("a", 4), ("b", 2)]);
    }

    #[test]
    fn test_fold_table_initial_per_key() {
        let mut table = FoldTable::new();
        for (key, value) in [("a", 1), ("b", 2), ("a", 3)] {
            table.fold_with(key, value, || "0.".to_string(), |acc, v| acc + &v.to_string());
        }

        let entries: Vec<_> = table.into_map().into_iter().collect();
        assert_eq!(
            entries,
            vec![("a", "0.13".to_string()), ("b", "0.2".to_string())]
        );
    }

    #[test]
    fn test_fold_table_reduce_not_called_for_first_value() {
        let mut calls = 0;
        let mut table = FoldTable::new();
        table.reduce_with(1, 10, |a, b| {
            calls += 1;
            a + b
        });
        assert_eq!(calls, 0);
        assert_eq!(table.len(), 1);
    }
}
