//! Operators on keyed streams, i.e. streams of `(key, value)` pairs.
//!
//! A stream becomes keyed through [`Stream::key_by`] (or by constructing it from
//! pairs directly). The operators below only exist for such streams, so calling
//! [`group_by_key`](Stream::group_by_key) or [`to_dict`](Stream::to_dict) on an
//! un-keyed stream does not compile.
//!
//! ## Example
//!
//! ```
//! use lazystream_api::Stream;
//!
//! let totals = Stream::of(vec![("a", 1), ("b", 2), ("a", 3)])
//!     .reduce_by_key(|x, y| x + y)
//!     .to_dict();
//!
//! assert_eq!(totals.into_iter().collect::<Vec<_>>(), vec![("a", 4), ("b", 2)]);
//! ```

use lazystream_core::group::{FoldTable, GroupTable};
use lazystream_core::types::{Keyed, OrderedMap, StreamKey};

use crate::deferred::Deferred;
use crate::stream::Stream;

impl<K, V, I> Stream<I>
where
    I: Iterator<Item = Keyed<K, V>>,
{
    /// The key of each pair.
    pub fn keys(self) -> Stream<impl Iterator<Item = K>> {
        self.map(|(key, _)| key)
    }

    /// The value of each pair.
    pub fn values(self) -> Stream<impl Iterator<Item = V>> {
        self.map(|(_, value)| value)
    }

    /// Transform each value, keeping its key.
    pub fn map_values<W, F>(self, mut mapper: F) -> Stream<impl Iterator<Item = Keyed<K, W>>>
    where
        F: FnMut(V) -> W,
    {
        self.map(move |(key, value)| (key, mapper(value)))
    }

    /// Replace each value by the values of the iterable `mapper` returns, each
    /// paired with the original key.
    pub fn flat_map_values<W, F>(self, mut mapper: F) -> Stream<impl Iterator<Item = Keyed<K, W::Item>>>
    where
        K: Clone,
        W: IntoIterator,
        F: FnMut(V) -> W,
    {
        self.flat_map(move |(key, value)| {
            mapper(value)
                .into_iter()
                .map(move |item| (key.clone(), item))
        })
    }

    /// Collect `projection(value)` for every pair into one group per key.
    ///
    /// Groups come out in the order their key was first seen; values inside a
    /// group keep their source order. The projection runs in source order.
    pub fn group_by_key<W, P>(self, mut projection: P) -> Stream<impl Iterator<Item = Keyed<K, Vec<W>>>>
    where
        K: StreamKey,
        P: FnMut(V) -> W,
    {
        let pairs = self.iterator();
        Stream::of(Deferred::new(pairs, move |pairs: I| {
            let mut table = GroupTable::new();
            for (key, value) in pairs {
                table.add(key, projection(value));
            }
            tracing::trace!(
                groups = table.len(),
                values = table.total_values(),
                "grouped keyed stream"
            );
            table.into_iter()
        }))
    }

    /// Merge the values of each key with `reducer`, in source order.
    ///
    /// The first value of a key is its starting accumulator.
    pub fn reduce_by_key<F>(self, mut reducer: F) -> Stream<impl Iterator<Item = Keyed<K, V>>>
    where
        K: StreamKey,
        F: FnMut(V, V) -> V,
    {
        let pairs = self.iterator();
        Stream::of(Deferred::new(pairs, move |pairs: I| {
            let mut table = FoldTable::new();
            for (key, value) in pairs {
                table.reduce_with(key, value, |acc, value| reducer(acc, value));
            }
            tracing::trace!(keys = table.len(), "reduced keyed stream");
            table.into_map().into_iter()
        }))
    }

    /// Fold the values of each key into a clone of `initial`, in source order.
    pub fn fold_by_key<A, F>(self, initial: A, mut folder: F) -> Stream<impl Iterator<Item = Keyed<K, A>>>
    where
        K: StreamKey,
        A: Clone,
        F: FnMut(A, V) -> A,
    {
        let pairs = self.iterator();
        Stream::of(Deferred::new(pairs, move |pairs: I| {
            let mut table = FoldTable::new();
            for (key, value) in pairs {
                table.fold_with(key, value, || initial.clone(), |acc, value| folder(acc, value));
            }
            tracing::trace!(keys = table.len(), "folded keyed stream");
            table.into_map().into_iter()
        }))
    }

    /// Collect the pairs into a map ordered by first appearance of each key.
    ///
    /// A repeated key keeps its first position and takes its last value.
    pub fn to_dict(self) -> OrderedMap<K, V>
    where
        K: StreamKey,
    {
        let dict: OrderedMap<K, V> = self.collect();
        tracing::trace!(keys = dict.len(), "collected keyed stream");
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_key_identity_projection() {
        let groups: Vec<_> = Stream::of(vec![(1, 'a'), (2, 'b'), (2, 'c'), (1, 'd')])
            .group_by_key(|v| v)
            .to_list();

        assert_eq!(groups, vec![(1, vec!['a', 'd']), (2, vec!['b', 'c'])]);
    }

    #[test]
    fn test_to_dict_last_value_wins() {
        let dict = Stream::of(vec![("a", 1), ("b", 2), ("a", 3)]).to_dict();
        let entries: Vec<_> = dict.into_iter().collect();
        assert_eq!(entries, vec![("a", 3), ("b", 2)]);
    }
}
