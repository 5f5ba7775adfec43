//! The [`Stream`] type: constructors, intermediate operators and terminal operators.
//!
//! A stream wraps an iterator pipeline. Every operator consumes the stream and
//! returns a new one, so a stream can be operated upon exactly once; reusing a
//! consumed stream is rejected by the compiler. Use
//! [`materialize`](Stream::materialize) when several pipelines need the same
//! elements.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::iter::{
    Chain, Empty, Enumerate, Filter, FlatMap, Inspect, Map, RepeatWith, Skip, SkipWhile, Take,
    TakeWhile,
};

use ahash::AHashSet;
use anyhow::{Result, bail};
use lazystream_core::types::{Keyed, StreamKey};

use crate::deferred::Deferred;
use crate::materialized::MaterializedStream;

/// A lazily evaluated sequence of elements.
///
/// Created by [`Stream::of`], [`Stream::empty`], [`Stream::generate`],
/// [`Stream::range`] or the [`stream!`](crate::stream!) macro.
#[must_use = "streams are lazy and do nothing unless consumed"]
pub struct Stream<I> {
    iter: I,
}

// ============================================================================
// Constructors
// ============================================================================

impl<I> Stream<I>
where
    I: Iterator,
{
    /// Wrap any iterable. Nothing is pulled from it until the stream is consumed.
    pub fn of<C>(items: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: items.into_iter(),
        }
    }
}

impl<T> Stream<Empty<T>> {
    /// A stream without elements.
    pub fn empty() -> Self {
        Self {
            iter: std::iter::empty(),
        }
    }
}

impl<T, F> Stream<RepeatWith<F>>
where
    F: FnMut() -> T,
{
    /// An infinite stream whose elements come from calling `supplier`.
    ///
    /// The supplier is only called when an element is pulled, so pair this with
    /// [`limit`](Stream::limit) or a short-circuiting terminal.
    pub fn generate(supplier: F) -> Self {
        Self {
            iter: std::iter::repeat_with(supplier),
        }
    }
}

impl Stream<StepRange> {
    /// Integers from `start` (inclusive) to `end` (exclusive).
    pub fn range(start: i64, end: i64) -> Self {
        Self {
            iter: StepRange::new(start, end, 1),
        }
    }

    /// Integers from `start` towards `end` (exclusive) in increments of `step`.
    ///
    /// A negative step counts down. A zero step is an error.
    pub fn range_step(start: i64, end: i64, step: i64) -> Result<Self> {
        if step == 0 {
            bail!("range step must not be zero");
        }
        Ok(Self {
            iter: StepRange::new(start, end, step),
        })
    }
}

/// Iterator behind [`Stream::range`] and [`Stream::range_step`].
#[derive(Debug, Clone)]
pub struct StepRange {
    next: i64,
    end: i64,
    step: i64,
    exhausted: bool,
}

impl StepRange {
    fn new(start: i64, end: i64, step: i64) -> Self {
        Self {
            next: start,
            end,
            step,
            exhausted: false,
        }
    }
}

impl Iterator for StepRange {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let in_range = if self.step > 0 {
            self.next < self.end
        } else {
            self.next > self.end
        };
        if self.exhausted || !in_range {
            self.exhausted = true;
            return None;
        }

        let current = self.next;
        match current.checked_add(self.step) {
            Some(next) => self.next = next,
            None => self.exhausted = true,
        }
        Some(current)
    }
}

// ============================================================================
// Intermediate operators
// ============================================================================

impl<I> Stream<I>
where
    I: Iterator,
{
    /// Keep the elements matching `predicate`.
    pub fn filter<P>(self, predicate: P) -> Stream<Filter<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Stream {
            iter: self.iter.filter(predicate),
        }
    }

    /// Transform each element.
    pub fn map<U, F>(self, mapper: F) -> Stream<Map<I, F>>
    where
        F: FnMut(I::Item) -> U,
    {
        Stream {
            iter: self.iter.map(mapper),
        }
    }

    /// Replace each element by the elements of the iterable `mapper` returns.
    pub fn flat_map<U, F>(self, mapper: F) -> Stream<FlatMap<I, U, F>>
    where
        U: IntoIterator,
        F: FnMut(I::Item) -> U,
    {
        Stream {
            iter: self.iter.flat_map(mapper),
        }
    }

    /// Drop elements equal to an earlier one. The first occurrence is kept.
    pub fn distinct(self) -> Stream<impl Iterator<Item = I::Item>>
    where
        I::Item: StreamKey + Clone,
    {
        let mut seen = AHashSet::new();
        Stream {
            iter: self.iter.filter(move |item| seen.insert(item.clone())),
        }
    }

    /// Drop elements whose `key` equals the key of an earlier element.
    pub fn distinct_by<K, F>(self, mut key: F) -> Stream<impl Iterator<Item = I::Item>>
    where
        K: StreamKey,
        F: FnMut(&I::Item) -> K,
    {
        let mut seen = AHashSet::new();
        Stream {
            iter: self.iter.filter(move |item| seen.insert(key(item))),
        }
    }

    /// Sort in ascending order. Equal elements keep their relative order.
    pub fn sorted(self) -> Stream<impl Iterator<Item = I::Item>>
    where
        I::Item: Ord,
    {
        self.buffered(|items| items.sort())
    }

    /// Sort in descending order. Equal elements keep their relative order.
    pub fn sorted_desc(self) -> Stream<impl Iterator<Item = I::Item>>
    where
        I::Item: Ord,
    {
        self.buffered(|items| items.sort_by(|a, b| b.cmp(a)))
    }

    /// Sort by `key` in ascending order; `key` runs once per element.
    pub fn sorted_by_key<K, F>(self, mut key: F) -> Stream<impl Iterator<Item = I::Item>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.buffered(move |items| items.sort_by_cached_key(|item| key(item)))
    }

    /// Sort by `key` in descending order; `key` runs once per element.
    pub fn sorted_by_key_desc<K, F>(self, mut key: F) -> Stream<impl Iterator<Item = I::Item>>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.buffered(move |items| items.sort_by_cached_key(|item| std::cmp::Reverse(key(item))))
    }

    /// Emit the elements in reverse order.
    pub fn reversed(self) -> Stream<impl Iterator<Item = I::Item>> {
        Stream {
            iter: Deferred::new(self.iter, |iter: I| {
                let items: Vec<I::Item> = iter.collect();
                tracing::trace!(elements = items.len(), "buffered stream for reversal");
                items.into_iter().rev()
            }),
        }
    }

    /// Call `action` on each element as it passes through.
    pub fn peek<F>(self, action: F) -> Stream<Inspect<I, F>>
    where
        F: FnMut(&I::Item),
    {
        Stream {
            iter: self.iter.inspect(action),
        }
    }

    /// Pair each element with its position, starting at zero.
    pub fn enumerate(self) -> Stream<Enumerate<I>> {
        Stream {
            iter: self.iter.enumerate(),
        }
    }

    /// Keep at most `max_size` elements. The source is pulled at most `max_size` times.
    pub fn limit(self, max_size: usize) -> Stream<Take<I>> {
        Stream {
            iter: self.iter.take(max_size),
        }
    }

    /// Discard the first `n` elements.
    pub fn skip(self, n: usize) -> Stream<Skip<I>> {
        Stream {
            iter: self.iter.skip(n),
        }
    }

    /// Keep elements up to (excluding) the first one failing `predicate`.
    pub fn take_while<P>(self, predicate: P) -> Stream<TakeWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Stream {
            iter: self.iter.take_while(predicate),
        }
    }

    /// Discard elements up to (excluding) the first one failing `predicate`.
    pub fn drop_while<P>(self, predicate: P) -> Stream<SkipWhile<I, P>>
    where
        P: FnMut(&I::Item) -> bool,
    {
        Stream {
            iter: self.iter.skip_while(predicate),
        }
    }

    /// Append the elements of `other` after this stream's elements.
    pub fn union<J>(self, other: Stream<J>) -> Stream<Chain<I, J>>
    where
        J: Iterator<Item = I::Item>,
    {
        Stream {
            iter: self.iter.chain(other.iter),
        }
    }

    /// Apply a function from stream to stream, keeping the fluent chain readable.
    pub fn transform<J, F>(self, f: F) -> Stream<J>
    where
        F: FnOnce(Self) -> Stream<J>,
    {
        f(self)
    }

    /// Tag each element with a key: `element -> (key_fn(&element), element)`.
    pub fn key_by<K, F>(self, mut key_fn: F) -> Stream<impl Iterator<Item = Keyed<K, I::Item>>>
    where
        F: FnMut(&I::Item) -> K,
    {
        Stream {
            iter: self.iter.map(move |item| (key_fn(&item), item)),
        }
    }

    /// Group elements by `classifier`, keeping `projection(element)` in each group.
    ///
    /// Shorthand for `key_by(classifier).group_by_key(projection)`.
    ///
    /// `projection` runs once per element in source order while the groups
    /// are built, not group by group afterwards: for `['a', 'b', 'c']` with
    /// `'b'` in its own group it sees `a, b, c`, while the groups come out as
    /// `[a, c]` then `[b]`.
    pub fn group_by<K, W, C, P>(
        self,
        classifier: C,
        projection: P,
    ) -> Stream<impl Iterator<Item = Keyed<K, Vec<W>>>>
    where
        K: StreamKey,
        C: FnMut(&I::Item) -> K,
        P: FnMut(I::Item) -> W,
    {
        self.key_by(classifier).group_by_key(projection)
    }

    /// Evaluate the stream now and keep the elements for reuse.
    pub fn materialize(self) -> MaterializedStream<I::Item> {
        let items: Vec<I::Item> = self.iter.collect();
        tracing::debug!(elements = items.len(), "materialized stream");
        MaterializedStream::new(items)
    }

    fn buffered<S>(self, arrange: S) -> Stream<impl Iterator<Item = I::Item>>
    where
        S: FnOnce(&mut Vec<I::Item>),
    {
        Stream {
            iter: Deferred::new(self.iter, move |iter: I| {
                let mut items: Vec<I::Item> = iter.collect();
                arrange(&mut items);
                tracing::trace!(elements = items.len(), "buffered stream for sorting");
                items.into_iter()
            }),
        }
    }
}

// ============================================================================
// Terminal operators
// ============================================================================

impl<I> Stream<I>
where
    I: Iterator,
{
    /// Call `action` on every element.
    pub fn for_each<F>(self, action: F)
    where
        F: FnMut(I::Item),
    {
        self.iter.for_each(action);
    }

    /// Collect into any [`FromIterator`] container.
    pub fn collect<C>(self) -> C
    where
        C: FromIterator<I::Item>,
    {
        self.iter.collect()
    }

    /// The underlying iterator; elements are produced as it is advanced.
    pub fn iterator(self) -> I {
        self.iter
    }

    pub fn to_list(self) -> Vec<I::Item> {
        self.iter.collect()
    }

    pub fn to_set(self) -> HashSet<I::Item>
    where
        I::Item: Eq + Hash,
    {
        self.iter.collect()
    }

    /// Combine all elements with `accumulator`; `None` for an empty stream.
    pub fn reduce<F>(self, accumulator: F) -> Option<I::Item>
    where
        F: FnMut(I::Item, I::Item) -> I::Item,
    {
        self.iter.reduce(accumulator)
    }

    /// Combine all elements into `initial` with `accumulator`.
    pub fn fold<A, F>(self, initial: A, accumulator: F) -> A
    where
        F: FnMut(A, I::Item) -> A,
    {
        self.iter.fold(initial, accumulator)
    }

    /// The smallest element; the first one on ties.
    pub fn min(self) -> Option<I::Item>
    where
        I::Item: Ord,
    {
        self.iter.min()
    }

    /// The largest element; the first one on ties.
    pub fn max(self) -> Option<I::Item>
    where
        I::Item: Ord,
    {
        self.iter
            .reduce(|best, item| if item > best { item } else { best })
    }

    /// The element with the smallest `key`; the first one on ties.
    pub fn min_by_key<K, F>(self, key: F) -> Option<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.iter.min_by_key(key)
    }

    /// The element with the largest `key`; the first one on ties.
    pub fn max_by_key<K, F>(self, mut key: F) -> Option<I::Item>
    where
        K: Ord,
        F: FnMut(&I::Item) -> K,
    {
        self.iter
            .map(|item| (key(&item), item))
            .reduce(|best, candidate| if candidate.0 > best.0 { candidate } else { best })
            .map(|(_, item)| item)
    }

    pub fn count(self) -> usize {
        self.iter.count()
    }

    /// Whether any element matches. Stops at the first match.
    pub fn any_match<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.iter.any(|item| predicate(&item))
    }

    /// Whether all elements match. Stops at the first mismatch.
    pub fn all_match<P>(mut self, mut predicate: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        self.iter.all(|item| predicate(&item))
    }

    /// Whether no element matches. Stops at the first match.
    pub fn none_match<P>(self, predicate: P) -> bool
    where
        P: FnMut(&I::Item) -> bool,
    {
        !self.any_match(predicate)
    }

    /// The first element, pulling nothing beyond it.
    pub fn find_first(mut self) -> Option<I::Item> {
        self.iter.next()
    }

    /// Concatenate the string forms of all elements.
    pub fn joining(self) -> String
    where
        I::Item: Display,
    {
        self.joining_with("", "", "")
    }

    /// Concatenate the string forms of all elements, separated by `delimiter` and
    /// wrapped in `prefix` and `suffix`.
    pub fn joining_with(self, delimiter: &str, prefix: &str, suffix: &str) -> String
    where
        I::Item: Display,
    {
        let mut joined = String::from(prefix);
        for (position, item) in self.iter.enumerate() {
            if position > 0 {
                joined.push_str(delimiter);
            }
            joined.push_str(&item.to_string());
        }
        joined.push_str(suffix);
        joined
    }
}

impl<I> IntoIterator for Stream<I>
where
    I: Iterator,
{
    type Item = I::Item;
    type IntoIter = I;

    fn into_iter(self) -> I {
        self.iter
    }
}

impl<I> std::fmt::Debug for Stream<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Stream(<lazy>)")
    }
}
