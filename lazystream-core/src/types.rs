use std::hash::Hash;

use indexmap::IndexMap;

/// A keyed element: `(key, value)`.
pub type Keyed<K, V> = (K, V);

/// Map that iterates in first-insertion order of its keys.
///
/// Keys are hashed with ahash.
pub type OrderedMap<K, V> = IndexMap<K, V, ahash::RandomState>;

/// Trait bound for values used as grouping keys.
pub trait StreamKey: Hash + Eq {}

// Blanket implementation: any hashable, comparable type can key a stream.
impl<T> StreamKey for T where T: Hash + Eq {}
