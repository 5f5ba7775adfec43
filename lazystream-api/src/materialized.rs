//! Evaluated streams that can be replayed.

use std::sync::Arc;

use crate::stream::Stream;

/// The elements of a fully evaluated stream.
///
/// Created by [`Stream::materialize`]. Each call to [`stream`](Self::stream)
/// starts an independent child stream over the same elements; the source is
/// never pulled again. Cloning shares the underlying buffer.
#[derive(Debug)]
pub struct MaterializedStream<T> {
    items: Arc<[T]>,
}

impl<T> MaterializedStream<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Start a new stream over the materialized elements.
    pub fn stream(&self) -> Stream<MaterializedIter<T>>
    where
        T: Clone,
    {
        Stream::of(MaterializedIter {
            items: Arc::clone(&self.items),
            position: 0,
        })
    }

    /// A copy of the elements.
    pub fn to_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Clone for MaterializedStream<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

/// Iterator over a [`MaterializedStream`], yielding clones of its elements.
#[derive(Debug, Clone)]
pub struct MaterializedIter<T> {
    items: Arc<[T]>,
    position: usize,
}

impl<T: Clone> Iterator for MaterializedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.position)?.clone();
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for MaterializedIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_are_independent() {
        let materialized = Stream::of("abc".chars()).materialize();

        let upper: Vec<_> = materialized.stream().map(|c| c.to_ascii_uppercase()).to_list();
        let codes: Vec<_> = materialized.stream().map(|c| c as u32).to_list();

        assert_eq!(upper, vec!['A', 'B', 'C']);
        assert_eq!(codes, vec![97, 98, 99]);
        assert_eq!(materialized.to_list(), vec!['a', 'b', 'c']);
        assert_eq!(materialized.len(), 3);
    }

    #[test]
    fn test_exact_size() {
        let materialized = Stream::range(0, 4).materialize();
        let mut iter = materialized.stream().iterator();
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_clone_shares_buffer() {
        let materialized = Stream::of(vec![1, 2]).materialize();
        let copy = materialized.clone();
        assert_eq!(copy.as_slice().as_ptr(), materialized.as_slice().as_ptr());
        assert!(!copy.is_empty());
    }
}
