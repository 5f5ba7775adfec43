//! Iterator adapter that postpones building its output until the first pull.

use std::mem;

enum State<I, F, O> {
    Pending(I, F),
    Running(O),
    Done,
}

/// Runs `build(source)` on the first call to `next` and yields from the result.
///
/// Used by operators that must see the whole input before emitting anything
/// (sorting, reversing, grouping) while keeping the pipeline lazy.
pub(crate) struct Deferred<I, F, O> {
    state: State<I, F, O>,
}

impl<I, F, O> Deferred<I, F, O> {
    pub(crate) fn new(source: I, build: F) -> Self {
        Self {
            state: State::Pending(source, build),
        }
    }
}

impl<I, F, O> Iterator for Deferred<I, F, O>
where
    F: FnOnce(I) -> O,
    O: Iterator,
{
    type Item = O::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Running(output) => return output.next(),
                State::Done => return None,
                State::Pending(..) => {
                    if let State::Pending(source, build) = mem::replace(&mut self.state, State::Done) {
                        self.state = State::Running(build(source));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Running(output) => output.size_hint(),
            State::Done => (0, Some(0)),
            State::Pending(..) => (0, None),
        }
    }
}
