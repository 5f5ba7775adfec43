//! # lazystream API
//!
//! Fluent, lazily evaluated streams over in-memory sequences.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazystream_api::{Stream, field_refs};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! field_refs!(struct UserFields for User { name: String, age: u32 });
//!
//! let users = vec![
//!     User { name: "foo".into(), age: 25 },
//!     User { name: "bar".into(), age: 22 },
//!     User { name: "baz".into(), age: 30 },
//! ];
//!
//! let by_decade = Stream::of(users)
//!     .key_by(|user: &User| user.age / 10)
//!     .group_by_key(UserFields::name().projection())
//!     .to_dict();
//!
//! assert_eq!(by_decade[&2], vec!["foo", "bar"]);
//! assert_eq!(by_decade[&3], vec!["baz"]);
//! ```
//!
//! - [`stream`] — [`Stream`](stream::Stream): constructors, intermediate and terminal operators.
//! - [`keyed`] — operators available once elements are `(key, value)` pairs, including
//!   [`group_by_key`](stream::Stream::group_by_key) and [`to_dict`](stream::Stream::to_dict).
//! - [`materialized`] — [`MaterializedStream`](materialized::MaterializedStream): an evaluated
//!   snapshot from which any number of child streams can be started.
//!
//! Nothing is pulled from the source until a terminal operator runs (or the stream is
//! iterated). Operators that need the whole input, such as sorting or grouping, buffer
//! it on the first pull.

mod deferred;
pub mod keyed;
pub mod materialized;
pub mod stream;

pub use lazystream_core;
pub use lazystream_core::field::{FieldPath, FieldRef};
pub use lazystream_core::field_refs;
pub use lazystream_core::functions::{identity, require_some};
pub use lazystream_core::types::OrderedMap;
pub use materialized::{MaterializedIter, MaterializedStream};
pub use stream::{StepRange, Stream};

/// Build a [`Stream`] from a list of elements.
///
/// ```
/// use lazystream_api::stream;
///
/// assert_eq!(stream![1, 2, 3].to_list(), vec![1, 2, 3]);
/// assert_eq!(stream!["a", "b"].joining(), "ab");
/// ```
#[macro_export]
macro_rules! stream {
    () => {
        $crate::Stream::of(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Stream::of([$($item),+])
    };
}
