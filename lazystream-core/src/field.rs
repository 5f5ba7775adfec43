//! Field references: record fields as first-class projections.
//!
//! A [`FieldRef<T, V>`] names a field of type `V` inside a record `T` and knows
//! how to borrow it. References compose with [`FieldRef::then`] to reach nested
//! fields, and turn into plain closures for stream operators:
//!
//! ```
//! use lazystream_core::field_refs;
//!
//! struct Address { city: String }
//! struct User { name: String, age: u32, address: Address }
//!
//! field_refs!(struct UserFields for User { name: String, age: u32, address: Address });
//! field_refs!(struct AddressFields for Address { city: String });
//!
//! let user = User {
//!     name: "foo".into(),
//!     age: 25,
//!     address: Address { city: "Lyon".into() },
//! };
//! assert_eq!(UserFields::name().get(&user), "foo");
//! assert_eq!(*UserFields::age().get(&user), 25);
//!
//! let city = UserFields::address().then(&AddressFields::city());
//! assert_eq!(city.name(), "address.city");
//! assert_eq!(city.get(&user), "Lyon");
//! ```
//!
//! For records only known at runtime (JSON documents) use [`FieldPath`].

use std::fmt;
use std::sync::Arc;

pub mod path;

pub use path::{FieldPath, Segment};

type Accessor<T, V> = Arc<dyn for<'a> Fn(&'a T) -> &'a V + Send + Sync>;

fn accessor<T, V, F>(f: F) -> Accessor<T, V>
where
    F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A named, composable reference to a field of type `V` in a record of type `T`.
pub struct FieldRef<T, V> {
    name: String,
    accessor: Accessor<T, V>,
}

impl<T, V> FieldRef<T, V>
where
    T: 'static,
    V: 'static,
{
    /// Create a reference from a field name and a borrowing accessor.
    pub fn new<F>(name: impl Into<String>, accessor_fn: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> &'a V + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            accessor: accessor(accessor_fn),
        }
    }

    /// Dotted name of the referenced field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the field from `record`.
    pub fn get<'a>(&self, record: &'a T) -> &'a V {
        (self.accessor)(record)
    }

    /// Clone the field out of `record`.
    pub fn get_cloned(&self, record: &T) -> V
    where
        V: Clone,
    {
        self.get(record).clone()
    }

    /// Reference a field of this field: `outer.inner`.
    pub fn then<W>(&self, inner: &FieldRef<V, W>) -> FieldRef<T, W>
    where
        W: 'static,
    {
        let outer = Arc::clone(&self.accessor);
        let inner_accessor = Arc::clone(&inner.accessor);
        FieldRef {
            name: format!("{}.{}", self.name, inner.name),
            accessor: accessor(move |record: &T| inner_accessor(outer(record))),
        }
    }

    /// Closure that clones the field out of a borrowed record.
    ///
    /// Fits operators that look at elements by reference, e.g. `key_by`.
    pub fn selector(&self) -> impl Fn(&T) -> V + Clone + Send + Sync + use<T, V>
    where
        V: Clone,
    {
        let accessor = Arc::clone(&self.accessor);
        move |record: &T| accessor(record).clone()
    }

    /// Closure that takes ownership of a record and returns a clone of the field.
    ///
    /// Fits operators that consume elements, e.g. `map` or `group_by_key`.
    pub fn projection(&self) -> impl Fn(T) -> V + Clone + Send + Sync + use<T, V>
    where
        V: Clone,
    {
        let accessor = Arc::clone(&self.accessor);
        move |record: T| accessor(&record).clone()
    }
}

impl<T, V> Clone for FieldRef<T, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            accessor: Arc::clone(&self.accessor),
        }
    }
}

impl<T, V> fmt::Debug for FieldRef<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldRef").field(&self.name).finish()
    }
}

/// Generate a companion type holding one [`FieldRef`] constructor per listed field.
///
/// ```
/// use lazystream_core::field_refs;
///
/// pub struct User { pub name: String, pub age: u32 }
///
/// field_refs!(pub struct UserFields for User { name: String, age: u32 });
///
/// assert_eq!(UserFields::FIELDS, &["name", "age"]);
/// assert_eq!(UserFields::age().name(), "age");
/// ```
#[macro_export]
macro_rules! field_refs {
    ($vis:vis struct $fields:ident for $record:ty { $($field:ident : $fty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $fields;

        #[allow(dead_code)]
        impl $fields {
            /// Names of the referenced fields, in declaration order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            $(
                pub fn $field() -> $crate::field::FieldRef<$record, $fty> {
                    $crate::field::FieldRef::new(stringify!($field), |record: &$record| &record.$field)
                }
            )*
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Inner {
        label: String,
        tags: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Outer {
        id: u64,
        inner: Inner,
        parent: Option<u64>,
    }

    field_refs!(struct OuterFields for Outer { id: u64, inner: Inner, parent: Option<u64> });
    field_refs!(struct InnerFields for Inner { label: String, tags: Vec<String> });

    fn sample() -> Outer {
        Outer {
            id: 7,
            inner: Inner {
                label: "v4".to_string(),
                tags: vec!["def1".to_string(), "def2".to_string()],
            },
            parent: None,
        }
    }

    #[test]
    fn test_field_ref_get() {
        let record = sample();
        assert_eq!(*OuterFields::id().get(&record), 7);
        assert_eq!(*OuterFields::parent().get(&record), None);
        assert_eq!(OuterFields::inner().get(&record), &record.inner);
    }

    #[test]
    fn test_field_ref_nested() {
        let record = sample();
        let label = OuterFields::inner().then(&InnerFields::label());
        let tags = OuterFields::inner().then(&InnerFields::tags());

        assert_eq!(label.name(), "inner.label");
        assert_eq!(label.get(&record), "v4");
        assert_eq!(tags.get(&record)[0], "def1");
    }

    #[test]
    fn test_field_ref_closures() {
        let record = sample();
        let select = OuterFields::id().selector();
        let project = OuterFields::inner().then(&InnerFields::label()).projection();

        assert_eq!(select(&record), 7);
        assert_eq!(project(record), "v4".to_string());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(OuterFields::FIELDS, &["id", "inner", "parent"]);
        assert_eq!(format!("{:?}", InnerFields::tags()), "FieldRef(\"tags\")");
    }

    #[test]
    fn test_field_ref_custom_accessor() {
        let first_tag = FieldRef::new("first_tag", |inner: &Inner| &inner.tags[0]);
        let record = sample();
        assert_eq!(first_tag.get_cloned(&record.inner), "def1");
    }
}
