//! # lazystream Core
//!
//! Building blocks shared by the lazystream API.
//!
//! - [`types`] — The [`StreamKey`](types::StreamKey) bound and the insertion-ordered
//!   [`OrderedMap`](types::OrderedMap) returned by grouping terminals.
//! - [`group`] — Per-key state: [`GroupTable`](group::GroupTable) collects values,
//!   [`FoldTable`](group::FoldTable) accumulates them.
//! - [`field`] — Typed field references ([`FieldRef`](field::FieldRef), [`field_refs!`])
//!   and dotted runtime paths over JSON records ([`FieldPath`](field::FieldPath)).
//! - [`functions`] — Small helpers such as [`identity`](functions::identity).

pub mod field;
pub mod functions;
pub mod group;
pub mod types;
