//! Incremental document construction from tokenizer events.
//!
//! The byte-level tokenizer lives outside this crate; it reports a flat,
//! ordered sequence of [`Event`]s which [`TreeBuilder`] folds into a
//! [`crate::Value`] tree.

mod builder;

pub use builder::TreeBuilder;

/// One notification from a streaming tokenizer.
///
/// Structural validity (matched start/end pairs) is checked by the builder;
/// text-level grammar is the tokenizer's responsibility. `Number` carries
/// the raw decimal token, classified by
/// [`crate::num::value_from_number_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Key(&'a str),
    Null,
    Bool(bool),
    Number(&'a str),
    String(&'a str),
}
