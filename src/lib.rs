//! In-memory JSON document model with event-driven building and
//! JSON Pointer addressing.
//!
//! The crate has three cooperating pieces: the [`Value`] tree itself, a
//! [`TreeBuilder`] that folds a tokenizer's event stream into a tree, and a
//! [`JsonPointer`] engine that reads or creates nested values by path
//! expression. Tokenizing JSON text is out of scope; any event source that
//! speaks [`Event`] can drive the builder.

pub mod error;
pub mod merge;
pub mod num;
pub mod parse;
pub mod pointer;
pub mod types;

pub use error::{Error, ErrorKind};
pub use merge::{merge, merge_keys, merge_objects, select_keys, MergeOptions};
pub use num::value_from_number_token;
pub use parse::{Event, TreeBuilder};
pub use pointer::{escape, DocRoot, DocRootMut, JsonPointer};
pub use types::{Array, Object, SecureString, Value, ValueType};

pub type Result<T> = std::result::Result<T, Error>;

/// Resolves the value addressed by `path` inside `doc`.
pub fn retrieve<'a>(doc: &'a Value, path: &str) -> Result<&'a Value> {
    JsonPointer::new(path).resolve(doc)
}

/// Mutable counterpart of [`retrieve`].
pub fn retrieve_mut<'a>(doc: &'a mut Value, path: &str) -> Result<&'a mut Value> {
    JsonPointer::new(path).resolve_mut(doc)
}

/// Assigns `value` at `path` inside `doc`, creating missing intermediate
/// containers on the way down.
pub fn set(doc: &mut Value, path: &str, value: impl Into<Value>) -> Result<()> {
    JsonPointer::new(path).set(doc, value)
}

/// Builds a document from a complete event sequence.
pub fn build_from_events<'a>(events: impl IntoIterator<Item = Event<'a>>) -> Result<Value> {
    let mut builder = TreeBuilder::new();
    for event in events {
        builder.event(event)?;
    }
    Ok(builder.finish())
}
