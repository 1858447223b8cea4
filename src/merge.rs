//! Recursive document merging and keyed subset extraction.

use crate::types::{Object, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// A `Null` in the source deletes the target key instead of storing it.
    pub erase_if_null: bool,
}

impl MergeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_erase_if_null(mut self, erase_if_null: bool) -> Self {
        self.erase_if_null = erase_if_null;
        self
    }
}

/// Merges `src` into `tgt`.
///
/// When both sides are objects their entries merge recursively; any other
/// pairing overwrites `tgt` with a copy of `src`.
pub fn merge(src: &Value, tgt: &mut Value, options: MergeOptions) {
    if let (Value::Object(src_obj), Value::Object(tgt_obj)) = (src, &mut *tgt) {
        merge_objects(src_obj, tgt_obj, options);
    } else {
        *tgt = src.clone();
    }
}

pub fn merge_objects(src: &Object, tgt: &mut Object, options: MergeOptions) {
    for (key, value) in src {
        if options.erase_if_null && value.is_null() {
            tgt.remove(key);
        } else {
            merge(
                value,
                tgt.entry(key.clone()).or_insert(Value::Null),
                options,
            );
        }
    }
}

/// Merges only the named keys, skipping keys absent in `src`.
pub fn merge_keys(src: &Object, tgt: &mut Object, keys: &[&str]) {
    for &key in keys {
        if let Some(value) = src.get(key) {
            merge(
                value,
                tgt.entry(key.to_owned()).or_insert(Value::Null),
                MergeOptions::default(),
            );
        }
    }
}

/// Copies the named keys out of `obj` into a new object, skipping absentees.
pub fn select_keys(obj: &Object, keys: &[&str]) -> Object {
    let mut result = Object::new();
    for &key in keys {
        if let Some(value) = obj.get(key) {
            result.insert(key.to_owned(), value.clone());
        }
    }
    result
}
