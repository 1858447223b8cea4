//! Read traversal: navigates without ever mutating the document.

use crate::error::Error;
use crate::pointer::segment::{parse_index, unescape_into};
use crate::pointer::{DocRoot, DocRootMut, JsonPointer};
use crate::types::{Array, Object, Value};
use crate::Result;

impl JsonPointer {
    pub(crate) fn resolve_in<'a>(&self, root: DocRoot<'a>) -> Result<&'a Value> {
        if self.path.is_empty() {
            return match root {
                DocRoot::Value(value) => Ok(value),
                DocRoot::Object(_) => Err(self.root_value_mismatch("object")),
                DocRoot::Array(_) => Err(self.root_value_mismatch("array")),
            };
        }
        if !self.path.starts_with('/') {
            return Err(self.bad_syntax());
        }

        let mut seg = self.scratch();
        let mut segments = self.path[1..].split('/');

        // A typed root anchors the first segment itself; from there on every
        // node is a plain value.
        let mut curr = match root {
            DocRoot::Value(value) => value,
            DocRoot::Object(obj) => {
                let Some(first) = segments.next() else {
                    return Err(self.bad_syntax());
                };
                unescape_into(first, &mut seg);
                self.lookup_object(obj, &seg)?
            }
            DocRoot::Array(arr) => {
                let Some(first) = segments.next() else {
                    return Err(self.bad_syntax());
                };
                unescape_into(first, &mut seg);
                self.lookup_array(arr, &seg)?
            }
        };

        for raw in segments {
            unescape_into(raw, &mut seg);
            curr = self.step_into(curr, &seg)?;
        }

        Ok(curr)
    }

    pub(crate) fn resolve_in_mut<'a>(&self, root: DocRootMut<'a>) -> Result<&'a mut Value> {
        if self.path.is_empty() {
            return match root {
                DocRootMut::Value(value) => Ok(value),
                DocRootMut::Object(_) => Err(self.root_value_mismatch("object")),
                DocRootMut::Array(_) => Err(self.root_value_mismatch("array")),
            };
        }
        if !self.path.starts_with('/') {
            return Err(self.bad_syntax());
        }

        let mut seg = self.scratch();
        let mut segments = self.path[1..].split('/');

        let mut curr = match root {
            DocRootMut::Value(value) => value,
            DocRootMut::Object(obj) => {
                let Some(first) = segments.next() else {
                    return Err(self.bad_syntax());
                };
                unescape_into(first, &mut seg);
                self.lookup_object_mut(obj, &seg)?
            }
            DocRootMut::Array(arr) => {
                let Some(first) = segments.next() else {
                    return Err(self.bad_syntax());
                };
                unescape_into(first, &mut seg);
                self.lookup_array_mut(arr, &seg)?
            }
        };

        for raw in segments {
            unescape_into(raw, &mut seg);
            curr = self.step_into_mut(curr, &seg)?;
        }

        Ok(curr)
    }

    fn step_into<'a>(&self, node: &'a Value, seg: &str) -> Result<&'a Value> {
        // an empty segment (trailing or doubled '/') only addresses the
        // empty key of an object
        if seg.is_empty() {
            return match node {
                Value::Object(obj) => self.lookup_object(obj, ""),
                other => Err(self.empty_segment_mismatch(other)),
            };
        }

        match node {
            Value::Object(obj) => self.lookup_object(obj, seg),
            Value::Array(arr) => self.lookup_array(arr, seg),
            other => Err(self.scalar_descent(other, seg)),
        }
    }

    fn step_into_mut<'a>(&self, node: &'a mut Value, seg: &str) -> Result<&'a mut Value> {
        if seg.is_empty() {
            return match node {
                Value::Object(obj) => self.lookup_object_mut(obj, ""),
                other => Err(self.empty_segment_mismatch(other)),
            };
        }

        match node {
            Value::Object(obj) => self.lookup_object_mut(obj, seg),
            Value::Array(arr) => self.lookup_array_mut(arr, seg),
            other => Err(self.scalar_descent(other, seg)),
        }
    }

    fn lookup_object<'a>(&self, obj: &'a Object, key: &str) -> Result<&'a Value> {
        obj.get(key).ok_or_else(|| self.key_missing(key))
    }

    fn lookup_object_mut<'a>(&self, obj: &'a mut Object, key: &str) -> Result<&'a mut Value> {
        let missing = || self.key_missing(key);
        obj.get_mut(key).ok_or_else(missing)
    }

    fn lookup_array<'a>(&self, arr: &'a Array, seg: &str) -> Result<&'a Value> {
        let index = parse_index(seg, &self.path)?;
        let len = arr.len();
        arr.get(index).ok_or_else(|| self.index_beyond(index, len))
    }

    fn lookup_array_mut<'a>(&self, arr: &'a mut Array, seg: &str) -> Result<&'a mut Value> {
        let index = parse_index(seg, &self.path)?;
        let len = arr.len();
        arr.get_mut(index)
            .ok_or_else(|| self.index_beyond(index, len))
    }

    fn bad_syntax(&self) -> Error {
        Error::malformed_path(format!(
            "illegally formed json pointer '{}': a non-empty path must start with '/'",
            self.path
        ))
    }

    fn root_value_mismatch(&self, declared: &str) -> Error {
        Error::type_mismatch(format!(
            "json pointer '': the empty path addresses the whole document, \
             but the root is declared as an {declared}, not a value"
        ))
    }

    fn empty_segment_mismatch(&self, node: &Value) -> Error {
        Error::type_mismatch(format!(
            "json pointer '{}': an empty segment only addresses an object key, \
             current value is a {}",
            self.path,
            node.value_type()
        ))
    }

    fn scalar_descent(&self, node: &Value, seg: &str) -> Error {
        Error::type_mismatch(format!(
            "json pointer '{}': segment '{}' descends into a {} value",
            self.path,
            seg,
            node.value_type()
        ))
    }

    fn key_missing(&self, key: &str) -> Error {
        Error::not_found(format!(
            "json pointer '{}': key '{}' does not exist",
            self.path, key
        ))
    }

    fn index_beyond(&self, index: usize, len: usize) -> Error {
        Error::index_out_of_range(format!(
            "json pointer '{}': array index {} out of range for length {}",
            self.path, index, len
        ))
    }
}
