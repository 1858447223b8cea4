//! Write traversal: autovivifies missing structure on the way down.
//!
//! The shape of each segment decides the container kind of the slot it
//! names: the first segment coerces the document root itself, every later
//! segment coerces the slot its predecessor addresses. Array growth only
//! ever appends; the first failure aborts with prior mutations in place.

use std::cmp::Ordering;

use crate::error::Error;
use crate::pointer::segment::{
    is_array_segment, is_forced_key, parse_index, strip_forced, unescape_into,
};
use crate::pointer::JsonPointer;
use crate::types::{Array, Object, Value};
use crate::Result;

/// Coerces the slot to an object unless it already is one.
fn be_object(value: &mut Value) -> &mut Value {
    if !value.is_object() {
        *value = Value::Object(Object::new());
    }
    value
}

/// Coerces the slot to an array unless it already is one.
fn be_array(value: &mut Value) -> &mut Value {
    if !value.is_array() {
        *value = Value::Array(Array::new());
    }
    value
}

fn wants_object(segment: &str) -> bool {
    is_forced_key(segment) || !is_array_segment(segment)
}

impl JsonPointer {
    pub(crate) fn assign(&self, doc: &mut Value, value: Value) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(Error::malformed_path(format!(
                "illegally formed json pointer '{}': an assignment path must start with '/'",
                self.path
            )));
        }

        let mut buf = self.scratch();
        let mut segments = self.path[1..].split('/');
        let Some(first) = segments.next() else {
            return Err(Error::malformed_path(format!(
                "illegally formed json pointer '{}'",
                self.path
            )));
        };

        // current segment, kept unescaped; the scratch buffer receives the
        // lookahead segment and the two swap as the walk advances
        let mut seg = String::with_capacity(self.path.len());
        unescape_into(first, &mut seg);

        let mut curr = if wants_object(&seg) {
            be_object(doc)
        } else {
            be_array(doc)
        };

        for raw in segments {
            unescape_into(raw, &mut buf);
            curr = if wants_object(&buf) {
                self.descend_object(curr, &seg)?
            } else {
                self.descend_array(curr, &seg)?
            };
            std::mem::swap(&mut seg, &mut buf);
        }

        self.assign_value(curr, &seg, value)
    }

    /// Steps through `seg` in `parent`, coercing the addressed slot to an
    /// object.
    fn descend_object<'a>(&self, parent: &'a mut Value, seg: &str) -> Result<&'a mut Value> {
        match parent {
            Value::Object(obj) => {
                let key = strip_forced(seg);
                Ok(be_object(
                    obj.entry(key.to_owned()).or_insert(Value::Null),
                ))
            }
            Value::Array(arr) => {
                let index = self.growth_index(arr, seg)?;
                if index == arr.len() {
                    arr.push(Value::Object(Object::new()));
                }
                Ok(be_object(&mut arr[index]))
            }
            other => Err(self.scalar_ancestor(other, seg)),
        }
    }

    /// Steps through `seg` in `parent`, coercing the addressed slot to an
    /// array.
    fn descend_array<'a>(&self, parent: &'a mut Value, seg: &str) -> Result<&'a mut Value> {
        match parent {
            Value::Object(obj) => {
                let key = strip_forced(seg);
                Ok(be_array(obj.entry(key.to_owned()).or_insert(Value::Null)))
            }
            Value::Array(arr) => {
                let index = self.growth_index(arr, seg)?;
                if index == arr.len() {
                    arr.push(Value::Array(Array::new()));
                }
                Ok(be_array(&mut arr[index]))
            }
            other => Err(self.scalar_ancestor(other, seg)),
        }
    }

    /// Final assignment into the located parent.
    fn assign_value(&self, head: &mut Value, seg: &str, value: Value) -> Result<()> {
        let key = strip_forced(seg);
        match head {
            Value::Object(obj) => {
                obj.insert(key.to_owned(), value);
                Ok(())
            }
            Value::Array(arr) => {
                if key == "-" {
                    arr.push(value);
                    return Ok(());
                }
                let index = parse_index(key, &self.path)?;
                match index.cmp(&arr.len()) {
                    Ordering::Less => {
                        arr[index] = value;
                        Ok(())
                    }
                    Ordering::Equal => {
                        arr.push(value);
                        Ok(())
                    }
                    Ordering::Greater => Err(self.overflow(index, arr.len())),
                }
            }
            other => Err(Error::type_mismatch(format!(
                "json pointer '{}': cannot assign a value through a {} ancestor",
                self.path,
                other.value_type()
            ))),
        }
    }

    /// Index for descending into an array: the append sentinel maps to the
    /// current length, anything beyond the length overflows.
    fn growth_index(&self, arr: &Array, seg: &str) -> Result<usize> {
        let index = if seg == "-" {
            arr.len()
        } else {
            parse_index(seg, &self.path)?
        };
        if index > arr.len() {
            return Err(self.overflow(index, arr.len()));
        }
        Ok(index)
    }

    fn overflow(&self, index: usize, len: usize) -> Error {
        Error::index_overflow(format!(
            "json pointer '{}': array index {} overflows current length {}",
            self.path, index, len
        ))
    }

    fn scalar_ancestor(&self, node: &Value, seg: &str) -> Error {
        Error::type_mismatch(format!(
            "json pointer '{}': segment '{}' descends through a {} ancestor",
            self.path,
            seg,
            node.value_type()
        ))
    }
}
