//! Structural addressing of document values by path expression.
//!
//! A path is a `/`-separated sequence of segments; within a segment `~1`
//! decodes to `/` and `~0` to `~`. Digits-only segments and the `-` append
//! sentinel address arrays; everything else addresses object keys. A
//! segment wrapped in `~2` markers is forced to be an object key even when
//! it is all digits. The empty path denotes the document root itself.
//!
//! Reads never mutate. Writes create missing intermediate containers on the
//! way down and abort at the first error, leaving prior mutations in place;
//! callers that need atomicity operate on a copy.

mod assign;
mod resolve;
mod segment;

use std::cell::RefCell;

use crate::error::Error;
use crate::types::{Array, Object, SecureString, Value};
use crate::Result;

pub use segment::escape;

/// Borrowed document root for read traversal.
///
/// A root may be declared as a whole [`Value`] or directly as an
/// [`Object`]/[`Array`]. The declaration matters for the empty path: it
/// resolves to the root only when the statically requested type matches.
#[derive(Debug, Clone, Copy)]
pub enum DocRoot<'a> {
    Value(&'a Value),
    Object(&'a Object),
    Array(&'a Array),
}

impl<'a> From<&'a Value> for DocRoot<'a> {
    fn from(value: &'a Value) -> Self {
        DocRoot::Value(value)
    }
}

impl<'a> From<&'a Object> for DocRoot<'a> {
    fn from(value: &'a Object) -> Self {
        DocRoot::Object(value)
    }
}

impl<'a> From<&'a Array> for DocRoot<'a> {
    fn from(value: &'a Array) -> Self {
        DocRoot::Array(value)
    }
}

/// Borrowed document root for mutable read traversal.
#[derive(Debug)]
pub enum DocRootMut<'a> {
    Value(&'a mut Value),
    Object(&'a mut Object),
    Array(&'a mut Array),
}

impl<'a> From<&'a mut Value> for DocRootMut<'a> {
    fn from(value: &'a mut Value) -> Self {
        DocRootMut::Value(value)
    }
}

impl<'a> From<&'a mut Object> for DocRootMut<'a> {
    fn from(value: &'a mut Object) -> Self {
        DocRootMut::Object(value)
    }
}

impl<'a> From<&'a mut Array> for DocRootMut<'a> {
    fn from(value: &'a mut Array) -> Self {
        DocRootMut::Array(value)
    }
}

/// Addresses one value inside a document.
///
/// An instance owns its path string, an opt-in failure-logging flag, and a
/// scratch buffer for unescaped segment text. The scratch buffer makes the
/// type deliberately `!Sync`; one instance serves one caller at a time.
pub struct JsonPointer {
    path: String,
    log: bool,
    buf: RefCell<String>,
}

impl JsonPointer {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let buf = RefCell::new(String::with_capacity(path.len()));
        Self {
            path,
            log: false,
            buf,
        }
    }

    /// Enables `tracing` debug events for failing erroring operations. The
    /// `find*` variants stay quiet regardless.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log = enabled;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replaces the path, growing the scratch buffer only when the new path
    /// is longer than any seen before.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        let mut buf = self.buf.borrow_mut();
        if buf.capacity() < self.path.len() {
            let needed = self.path.len();
            let have = buf.len();
            buf.reserve(needed - have);
        }
    }

    pub(crate) fn scratch(&self) -> std::cell::RefMut<'_, String> {
        self.buf.borrow_mut()
    }

    fn logged<T>(&self, result: Result<T>) -> Result<T> {
        if self.log {
            if let Err(err) = &result {
                tracing::debug!(path = %self.path, error = %err, "json pointer operation failed");
            }
        }
        result
    }

    /// Resolves the addressed value, reporting the failure.
    pub fn resolve<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<&'a Value> {
        self.logged(self.resolve_in(root.into()))
    }

    /// Resolves the addressed value mutably, reporting the failure.
    pub fn resolve_mut<'a>(&self, root: impl Into<DocRootMut<'a>>) -> Result<&'a mut Value> {
        self.logged(self.resolve_in_mut(root.into()))
    }

    /// Quiet lookup: `None` on any failure, never logs.
    pub fn find<'a>(&self, root: impl Into<DocRoot<'a>>) -> Option<&'a Value> {
        self.resolve_in(root.into()).ok()
    }

    /// Quiet mutable lookup.
    pub fn find_mut<'a>(&self, root: impl Into<DocRootMut<'a>>) -> Option<&'a mut Value> {
        self.resolve_in_mut(root.into()).ok()
    }

    /// Copies the addressed value out of the document.
    pub fn get_value<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<Value> {
        self.logged(self.resolve_in(root.into()).cloned())
    }

    pub fn get_bool<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<bool> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_bool))
    }

    pub fn get_i64<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<i64> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_i64))
    }

    pub fn get_u64<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<u64> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_u64))
    }

    pub fn get_i32<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<i32> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_i32))
    }

    pub fn get_u32<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<u32> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_u32))
    }

    pub fn get_f64<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<f64> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_f64))
    }

    pub fn get_str<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<&'a str> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_str))
    }

    pub fn get_secure<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<&'a SecureString> {
        self.logged(self.resolve_in(root.into()).and_then(Value::get_secure))
    }

    /// Object view of the addressed value. On the empty path the root
    /// itself is returned — but only a root declared as an object (or a
    /// whole value holding one) qualifies.
    pub fn get_object<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<&'a Object> {
        let root = root.into();
        if self.path.is_empty() {
            return self.logged(match root {
                DocRoot::Object(obj) => Ok(obj),
                DocRoot::Value(value) => value.get_object(),
                DocRoot::Array(_) => Err(self.root_kind_mismatch("object", "array")),
            });
        }
        self.logged(self.resolve_in(root).and_then(Value::get_object))
    }

    /// Array view of the addressed value; empty-path rules mirror
    /// [`JsonPointer::get_object`].
    pub fn get_array<'a>(&self, root: impl Into<DocRoot<'a>>) -> Result<&'a Array> {
        let root = root.into();
        if self.path.is_empty() {
            return self.logged(match root {
                DocRoot::Array(arr) => Ok(arr),
                DocRoot::Value(value) => value.get_array(),
                DocRoot::Object(_) => Err(self.root_kind_mismatch("array", "object")),
            });
        }
        self.logged(self.resolve_in(root).and_then(Value::get_array))
    }

    pub fn get_object_mut<'a>(&self, root: impl Into<DocRootMut<'a>>) -> Result<&'a mut Object> {
        let root = root.into();
        if self.path.is_empty() {
            return self.logged(match root {
                DocRootMut::Object(obj) => Ok(obj),
                DocRootMut::Value(value) => value.get_object_mut(),
                DocRootMut::Array(_) => Err(self.root_kind_mismatch("object", "array")),
            });
        }
        self.logged(self.resolve_in_mut(root).and_then(Value::get_object_mut))
    }

    pub fn get_array_mut<'a>(&self, root: impl Into<DocRootMut<'a>>) -> Result<&'a mut Array> {
        let root = root.into();
        if self.path.is_empty() {
            return self.logged(match root {
                DocRootMut::Array(arr) => Ok(arr),
                DocRootMut::Value(value) => value.get_array_mut(),
                DocRootMut::Object(_) => Err(self.root_kind_mismatch("array", "object")),
            });
        }
        self.logged(self.resolve_in_mut(root).and_then(Value::get_array_mut))
    }

    /// Assigns `value` at the addressed location, creating missing
    /// intermediate containers on the way down.
    pub fn set(&self, doc: &mut Value, value: impl Into<Value>) -> Result<()> {
        self.logged(self.assign(doc, value.into()))
    }

    fn root_kind_mismatch(&self, requested: &str, declared: &str) -> Error {
        Error::type_mismatch(format!(
            "json pointer '': requested an {requested} view of the root, \
             but the document root is declared as an {declared}"
        ))
    }
}

impl std::fmt::Debug for JsonPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonPointer")
            .field("path", &self.path)
            .field("log", &self.log)
            .finish()
    }
}
