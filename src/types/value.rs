use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::Error;
use crate::num::{write_f64, write_i64, write_u64};
use crate::types::SecureString;
use crate::Result;

/// Object payload, ordered by key.
pub type Object = BTreeMap<String, Value>;

/// Array payload, ordered by insertion.
pub type Array = Vec<Value>;

/// Computed discriminant of a [`Value`].
///
/// Both integer storages report [`ValueType::Int`]; the sign flag is a
/// storage detail, not a type. The declaration order is also the rank used
/// by [`Value::compare`] for cross-type ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueType {
    Object,
    Array,
    String,
    SecureString,
    Bool,
    Int,
    Real,
    Null,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Object => "object",
            ValueType::Array => "array",
            ValueType::String => "string",
            ValueType::SecureString => "secure string",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Real => "real",
            ValueType::Null => "null",
        };
        f.write_str(name)
    }
}

/// A dynamically-typed JSON document node.
///
/// Integers keep their storage sign: `Int` holds a signed 64-bit payload,
/// `UInt` an unsigned one. The numeric accessors convert between the two by
/// bit reinterpretation, so an out-of-domain payload survives a
/// signed/unsigned round trip unchanged.
///
/// The derived `PartialEq` is strict equality: same variant, equal payload.
/// The cross-representation rules (`Int`/`UInt` bit equality, integer zero
/// against real zero, plain against secure strings) live in
/// [`Value::loose_eq`].
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Real(f64),
    String(String),
    Secure(SecureString),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) | Value::UInt(_) => ValueType::Int,
            Value::Real(_) => ValueType::Real,
            Value::String(_) => ValueType::String,
            Value::Secure(_) => ValueType::SecureString,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_) | Value::UInt(_))
    }

    /// Probes the storage sign flag of an integer value.
    pub const fn is_uint(&self) -> bool {
        matches!(self, Value::UInt(_))
    }

    pub const fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub const fn is_secure(&self) -> bool {
        matches!(self, Value::Secure(_))
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::UInt(u) => Some(*u as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            Value::Int(i) => Some(*i as u64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::UInt(u) => Some(*u as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_secure(&self) -> Option<&SecureString> {
        match self {
            Value::Secure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    fn mismatch(&self, want: ValueType) -> Error {
        Error::type_mismatch(format!("value type is {} not {}", self.value_type(), want))
    }

    pub fn get_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| self.mismatch(ValueType::Bool))
    }

    /// Signed view of an integer value. An unsigned payload is
    /// reinterpreted bitwise, never range-checked.
    pub fn get_i64(&self) -> Result<i64> {
        self.as_i64().ok_or_else(|| self.mismatch(ValueType::Int))
    }

    /// Unsigned view of an integer value, bit-reinterpreting signed storage.
    pub fn get_u64(&self) -> Result<u64> {
        self.as_u64().ok_or_else(|| self.mismatch(ValueType::Int))
    }

    pub fn get_i32(&self) -> Result<i32> {
        self.get_i64().map(|i| i as i32)
    }

    pub fn get_u32(&self) -> Result<u32> {
        self.get_u64().map(|u| u as u32)
    }

    /// Floating view: integers of either sign convert numerically.
    pub fn get_f64(&self) -> Result<f64> {
        self.as_f64().ok_or_else(|| self.mismatch(ValueType::Real))
    }

    pub fn get_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch(ValueType::String))
    }

    pub fn get_secure(&self) -> Result<&SecureString> {
        self.as_secure()
            .ok_or_else(|| self.mismatch(ValueType::SecureString))
    }

    pub fn get_array(&self) -> Result<&Array> {
        self.as_array().ok_or_else(|| self.mismatch(ValueType::Array))
    }

    pub fn get_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(arr) => Ok(arr),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    pub fn get_object(&self) -> Result<&Object> {
        self.as_object()
            .ok_or_else(|| self.mismatch(ValueType::Object))
    }

    pub fn get_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Replaces the current content with a fresh empty object.
    pub fn become_object(&mut self) -> &mut Object {
        *self = Value::Object(Object::new());
        match self {
            Value::Object(obj) => obj,
            _ => unreachable!(),
        }
    }

    /// Replaces the current content with a fresh empty array.
    pub fn become_array(&mut self) -> &mut Array {
        *self = Value::Array(Array::new());
        match self {
            Value::Array(arr) => arr,
            _ => unreachable!(),
        }
    }

    /// Replaces the current content with a fresh empty string.
    pub fn become_string(&mut self) -> &mut String {
        *self = Value::String(String::new());
        match self {
            Value::String(s) => s,
            _ => unreachable!(),
        }
    }

    /// Returns the object content, becoming an empty object first when the
    /// current variant is anything else.
    pub fn to_object(&mut self) -> &mut Object {
        if !self.is_object() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(obj) => obj,
            _ => unreachable!(),
        }
    }

    /// Returns the array content, becoming an empty array first when the
    /// current variant is anything else.
    pub fn to_array(&mut self) -> &mut Array {
        if !self.is_array() {
            *self = Value::Array(Array::new());
        }
        match self {
            Value::Array(arr) => arr,
            _ => unreachable!(),
        }
    }

    pub fn take(&mut self) -> Value {
        std::mem::replace(self, Value::Null)
    }

    fn int_bits(&self) -> Option<u64> {
        match self {
            Value::Int(i) => Some(*i as u64),
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Loose comparison, distinct from strict equality.
    ///
    /// Integer values compare by bit pattern regardless of storage sign; an
    /// integer zero equals a real zero (both directions); a plain string
    /// equals a secure string of identical byte content (both directions).
    /// Every other pairing, containers included, falls back to strict
    /// equality.
    pub fn loose_eq(&self, rhs: &Value) -> bool {
        match (self, rhs) {
            (Value::Int(_) | Value::UInt(_), Value::Int(_) | Value::UInt(_)) => {
                self.int_bits() == rhs.int_bits()
            }
            (Value::Int(_) | Value::UInt(_), Value::Real(r)) => {
                self.int_bits() == Some(0) && *r == 0.0
            }
            (Value::Real(r), Value::Int(_) | Value::UInt(_)) => {
                *r == 0.0 && rhs.int_bits() == Some(0)
            }
            (Value::String(s), Value::Secure(t)) => s.as_str() == t.as_str(),
            (Value::Secure(s), Value::String(t)) => s.as_str() == t.as_str(),
            _ => self == rhs,
        }
    }

    /// Total order for sorting heterogeneous values.
    ///
    /// Same-type scalars compare by payload; integers compare through the
    /// truncating 32-bit signed view, reals by partial order with ties and
    /// NaN collapsing to equal. Containers and nulls of the same type tie.
    /// Differing types order by [`ValueType`] rank.
    pub fn compare(&self, rhs: &Value) -> Ordering {
        if self.value_type() != rhs.value_type() {
            return self.value_type().cmp(&rhs.value_type());
        }

        match (self, rhs) {
            (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
            (Value::String(l), Value::String(r)) => l.cmp(r),
            (Value::Secure(l), Value::Secure(r)) => l.cmp(r),
            (Value::Real(l), Value::Real(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
            (l, r) if l.is_int() => {
                let l = l.int_bits().unwrap_or(0) as i32;
                let r = r.int_bits().unwrap_or(0) as i32;
                l.cmp(&r)
            }
            _ => Ordering::Equal,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::UInt(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Real(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<SecureString> for Value {
    fn from(value: SecureString) -> Self {
        Value::Secure(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write_i64(f, *i),
            Value::UInt(u) => write_u64(f, *u),
            Value::Real(r) => write_f64(f, *r),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Secure(s) => write!(f, "\"{s}\""),
            Value::Array(arr) => {
                write!(f, "[")?;
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => {
                write!(f, "{{")?;
                for (i, (k, v)) in obj.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Value::Array(arr) => arr.get(index).unwrap_or_else(|| {
                panic!(
                    "index {index} out of bounds for array of length {}",
                    arr.len()
                )
            }),
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.value_type()
            ),
        }
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self {
            Value::Array(arr) => {
                let len = arr.len();
                arr.get_mut(index).unwrap_or_else(|| {
                    panic!("index {index} out of bounds for array of length {len}")
                })
            }
            _ => panic!(
                "cannot index into non-array value of type {}",
                self.value_type()
            ),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Value::Object(obj) => obj.get(key).unwrap_or_else(|| {
                panic!("key '{key}' not found in object with {} entries", obj.len())
            }),
            _ => panic!(
                "cannot index into non-object value of type {}",
                self.value_type()
            ),
        }
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        match self {
            Value::Object(obj) => {
                let len = obj.len();
                obj.get_mut(key)
                    .unwrap_or_else(|| panic!("key '{key}' not found in object with {len} entries"))
            }
            _ => panic!(
                "cannot index into non-object value of type {}",
                self.value_type()
            ),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::UInt(u) => serializer.serialize_u64(*u),
            Value::Real(r) => serializer.serialize_f64(*r),
            Value::String(s) => serializer.serialize_str(s),
            // Sensitive content is suppressed at the serialization boundary.
            Value::Secure(_) => serializer.serialize_unit(),
            Value::Array(arr) => serializer.collect_seq(arr),
            Value::Object(obj) => serializer.collect_map(obj),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Real(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                let mut mapped = Object::new();
                for (k, v) in obj {
                    mapped.insert(k, Value::from(v));
                }
                Value::Object(mapped)
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::UInt(u) => serde_json::Value::Number(u.into()),
            Value::Real(r) => serde_json::Number::from_f64(r)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            // Sensitive content is suppressed at the serialization boundary.
            Value::Secure(_) => serde_json::Value::Null,
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(Into::into).collect())
            }
            Value::Object(obj) => {
                let mut mapped = serde_json::Map::new();
                for (k, v) in obj {
                    mapped.insert(k, v.into());
                }
                serde_json::Value::Object(mapped)
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}
