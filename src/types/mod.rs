mod secure;
mod value;

pub use secure::SecureString;
pub use value::{Array, Object, Value, ValueType};
