use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

const MASK: &str = "******";

/// String payload for sensitive data.
///
/// The backing store is wiped when the value is dropped, and the content
/// never appears in `Debug`/`Display` output. Equality against a plain
/// string variant is handled by [`crate::Value::loose_eq`]; `PartialEq`
/// here compares two secure strings by byte content.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Moves the content out, leaving the wiped remainder behind.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.0)
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString({MASK})")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::SecureString;

    #[rstest::rstest]
    fn test_content_roundtrip() {
        let secret = SecureString::new("hunter2");
        assert_eq!(secret.as_str(), "hunter2");
        assert_eq!(secret.len(), 7);
        assert!(!secret.is_empty());
        assert_eq!(secret.into_string(), "hunter2");
    }

    #[rstest::rstest]
    fn test_debug_and_display_are_masked() {
        let secret = SecureString::new("hunter2");
        assert_eq!(format!("{secret:?}"), "SecureString(******)");
        assert_eq!(format!("{secret}"), "******");
    }

    #[rstest::rstest]
    fn test_equality_is_by_content() {
        assert_eq!(SecureString::new("a"), SecureString::from("a"));
        assert_ne!(SecureString::new("a"), SecureString::new("b"));
    }
}
