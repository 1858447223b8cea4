use std::fmt;

use memchr::memchr3;

use crate::error::Error;
use crate::types::Value;
use crate::Result;

/// Numeric tokens at or beyond this length are rejected outright.
pub const MAX_NUMBER_TOKEN_LEN: usize = 128;

/// Classifies a raw decimal token into the matching [`Value`] variant.
///
/// A token without `.`, `e` or `E` is an integer literal: a leading `-`
/// selects signed 64-bit storage, anything else unsigned. Every other token
/// parses as a floating literal. Malformed digit runs (including overflow)
/// yield the zero value of the selected representation; stricter validation
/// is the tokenizer's responsibility.
pub fn value_from_number_token(token: &str) -> Result<Value> {
    if token.len() >= MAX_NUMBER_TOKEN_LEN {
        return Err(Error::malformed_number(format!(
            "numeric token of {} bytes exceeds the {} byte bound",
            token.len(),
            MAX_NUMBER_TOKEN_LEN
        )));
    }

    if memchr3(b'.', b'e', b'E', token.as_bytes()).is_some() {
        return Ok(Value::Real(token.parse::<f64>().unwrap_or(0.0)));
    }

    if token.starts_with('-') {
        Ok(Value::Int(token.parse::<i64>().unwrap_or(0)))
    } else {
        Ok(Value::UInt(token.parse::<u64>().unwrap_or(0)))
    }
}

pub(crate) fn write_i64<W: fmt::Write>(out: &mut W, value: i64) -> fmt::Result {
    let mut buf = itoa::Buffer::new();
    out.write_str(buf.format(value))
}

pub(crate) fn write_u64<W: fmt::Write>(out: &mut W, value: u64) -> fmt::Result {
    let mut buf = itoa::Buffer::new();
    out.write_str(buf.format(value))
}

pub(crate) fn write_f64<W: fmt::Write>(out: &mut W, value: f64) -> fmt::Result {
    if !value.is_finite() {
        return out.write_str("null");
    }
    let mut buf = ryu::Buffer::new();
    out.write_str(buf.format(value))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::ErrorKind;
    use crate::types::Value;

    use super::{value_from_number_token, MAX_NUMBER_TOKEN_LEN};

    #[rstest]
    #[case("0", Value::UInt(0))]
    #[case("42", Value::UInt(42))]
    #[case("18446744073709551615", Value::UInt(u64::MAX))]
    #[case("-1", Value::Int(-1))]
    #[case("-9223372036854775808", Value::Int(i64::MIN))]
    #[case("1.5", Value::Real(1.5))]
    #[case("-2.25", Value::Real(-2.25))]
    #[case("1e3", Value::Real(1000.0))]
    #[case("2E2", Value::Real(200.0))]
    fn test_classifier_selects_variant(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(value_from_number_token(token).unwrap(), expected);
    }

    #[rstest]
    #[case("12x", Value::UInt(0))]
    #[case("-12x", Value::Int(0))]
    #[case("99999999999999999999999", Value::UInt(0))]
    #[case("1.5.5", Value::Real(0.0))]
    #[case("", Value::UInt(0))]
    fn test_malformed_tokens_become_zero(#[case] token: &str, #[case] expected: Value) {
        assert_eq!(value_from_number_token(token).unwrap(), expected);
    }

    #[rstest]
    fn test_oversized_token_is_rejected() {
        let token = "1".repeat(MAX_NUMBER_TOKEN_LEN);
        let err = value_from_number_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedNumber);

        let token = "1".repeat(MAX_NUMBER_TOKEN_LEN - 1);
        assert!(value_from_number_token(&token).is_ok());
    }
}
