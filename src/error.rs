use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    NotFound,
    IndexOutOfRange,
    IndexOverflow,
    MalformedPath,
    MalformedStructure,
    MalformedNumber,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::NotFound => "not found",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::IndexOverflow => "index overflow",
            ErrorKind::MalformedPath => "malformed path",
            ErrorKind::MalformedStructure => "malformed structure",
            ErrorKind::MalformedNumber => "malformed number",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TypeMismatch,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn index_out_of_range(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::IndexOutOfRange,
            message: message.into(),
        }
    }

    pub fn index_overflow(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::IndexOverflow,
            message: message.into(),
        }
    }

    pub fn malformed_path(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedPath,
            message: message.into(),
        }
    }

    pub fn malformed_structure(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedStructure,
            message: message.into(),
        }
    }

    pub fn malformed_number(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedNumber,
            message: message.into(),
        }
    }
}
