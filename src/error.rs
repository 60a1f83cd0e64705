//! Errors that can arise while reading or writing a tag

use crate::field_mapping::Field;

use std::fmt::{Display, Formatter};

/// Alias for `Result<T, TagError>`
pub type Result<T> = std::result::Result<T, TagError>;

/// The ways a tag operation can fail
#[derive(Debug)]
pub enum TagError {
    /// Open, seek, read, write or truncate failed on the byte store
    Io(std::io::Error),
    /// No `TAG` marker in the last 128 bytes (or the store is shorter than a tag)
    NotFound,
    /// A value does not fit in its slot
    FieldTooLong {
        field: Field,
        len: usize,
        max: usize,
    },
    /// A value contains a character with no single-byte representation
    Unencodable { field: Field },
}

impl Display for TagError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TagError::Io(e) => write!(f, "I/O error: {}", e),
            TagError::NotFound => write!(f, "No ID3v1 tag found"),
            TagError::FieldTooLong { field, len, max } => write!(
                f,
                "Field `{}` is {} bytes long, the slot holds at most {}",
                field, len, max
            ),
            TagError::Unencodable { field } => write!(
                f,
                "Field `{}` contains characters that cannot be stored as Latin-1",
                field
            ),
        }
    }
}

impl std::error::Error for TagError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TagError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TagError {
    fn from(e: std::io::Error) -> Self {
        TagError::Io(e)
    }
}
