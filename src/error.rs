//! Error types for cpk

use crate::types::{BaseKind, TypeTag};
use std::borrow::Cow;
use std::io;
use thiserror::Error;

/// Failure to decode a package. Every variant except `Io` carries the byte
/// offset at which the problem was detected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("stream truncated at byte {offset}")]
    TruncatedStream { offset: u64 },

    #[error("unknown type tag 0x{tag:02X} at byte {offset}")]
    UnknownTypeTag { tag: u8, offset: u64 },

    #[error("malformed node at byte {offset}: {reason}")]
    MalformedNode {
        offset: u64,
        reason: Cow<'static, str>,
    },

    #[error("unsupported format version {version} at byte {offset}")]
    UnsupportedFormatVersion { version: u16, offset: u64 },

    #[error("duplicate name {name:?} at byte {offset}")]
    DuplicateName { name: String, offset: u64 },

    #[error("nesting deeper than {limit} levels at byte {offset}")]
    DepthLimitExceeded { limit: usize, offset: u64 },

    #[error("{count} trailing bytes after package at byte {offset}")]
    TrailingData { count: u64, offset: u64 },

    #[error("failed to read package source: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// Byte offset at which the error was detected
    pub fn offset(&self) -> Option<u64> {
        match self {
            DecodeError::TruncatedStream { offset }
            | DecodeError::UnknownTypeTag { offset, .. }
            | DecodeError::MalformedNode { offset, .. }
            | DecodeError::UnsupportedFormatVersion { offset, .. }
            | DecodeError::DuplicateName { offset, .. }
            | DecodeError::DepthLimitExceeded { offset, .. }
            | DecodeError::TrailingData { offset, .. } => Some(*offset),
            DecodeError::Io(_) => None,
        }
    }
}

/// Failure to encode a package
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("name is {len} bytes, longer than the 65535 byte limit")]
    NameTooLong { len: usize },

    #[error("{what} has {len} entries, more than a u32 count allows")]
    TooManyEntries { what: &'static str, len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure to build a tree in memory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("node names must not be empty")]
    EmptyName,

    #[error("duplicate name {0:?}")]
    DuplicateName(String),

    #[error("array item {index} has base kind {actual}, expected {expected}")]
    HeterogeneousItem {
        index: usize,
        expected: BaseKind,
        actual: BaseKind,
    },
}

/// Error for accessing values by path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Path not found in the package
    #[error("path not found: {path}")]
    NotFound { path: String },

    /// Value at path has wrong type
    #[error("type mismatch at '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        actual: TypeTag,
    },
}

/// Failure to parse the display form of a scalar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScalarParseError {
    #[error("Composite has no scalar form")]
    NotScalar,

    #[error("invalid {kind} literal {text:?}")]
    Invalid { kind: BaseKind, text: String },
}

/// Failure to register a renderer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid renderer key {0:?}: use lowercase letters, digits, '-' or '_'")]
    InvalidKey(String),

    #[error("renderer {0:?} is already registered")]
    Duplicate(String),

    #[error("no renderer registered under {0:?}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let err = DecodeError::UnknownTypeTag {
            tag: 0x3F,
            offset: 17,
        };
        assert_eq!(err.offset(), Some(17));
        assert_eq!(err.to_string(), "unknown type tag 0x3F at byte 17");

        let err = DecodeError::from(io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.offset(), None);
    }
}
