//! Scalar payloads and their textual rendering

use super::BaseKind;
use crate::error::ScalarParseError;
use std::fmt;

/// Decoded scalar payload of a leaf node.
///
/// Floats compare by bit pattern, matching what the wire stores: `NaN`
/// equals a `NaN` with the same payload, and `0.0` differs from `-0.0`.
#[derive(Debug, Clone)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Bytes(Vec<u8>),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a == b,
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Bytes(a), Scalar::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl Scalar {
    pub fn kind(&self) -> BaseKind {
        match self {
            Scalar::Integer(_) => BaseKind::Integer,
            Scalar::Float(_) => BaseKind::Float,
            Scalar::Boolean(_) => BaseKind::Boolean,
            Scalar::String(_) => BaseKind::String,
            Scalar::Bytes(_) => BaseKind::Bytes,
        }
    }

    /// Parse the text produced by [`format_scalar`] back into a scalar of `kind`
    pub fn parse(kind: BaseKind, text: &str) -> Result<Self, ScalarParseError> {
        let invalid = || ScalarParseError::Invalid {
            kind,
            text: text.to_string(),
        };
        match kind {
            BaseKind::Composite => Err(ScalarParseError::NotScalar),
            BaseKind::Integer => text.parse().map(Scalar::Integer).map_err(|_| invalid()),
            BaseKind::Float => text.parse().map(Scalar::Float).map_err(|_| invalid()),
            BaseKind::Boolean => match text {
                "true" => Ok(Scalar::Boolean(true)),
                "false" => Ok(Scalar::Boolean(false)),
                _ => Err(invalid()),
            },
            BaseKind::String => Ok(Scalar::String(text.to_string())),
            BaseKind::Bytes => hex::decode(text).map(Scalar::Bytes).map_err(|_| invalid()),
        }
    }
}

/// Render a scalar for display. Total over every scalar value.
pub fn format_scalar(scalar: &Scalar) -> String {
    scalar.to_string()
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fraction ("1.0") and round-trips through `parse`
            Scalar::Float(v) => write!(f, "{:?}", v),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::String(s) => f.write_str(s),
            Scalar::Bytes(b) => f.write_str(&hex::encode(b)),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<Vec<u8>> for Scalar {
    fn from(v: Vec<u8>) -> Self {
        Scalar::Bytes(v)
    }
}
