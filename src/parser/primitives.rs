//! Wire error plumbing and primitive binary parsers

use crate::error::DecodeError;
use nom::IResult;
use nom::bytes::complete::take;
use nom::error::{ErrorKind, ParseError};
use nom::number::complete::{le_f64, le_i64, le_u8, le_u16, le_u32};
use std::borrow::Cow;

pub(crate) type Input<'a> = &'a [u8];
pub(crate) type PResult<'a, T> = IResult<Input<'a>, T, WireError>;

/// What went wrong, without the position
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WireErrorKind {
    Truncated,
    UnknownTypeTag(u8),
    Malformed(Cow<'static, str>),
    UnsupportedVersion(u16),
    DuplicateName(String),
    DepthLimit(usize),
}

/// nom error type. Parsers only see suffixes of the package buffer, so the
/// remaining length pins down the absolute offset once the total is known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireError {
    remaining: usize,
    kind: WireErrorKind,
}

impl WireError {
    pub(crate) fn at(input: Input<'_>, kind: WireErrorKind) -> Self {
        Self {
            remaining: input.len(),
            kind,
        }
    }

    pub(crate) fn into_decode_error(self, total: usize) -> DecodeError {
        let offset = total.saturating_sub(self.remaining) as u64;
        match self.kind {
            WireErrorKind::Truncated => DecodeError::TruncatedStream { offset },
            WireErrorKind::UnknownTypeTag(tag) => DecodeError::UnknownTypeTag { tag, offset },
            WireErrorKind::Malformed(reason) => DecodeError::MalformedNode { offset, reason },
            WireErrorKind::UnsupportedVersion(version) => {
                DecodeError::UnsupportedFormatVersion { version, offset }
            }
            WireErrorKind::DuplicateName(name) => DecodeError::DuplicateName { name, offset },
            WireErrorKind::DepthLimit(limit) => DecodeError::DepthLimitExceeded { limit, offset },
        }
    }
}

impl<'a> ParseError<Input<'a>> for WireError {
    // The complete-mode number and take parsers only fail on short input
    fn from_error_kind(input: Input<'a>, _kind: ErrorKind) -> Self {
        WireError::at(input, WireErrorKind::Truncated)
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

/// Hard failure at `input`; no backtracking past semantic errors
pub(crate) fn fail(input: Input<'_>, kind: WireErrorKind) -> nom::Err<WireError> {
    nom::Err::Failure(WireError::at(input, kind))
}

pub(crate) fn malformed(
    input: Input<'_>,
    reason: impl Into<Cow<'static, str>>,
) -> nom::Err<WireError> {
    fail(input, WireErrorKind::Malformed(reason.into()))
}

/// Parse a u8
pub(crate) fn u8_parser(input: Input<'_>) -> PResult<'_, u8> {
    le_u8(input)
}

/// Parse a u16 (little-endian)
pub(crate) fn u16_le(input: Input<'_>) -> PResult<'_, u16> {
    le_u16(input)
}

/// Parse a u32 (little-endian)
pub(crate) fn u32_le(input: Input<'_>) -> PResult<'_, u32> {
    le_u32(input)
}

/// Parse an i64 (little-endian)
pub(crate) fn i64_le(input: Input<'_>) -> PResult<'_, i64> {
    le_i64(input)
}

/// Parse an f64 (little-endian)
pub(crate) fn f64_le(input: Input<'_>) -> PResult<'_, f64> {
    le_f64(input)
}

/// Take exactly `count` bytes as a slice of the input
pub(crate) fn take_bytes(input: Input<'_>, count: usize) -> PResult<'_, Input<'_>> {
    take(count)(input)
}

/// Flatten a nom error into a [`DecodeError`] for a buffer of `total` bytes
pub(crate) fn to_decode_error(err: nom::Err<WireError>, total: usize) -> DecodeError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.into_decode_error(total),
        // Only streaming parsers report Incomplete
        nom::Err::Incomplete(_) => DecodeError::TruncatedStream {
            offset: total as u64,
        },
    }
}
