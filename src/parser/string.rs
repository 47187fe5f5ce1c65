//! Length-prefixed string and byte parsers

use super::primitives::{Input, PResult, malformed, take_bytes, u16_le, u32_le};

/// Parse a u16 length-prefixed, non-empty UTF-8 node name
pub(crate) fn parse_name(input: Input<'_>) -> PResult<'_, String> {
    let start = input;
    let (input, len) = u16_le(input)?;
    if len == 0 {
        return Err(malformed(start, "empty node name"));
    }
    let (rest, bytes) = take_bytes(input, len as usize)?;
    let name = std::str::from_utf8(bytes)
        .map_err(|_| malformed(input, "invalid UTF-8 in node name"))?;
    Ok((rest, name.to_string()))
}

/// Parse a u32 length-prefixed UTF-8 string (for values)
pub(crate) fn parse_string(input: Input<'_>) -> PResult<'_, String> {
    let (input, len) = u32_le(input)?;
    let (rest, bytes) = take_bytes(input, len as usize)?;
    let s =
        std::str::from_utf8(bytes).map_err(|_| malformed(input, "invalid UTF-8 in string"))?;
    Ok((rest, s.to_string()))
}

/// Parse a u32 length-prefixed raw byte payload
pub(crate) fn parse_blob(input: Input<'_>) -> PResult<'_, Vec<u8>> {
    let (input, len) = u32_le(input)?;
    let (rest, bytes) = take_bytes(input, len as usize)?;
    Ok((rest, bytes.to_vec()))
}
