//! Named node parsing

use super::DecoderConfig;
use super::primitives::{Input, PResult, WireErrorKind, fail};
use super::string::parse_name;
use super::value::{Frame, run};
use crate::types::{BaseKind, NodeMap, Structure, TypeTag};

/// Parse a count-prefixed run of named nodes into a map, rejecting
/// duplicate names
pub(crate) fn parse_entries<'a>(
    input: Input<'a>,
    config: &DecoderConfig,
    depth: usize,
) -> PResult<'a, NodeMap> {
    // A mapping reads the same as the body of a Composite|Object node
    let tag = TypeTag::new(BaseKind::Composite, Structure::OBJECT);
    let (rest, frame) = Frame::open(input, tag, None, depth)?;
    let (rest, frame) = run(rest, config, frame)?;
    Ok((rest, frame.children))
}

/// Parse the name of the next entry in `map`. A name already present is
/// reported at the start of the entry.
pub(super) fn parse_entry_name<'a>(input: Input<'a>, map: &NodeMap) -> PResult<'a, String> {
    let (rest, name) = parse_name(input)?;
    if map.contains(&name) {
        return Err(fail(input, WireErrorKind::DuplicateName(name)));
    }
    Ok((rest, name))
}
