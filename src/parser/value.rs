//! Value parsing
//!
//! Containers are decoded with an explicit stack of open frames, so nesting
//! depth costs heap rather than call stack.

use super::DecoderConfig;
use super::entry::parse_entry_name;
use super::primitives::{
    Input, PResult, WireError, WireErrorKind, f64_le, fail, i64_le, malformed, u8_parser,
    u32_le,
};
use super::string::{parse_blob, parse_string};
use crate::types::{BaseKind, NamedNode, NodeMap, Scalar, Structure, TypeTag, ValueNode};
use nom::combinator::map;
use std::mem;

/// Parse and validate a tag byte, leaving the cursor at the body
fn parse_tag<'a>(input: Input<'a>, config: &DecoderConfig, depth: usize) -> PResult<'a, TypeTag> {
    if depth > config.max_depth {
        return Err(fail(input, WireErrorKind::DepthLimit(config.max_depth)));
    }
    let (body, byte) = u8_parser(input)?;
    let tag = TypeTag::from_byte(byte)
        .ok_or_else(|| fail(input, WireErrorKind::UnknownTypeTag(byte)))?;
    if tag.is_scalar() && tag.kind() == BaseKind::Composite {
        return Err(malformed(input, "Composite tag without object or array bit"));
    }
    Ok((body, tag))
}

fn parse_scalar(input: Input<'_>, kind: BaseKind) -> PResult<'_, Scalar> {
    match kind {
        BaseKind::Integer => map(i64_le, Scalar::Integer)(input),
        BaseKind::Float => map(f64_le, Scalar::Float)(input),
        BaseKind::Boolean => {
            let (rest, b) = u8_parser(input)?;
            match b {
                0 => Ok((rest, Scalar::Boolean(false))),
                1 => Ok((rest, Scalar::Boolean(true))),
                _ => Err(malformed(input, format!("invalid boolean byte 0x{:02X}", b))),
            }
        }
        BaseKind::String => map(parse_string, Scalar::String)(input),
        BaseKind::Bytes => map(parse_blob, Scalar::Bytes)(input),
        BaseKind::Composite => Err(malformed(input, "Composite has no scalar payload")),
    }
}

/// Which half of a container body is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Children,
    Items,
}

/// Name of a node and the input at the start of its entry
pub(super) type Slot<'a> = Option<(String, Input<'a>)>;

/// A container whose members are still arriving
pub(super) struct Frame<'a> {
    tag: TypeTag,
    /// Where the finished container goes in its parent
    slot: Slot<'a>,
    /// Nesting level of this container's members
    depth: usize,
    phase: Phase,
    remaining: u32,
    pub(super) children: NodeMap,
    items: Vec<ValueNode>,
}

impl<'a> Frame<'a> {
    /// Start a container body by reading its first count
    pub(super) fn open(
        input: Input<'a>,
        tag: TypeTag,
        slot: Slot<'a>,
        depth: usize,
    ) -> PResult<'a, Self> {
        let (rest, remaining) = u32_le(input)?;
        let phase = if tag.has_flag(Structure::OBJECT) {
            Phase::Children
        } else {
            Phase::Items
        };
        Ok((
            rest,
            Self {
                tag,
                slot,
                depth,
                phase,
                remaining,
                children: NodeMap::new(),
                // Grow as items arrive; the count is untrusted
                items: Vec::new(),
            },
        ))
    }

    /// Store a finished member; `end` is the input just past it
    fn attach(
        &mut self,
        slot: Slot<'a>,
        value: ValueNode,
        end: Input<'a>,
    ) -> Result<(), nom::Err<WireError>> {
        self.remaining -= 1;
        match slot {
            Some((name, start)) => {
                let serialized_length = (start.len() - end.len()) as u64;
                self.children
                    .insert_unique(NamedNode::decoded(name, value, serialized_length))
                    .map_err(|node| {
                        fail(start, WireErrorKind::DuplicateName(node.name().to_string()))
                    })
            }
            None => {
                self.items.push(value);
                Ok(())
            }
        }
    }

    fn close(self) -> (Slot<'a>, ValueNode) {
        let kind = self.tag.kind();
        let value = match (
            self.tag.has_flag(Structure::OBJECT),
            self.tag.has_flag(Structure::ARRAY),
        ) {
            (true, true) => ValueNode::ObjectArray {
                kind,
                children: self.children,
                items: self.items,
            },
            (true, false) => ValueNode::Object {
                kind,
                children: self.children,
            },
            _ => ValueNode::Array {
                kind,
                items: self.items,
            },
        };
        (self.slot, value)
    }
}

/// Read members until `frame` and everything opened beneath it is complete
pub(super) fn run<'a>(
    mut input: Input<'a>,
    config: &DecoderConfig,
    frame: Frame<'a>,
) -> PResult<'a, Frame<'a>> {
    let mut current = frame;
    let mut parents: Vec<Frame<'a>> = Vec::new();
    loop {
        if current.remaining == 0 {
            // Children first, then items
            if current.phase == Phase::Children && current.tag.has_flag(Structure::ARRAY) {
                let (rest, count) = u32_le(input)?;
                input = rest;
                current.phase = Phase::Items;
                current.remaining = count;
                continue;
            }
            let Some(parent) = parents.pop() else {
                return Ok((input, current));
            };
            let (slot, value) = mem::replace(&mut current, parent).close();
            current.attach(slot, value, input)?;
            continue;
        }

        let start = input;
        let slot = match current.phase {
            Phase::Children => {
                let (rest, name) = parse_entry_name(input, &current.children)?;
                input = rest;
                Some((name, start))
            }
            Phase::Items => None,
        };

        let (body, tag) = parse_tag(input, config, current.depth)?;
        if current.phase == Phase::Items && tag.kind() != current.tag.kind() {
            return Err(malformed(
                input,
                format!(
                    "array item of kind {} in {} array",
                    tag.kind(),
                    current.tag.kind()
                ),
            ));
        }

        if tag.is_scalar() {
            let (rest, scalar) = parse_scalar(body, tag.kind())?;
            input = rest;
            current.attach(slot, ValueNode::Scalar(scalar), input)?;
        } else {
            let (rest, child) = Frame::open(body, tag, slot, current.depth + 1)?;
            input = rest;
            parents.push(mem::replace(&mut current, child));
        }
    }
}
