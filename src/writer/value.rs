//! Value serialization

use crate::error::EncodeError;
use crate::types::{NamedNode, NodeMap, Scalar, ValueNode};
use std::io::Write;

/// Write a named node: name prefix, tag and body
pub fn write_named<W: Write>(writer: &mut W, node: &NamedNode) -> Result<(), EncodeError> {
    let name = node.name().as_bytes();
    let len = u16::try_from(name.len()).map_err(|_| EncodeError::NameTooLong { len: name.len() })?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(name)?;
    write_value(writer, node.value())
}

/// Write a tagged value
pub fn write_value<W: Write>(writer: &mut W, value: &ValueNode) -> Result<(), EncodeError> {
    writer.write_all(&[value.tag().to_byte()])?;
    match value {
        ValueNode::Scalar(scalar) => write_scalar(writer, scalar)?,
        ValueNode::Object { children, .. } => write_entries(writer, children)?,
        ValueNode::Array { items, .. } => write_items(writer, items)?,
        ValueNode::ObjectArray {
            children, items, ..
        } => {
            write_entries(writer, children)?;
            write_items(writer, items)?;
        }
    }
    Ok(())
}

/// Write a count-prefixed run of named nodes
pub fn write_entries<W: Write>(writer: &mut W, entries: &NodeMap) -> Result<(), EncodeError> {
    writer.write_all(&count(entries.len(), "object")?.to_le_bytes())?;
    for node in entries {
        write_named(writer, node)?;
    }
    Ok(())
}

fn write_items<W: Write>(writer: &mut W, items: &[ValueNode]) -> Result<(), EncodeError> {
    writer.write_all(&count(items.len(), "array")?.to_le_bytes())?;
    for item in items {
        write_value(writer, item)?;
    }
    Ok(())
}

fn write_scalar<W: Write>(writer: &mut W, scalar: &Scalar) -> Result<(), EncodeError> {
    match scalar {
        Scalar::Integer(i) => writer.write_all(&i.to_le_bytes())?,
        Scalar::Float(f) => writer.write_all(&f.to_le_bytes())?,
        Scalar::Boolean(b) => writer.write_all(&[u8::from(*b)])?,
        Scalar::String(s) => {
            writer.write_all(&count(s.len(), "string")?.to_le_bytes())?;
            writer.write_all(s.as_bytes())?;
        }
        Scalar::Bytes(b) => {
            writer.write_all(&count(b.len(), "byte payload")?.to_le_bytes())?;
            writer.write_all(b)?;
        }
    }
    Ok(())
}

fn count(len: usize, what: &'static str) -> Result<u32, EncodeError> {
    u32::try_from(len).map_err(|_| EncodeError::TooManyEntries { what, len })
}

/// Bytes a tagged value occupies on the wire, tag included
pub fn compute_size(value: &ValueNode) -> u64 {
    let body = match value {
        ValueNode::Scalar(scalar) => scalar_size(scalar),
        ValueNode::Object { children, .. } => entries_size(children),
        ValueNode::Array { items, .. } => items_size(items),
        ValueNode::ObjectArray {
            children, items, ..
        } => entries_size(children) + items_size(items),
    };
    1 + body
}

fn scalar_size(scalar: &Scalar) -> u64 {
    match scalar {
        Scalar::Integer(_) | Scalar::Float(_) => 8,
        Scalar::Boolean(_) => 1,
        Scalar::String(s) => 4 + s.len() as u64,
        Scalar::Bytes(b) => 4 + b.len() as u64,
    }
}

fn entries_size(entries: &NodeMap) -> u64 {
    4 + entries
        .iter()
        .map(NamedNode::serialized_length)
        .sum::<u64>()
}

fn items_size(items: &[ValueNode]) -> u64 {
    4 + items.iter().map(compute_size).sum::<u64>()
}
