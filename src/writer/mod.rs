//! Serialization of CPK packages

mod value;

use crate::error::EncodeError;
use crate::types::{NamedNode, Package, ValueNode};
use std::io::Write;

use value::{compute_size, write_entries};

/// Write a package (header, then the root mapping) to a writer
pub fn write<W: Write>(writer: &mut W, package: &Package) -> Result<(), EncodeError> {
    writer.write_all(&package.format_version().to_le_bytes())?;
    writer.write_all(&package.content_type().to_le_bytes())?;
    writer.write_all(&package.flags().to_le_bytes())?;
    write_entries(writer, package.root())?;
    Ok(())
}

/// Write a package to bytes
pub fn to_bytes(package: &Package) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    write(&mut buf, package)?;
    Ok(buf)
}

/// Encoded size of a tagged value, tag byte included
pub fn encoded_len(value: &ValueNode) -> u64 {
    compute_size(value)
}

/// Encoded size of a named node: name prefix, name, tag and body
pub(crate) fn named_node_len(name: &str, value: &ValueNode) -> u64 {
    2 + name.len() as u64 + compute_size(value)
}

/// Write a single named node, as it appears inside an object
pub fn write_node<W: Write>(writer: &mut W, node: &NamedNode) -> Result<(), EncodeError> {
    value::write_named(writer, node)
}
