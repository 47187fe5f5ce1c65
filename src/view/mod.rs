//! Tree traversal and plain-text renderers

mod registry;
mod render;

pub use registry::{RendererFactory, RendererRegistry};
pub use render::{PathsRenderer, TreeRenderer};

use crate::types::{NamedNode, Package, PathSegment, ValueNode};
use crate::writer::encoded_len;
use std::borrow::Cow;
use std::fmt;

/// Turns a package into text
pub trait Renderer {
    fn render(&self, package: &Package, out: &mut dyn fmt::Write) -> fmt::Result;
}

/// How a node is reached from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a> {
    Name(&'a str),
    Index(usize),
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Name(name) => f.write_str(name),
            Label::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl<'a> From<Label<'a>> for PathSegment<'a> {
    fn from(label: Label<'a>) -> Self {
        match label {
            Label::Name(name) => PathSegment::Name(Cow::Borrowed(name)),
            Label::Index(index) => PathSegment::Index(index),
        }
    }
}

/// A node visited by [`walk`]
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Nesting level; root entries are at 1
    pub depth: usize,
    pub label: Label<'a>,
    pub value: &'a ValueNode,
    /// Bytes on the wire. Named nodes count their name prefix, items start
    /// at the tag.
    pub serialized_length: u64,
}

/// Pre-order traversal of a package: each node, then its children in order,
/// then its items.
///
/// The entries are collected up front with an explicit stack, so depth is
/// only bounded by memory. Item sizes are summed bottom-up in the same pass.
pub fn walk(package: &Package) -> Walk<'_> {
    let mut entries: Vec<Entry<'_>> = Vec::new();
    let mut parents: Vec<Option<usize>> = Vec::new();

    let mut stack: Vec<(Option<usize>, Entry<'_>)> = Vec::new();
    for node in package.root().iter().rev() {
        stack.push((None, named_entry(1, node)));
    }
    while let Some((parent, entry)) = stack.pop() {
        let index = entries.len();
        let depth = entry.depth + 1;
        // Pushed in reverse so they pop in order: children before items
        if let Some(items) = entry.value.items() {
            for (position, item) in items.iter().enumerate().rev() {
                let item = Entry {
                    depth,
                    label: Label::Index(position),
                    value: item,
                    serialized_length: 0,
                };
                stack.push((Some(index), item));
            }
        }
        if let Some(children) = entry.value.children() {
            for node in children.iter().rev() {
                stack.push((Some(index), named_entry(depth, node)));
            }
        }
        entries.push(entry);
        parents.push(parent);
    }

    // Descendants come after their parent, so walking backwards finishes
    // every subtree before the node that holds it
    let mut sizes: Vec<u64> = entries.iter().map(|e| fixed_len(e.value)).collect();
    for index in (0..entries.len()).rev() {
        let entry = &mut entries[index];
        if let Label::Index(_) = entry.label {
            entry.serialized_length = sizes[index];
        }
        if let Some(parent) = parents[index] {
            sizes[parent] += entry.serialized_length;
        }
    }

    Walk {
        entries: entries.into_iter(),
    }
}

fn named_entry(depth: usize, node: &NamedNode) -> Entry<'_> {
    Entry {
        depth,
        label: Label::Name(node.name()),
        value: node.value(),
        serialized_length: node.serialized_length(),
    }
}

/// Tag plus the part of the body that is not a descendant
fn fixed_len(value: &ValueNode) -> u64 {
    match value {
        ValueNode::Scalar(_) => encoded_len(value),
        ValueNode::Object { .. } | ValueNode::Array { .. } => 1 + 4,
        ValueNode::ObjectArray { .. } => 1 + 4 + 4,
    }
}

/// Iterator returned by [`walk`]
#[derive(Debug)]
pub struct Walk<'a> {
    entries: std::vec::IntoIter<Entry<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Entry<'a>> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Walk<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BaseKind, NodeMap};

    fn sample() -> Package {
        let inner = ValueNode::object(
            NodeMap::try_from_entries([("x", ValueNode::integer(1))]).unwrap(),
        );
        let both = ValueNode::object_array(
            BaseKind::Integer,
            NodeMap::try_from_entries([("len", ValueNode::integer(2))]).unwrap(),
            vec![ValueNode::integer(10), ValueNode::integer(20)],
        )
        .unwrap();
        let root = NodeMap::try_from_entries([
            ("a", inner),
            ("b", both),
            ("c", ValueNode::boolean(false)),
        ])
        .unwrap();
        Package::new(0, 0, root)
    }

    #[test]
    fn test_walk_preorder() {
        let package = sample();
        let visited: Vec<(usize, String)> = walk(&package)
            .map(|e| (e.depth, e.label.to_string()))
            .collect();
        let expected = [
            (1, "a"),
            (2, "x"),
            (1, "b"),
            (2, "len"),
            (2, "[0]"),
            (2, "[1]"),
            (1, "c"),
        ];
        let expected: Vec<(usize, String)> =
            expected.iter().map(|(d, l)| (*d, l.to_string())).collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_walk_sizes() {
        let package = sample();
        let entries: Vec<Entry<'_>> = walk(&package).collect();
        // Root entries report their named length
        assert_eq!(entries[0].serialized_length, package.root()["a"].serialized_length());
        // Items report tag + body
        assert_eq!(entries[4].label, Label::Index(0));
        assert_eq!(entries[4].serialized_length, 9);
    }

    #[test]
    fn test_item_sizes_match_encoding() {
        let point = |x: i64| {
            ValueNode::object(NodeMap::try_from_entries([("x", ValueNode::integer(x))]).unwrap())
        };
        let row = |n: i64| ValueNode::array(BaseKind::Composite, vec![point(n); 3]).unwrap();
        let grid = ValueNode::array(BaseKind::Composite, vec![row(1), row(2)]).unwrap();
        let root = NodeMap::try_from_entries([("grid", grid)]).unwrap();
        let package = Package::new(0, 0, root);

        let mut items = 0;
        for entry in walk(&package) {
            if let Label::Index(_) = entry.label {
                assert_eq!(entry.serialized_length, encoded_len(entry.value));
                items += 1;
            }
        }
        assert_eq!(items, 8);
    }

    #[test]
    fn test_walk_deep_item_chain() {
        // Decoding builds the chain without recursing
        let levels = 50_000;
        let mut bytes = crate::writer::to_bytes(&Package::new(0, 0, NodeMap::new())).unwrap();
        bytes[8..12].copy_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.push(b'n');
        for level in 0..levels {
            bytes.push(0x81);
            let count: u32 = if level + 1 < levels { 1 } else { 0 };
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        let config = crate::DecoderConfig::default().with_max_depth(levels);
        let package = crate::Decoder::new(config).decode(&bytes).unwrap();

        let entries: Vec<Entry<'_>> = walk(&package).collect();
        assert_eq!(entries.len(), levels);
        assert_eq!(entries[0].serialized_length, 3 + 5 * levels as u64);
        for entry in &entries[1..] {
            let below = (levels - entry.depth + 1) as u64;
            assert_eq!(entry.serialized_length, 5 * below);
        }
    }

    #[test]
    fn test_walk_empty() {
        let package = Package::new(0, 0, NodeMap::new());
        assert_eq!(walk(&package).count(), 0);
    }

    #[test]
    fn test_walk_counts_every_node() {
        let package = sample();
        assert_eq!(walk(&package).count(), package.summary().total_nodes);
    }
}
