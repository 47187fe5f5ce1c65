//! Value nodes, named nodes and ordered node maps

use super::{BaseKind, Scalar, Structure, TypeTag};
use crate::error::BuildError;
use crate::writer::named_node_len;
use indexmap::IndexMap;
use std::mem;
use std::ops::Index;

/// Recursive payload of a node.
///
/// The wire tag's structure bits select the variant; the flags themselves only
/// exist at the encoding boundary (see [`ValueNode::tag`]).
///
/// Dropping a tree and counting its nodes use a heap stack. `Clone`,
/// `PartialEq`, `Debug` and encoding recurse once per level.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Leaf value, no structure bit set
    Scalar(Scalar),
    /// Keyed mapping of named children (`OBJECT`)
    Object { kind: BaseKind, children: NodeMap },
    /// Ordered sequence of items sharing `kind` (`ARRAY`)
    Array { kind: BaseKind, items: Vec<ValueNode> },
    /// Keyed mapping plus an item sequence (`OBJECT | ARRAY`)
    ObjectArray {
        kind: BaseKind,
        children: NodeMap,
        items: Vec<ValueNode>,
    },
}

impl ValueNode {
    pub fn integer(v: i64) -> Self {
        ValueNode::Scalar(Scalar::Integer(v))
    }

    pub fn float(v: f64) -> Self {
        ValueNode::Scalar(Scalar::Float(v))
    }

    pub fn boolean(v: bool) -> Self {
        ValueNode::Scalar(Scalar::Boolean(v))
    }

    pub fn string(v: impl Into<String>) -> Self {
        ValueNode::Scalar(Scalar::String(v.into()))
    }

    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        ValueNode::Scalar(Scalar::Bytes(v.into()))
    }

    /// A plain object, tagged `Composite|Object`
    pub fn object(children: NodeMap) -> Self {
        ValueNode::Object {
            kind: BaseKind::Composite,
            children,
        }
    }

    /// A homogeneous array; every item must have base kind `kind`
    pub fn array(kind: BaseKind, items: Vec<ValueNode>) -> Result<Self, BuildError> {
        check_items(kind, &items)?;
        Ok(ValueNode::Array { kind, items })
    }

    /// An object that additionally carries a homogeneous item sequence
    pub fn object_array(
        kind: BaseKind,
        children: NodeMap,
        items: Vec<ValueNode>,
    ) -> Result<Self, BuildError> {
        check_items(kind, &items)?;
        Ok(ValueNode::ObjectArray {
            kind,
            children,
            items,
        })
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            ValueNode::Scalar(s) => TypeTag::scalar(s.kind()),
            ValueNode::Object { kind, .. } => TypeTag::new(*kind, Structure::OBJECT),
            ValueNode::Array { kind, .. } => TypeTag::new(*kind, Structure::ARRAY),
            ValueNode::ObjectArray { kind, .. } => {
                TypeTag::new(*kind, Structure::OBJECT | Structure::ARRAY)
            }
        }
    }

    pub fn base_kind(&self) -> BaseKind {
        self.tag().kind()
    }

    pub fn has_flag(&self, flag: Structure) -> bool {
        self.tag().has_flag(flag)
    }

    pub fn scalar(&self) -> Option<&Scalar> {
        match self {
            ValueNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<&NodeMap> {
        match self {
            ValueNode::Object { children, .. } | ValueNode::ObjectArray { children, .. } => {
                Some(children)
            }
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&[ValueNode]> {
        match self {
            ValueNode::Array { items, .. } | ValueNode::ObjectArray { items, .. } => Some(items),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ValueNode::Scalar(Scalar::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ValueNode::Scalar(Scalar::Float(f)) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ValueNode::Scalar(Scalar::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ValueNode::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Try to get as raw bytes
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ValueNode::Scalar(Scalar::Bytes(b)) => Some(b),
            _ => None,
        }
    }

    /// Child by name, or item by decimal index. Children win on `ObjectArray`.
    pub fn child(&self, key: &str) -> Option<&ValueNode> {
        if let Some(node) = self.children().and_then(|c| c.get(key)) {
            return Some(&node.value);
        }
        let index: usize = key.parse().ok()?;
        self.items()?.get(index)
    }

    /// Number of value nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            if let Some(children) = node.children() {
                pending.extend(children.iter().map(NamedNode::value));
            }
            if let Some(items) = node.items() {
                pending.extend(items);
            }
        }
        count
    }

    /// Move this node's direct descendants into `out`, leaving it empty
    fn detach_into(&mut self, out: &mut Vec<ValueNode>) {
        if let ValueNode::Object { children, .. } | ValueNode::ObjectArray { children, .. } = self
        {
            out.extend(mem::take(&mut children.0).into_values().map(|node| node.value));
        }
        if let ValueNode::Array { items, .. } | ValueNode::ObjectArray { items, .. } = self {
            out.append(items);
        }
    }
}

impl Drop for ValueNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_into(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_into(&mut pending);
        }
    }
}

fn check_items(kind: BaseKind, items: &[ValueNode]) -> Result<(), BuildError> {
    for (index, item) in items.iter().enumerate() {
        if item.base_kind() != kind {
            return Err(BuildError::HeterogeneousItem {
                index,
                expected: kind,
                actual: item.base_kind(),
            });
        }
    }
    Ok(())
}

impl From<Scalar> for ValueNode {
    fn from(v: Scalar) -> Self {
        ValueNode::Scalar(v)
    }
}

impl From<i64> for ValueNode {
    fn from(v: i64) -> Self {
        ValueNode::integer(v)
    }
}

impl From<f64> for ValueNode {
    fn from(v: f64) -> Self {
        ValueNode::float(v)
    }
}

impl From<bool> for ValueNode {
    fn from(v: bool) -> Self {
        ValueNode::boolean(v)
    }
}

impl From<String> for ValueNode {
    fn from(v: String) -> Self {
        ValueNode::string(v)
    }
}

impl From<&str> for ValueNode {
    fn from(v: &str) -> Self {
        ValueNode::string(v)
    }
}

/// A value stored under a name, with the exact number of bytes it occupies
/// on the wire (name, tag and the whole subtree).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedNode {
    name: String,
    value: ValueNode,
    serialized_length: u64,
}

impl NamedNode {
    /// Build a node in memory; its serialized length is computed from the
    /// wire layout.
    pub fn new(name: impl Into<String>, value: ValueNode) -> Result<Self, BuildError> {
        let name = name.into();
        if name.is_empty() {
            return Err(BuildError::EmptyName);
        }
        let serialized_length = named_node_len(&name, &value);
        Ok(Self {
            name,
            value,
            serialized_length,
        })
    }

    pub(crate) fn decoded(name: String, value: ValueNode, serialized_length: u64) -> Self {
        Self {
            name,
            value,
            serialized_length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ValueNode {
        &self.value
    }

    pub fn serialized_length(&self) -> u64 {
        self.serialized_length
    }
}

/// Insertion-ordered mapping from name to [`NamedNode`] with unique names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeMap(IndexMap<String, NamedNode>);

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs, keeping their order
    pub fn try_from_entries<I, K>(entries: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (K, ValueNode)>,
        K: Into<String>,
    {
        let mut map = NodeMap::new();
        for (name, value) in entries {
            let node = NamedNode::new(name, value)?;
            map.insert_unique(node)
                .map_err(|node| BuildError::DuplicateName(node.name))?;
        }
        Ok(map)
    }

    /// Insert a node, handing it back if its name is already taken
    pub(crate) fn insert_unique(&mut self, node: NamedNode) -> Result<(), NamedNode> {
        if self.0.contains_key(&node.name) {
            return Err(node);
        }
        self.0.insert(node.name.clone(), node);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedNode> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, NamedNode> {
        self.0.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Index<&str> for NodeMap {
    type Output = NamedNode;

    fn index(&self, name: &str) -> &NamedNode {
        &self.0[name]
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = &'a NamedNode;
    type IntoIter = indexmap::map::Values<'a, String, NamedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}
