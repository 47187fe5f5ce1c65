//! Package header and root mapping

use super::path::{PathSegment, parse_path};
use super::{NodeMap, TypeTag, ValueNode};
use crate::error::AccessError;
use std::fmt;
use std::ops::RangeInclusive;

/// Current format version, written by the encoder
pub const FORMAT_VERSION: u16 = 1;

/// Format versions the decoder understands
pub const SUPPORTED_VERSIONS: RangeInclusive<u16> = 1..=1;

/// Header size in bytes (version + content type + flags)
pub const HEADER_SIZE: usize = 8;

/// A decoded (or built) package: header fields plus the root mapping.
///
/// There is no mutating API; a package is shared read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    format_version: u16,
    content_type: u16,
    flags: u32,
    root: NodeMap,
}

impl Package {
    pub fn new(content_type: u16, flags: u32, root: NodeMap) -> Self {
        Self::with_version(FORMAT_VERSION, content_type, flags, root)
    }

    pub(crate) fn with_version(
        format_version: u16,
        content_type: u16,
        flags: u32,
        root: NodeMap,
    ) -> Self {
        Self {
            format_version,
            content_type,
            flags,
            root,
        }
    }

    pub fn format_version(&self) -> u16 {
        self.format_version
    }

    pub fn content_type(&self) -> u16 {
        self.content_type
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn root(&self) -> &NodeMap {
        &self.root
    }

    /// Get a value by slash-separated path (e.g. "model/layers/[0]").
    ///
    /// `[n]` selects an array item; other segments are child names, escaped
    /// as described in [`crate::types::path`]. A bare decimal segment falls
    /// back to an item index when no child has that name.
    pub fn get(&self, path: &str) -> Option<&ValueNode> {
        let segments = parse_path(path)?;
        let mut segments = segments.iter();
        let mut current = match segments.next()? {
            PathSegment::Name(name) => self.root.get(name)?.value(),
            PathSegment::Index(_) => return None,
        };
        for segment in segments {
            current = match segment {
                PathSegment::Name(name) => current.child(name)?,
                PathSegment::Index(index) => current.items()?.get(*index)?,
            };
        }
        Some(current)
    }

    fn require(&self, path: &str) -> Result<&ValueNode, AccessError> {
        self.get(path).ok_or_else(|| AccessError::NotFound {
            path: path.to_string(),
        })
    }

    fn mismatch(path: &str, expected: &'static str, actual: TypeTag) -> AccessError {
        AccessError::TypeMismatch {
            path: path.to_string(),
            expected,
            actual,
        }
    }

    pub fn integer_at(&self, path: &str) -> Result<i64, AccessError> {
        let node = self.require(path)?;
        node.as_integer()
            .ok_or_else(|| Self::mismatch(path, "Integer", node.tag()))
    }

    pub fn float_at(&self, path: &str) -> Result<f64, AccessError> {
        let node = self.require(path)?;
        node.as_float()
            .ok_or_else(|| Self::mismatch(path, "Float", node.tag()))
    }

    pub fn bool_at(&self, path: &str) -> Result<bool, AccessError> {
        let node = self.require(path)?;
        node.as_bool()
            .ok_or_else(|| Self::mismatch(path, "Boolean", node.tag()))
    }

    pub fn str_at(&self, path: &str) -> Result<&str, AccessError> {
        let node = self.require(path)?;
        node.as_str()
            .ok_or_else(|| Self::mismatch(path, "String", node.tag()))
    }

    pub fn summary(&self) -> Summary {
        Summary {
            format_version: self.format_version,
            content_type: self.content_type,
            flags: self.flags,
            root_entries: self.root.len(),
            total_nodes: self.root.iter().map(|n| n.value().node_count()).sum(),
            serialized_bytes: self.root.iter().map(|n| n.serialized_length()).sum(),
        }
    }
}

/// One-line description of a package, for headers and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub format_version: u16,
    pub content_type: u16,
    pub flags: u32,
    pub root_entries: usize,
    pub total_nodes: usize,
    /// Sum of the root entries' serialized lengths (excludes the header)
    pub serialized_bytes: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPK v{}, content type {}, flags 0x{:08X}, {} entries, {} nodes, {} bytes",
            self.format_version,
            self.content_type,
            self.flags,
            self.root_entries,
            self.total_nodes,
            self.serialized_bytes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseKind;

    fn sample() -> Package {
        let tags = ValueNode::array(
            BaseKind::String,
            vec![ValueNode::string("a"), ValueNode::string("b")],
        )
        .unwrap();
        let root = NodeMap::try_from_entries([
            ("count", ValueNode::integer(42)),
            ("tags", tags),
            (
                "model",
                ValueNode::object(
                    NodeMap::try_from_entries([
                        ("name", ValueNode::string("bert")),
                        ("ratio", ValueNode::float(0.5)),
                        ("enabled", ValueNode::boolean(true)),
                    ])
                    .unwrap(),
                ),
            ),
        ])
        .unwrap();
        Package::new(0, 0, root)
    }

    #[test]
    fn test_path_access() {
        let package = sample();
        assert_eq!(package.get("count").unwrap().as_integer(), Some(42));
        assert_eq!(package.get("tags/1").unwrap().as_str(), Some("b"));
        assert_eq!(package.get("model/name").unwrap().as_str(), Some("bert"));
        assert!(package.get("tags/2").is_none());
        assert!(package.get("model/missing").is_none());
        assert!(package.get("").is_none());
    }

    #[test]
    fn test_index_segments() {
        let package = sample();
        assert_eq!(package.get("tags/[1]").unwrap().as_str(), Some("b"));
        assert!(package.get("tags/[2]").is_none());
        assert!(package.get("model/[0]").is_none());
        assert!(package.get("[0]").is_none());
    }

    #[test]
    fn test_names_that_look_like_paths() {
        let children = NodeMap::try_from_entries([("0", ValueNode::integer(100))]).unwrap();
        let mixed =
            ValueNode::object_array(BaseKind::Integer, children, vec![ValueNode::integer(5)])
                .unwrap();
        let root = NodeMap::try_from_entries([
            ("a/b", ValueNode::integer(1)),
            (
                "a",
                ValueNode::object(
                    NodeMap::try_from_entries([("b", ValueNode::integer(2))]).unwrap(),
                ),
            ),
            ("[0]", ValueNode::integer(3)),
            ("x", mixed),
        ])
        .unwrap();
        let package = Package::new(0, 0, root);

        assert_eq!(package.integer_at(r"a\/b"), Ok(1));
        assert_eq!(package.integer_at("a/b"), Ok(2));
        assert_eq!(package.integer_at(r"\[0]"), Ok(3));
        assert_eq!(package.integer_at("x/0"), Ok(100));
        assert_eq!(package.integer_at("x/[0]"), Ok(5));
        assert!(package.get(r"a\").is_none());
    }

    #[test]
    fn test_typed_access() {
        let package = sample();
        assert_eq!(package.integer_at("count"), Ok(42));
        assert_eq!(package.float_at("model/ratio"), Ok(0.5));
        assert_eq!(package.bool_at("model/enabled"), Ok(true));
        assert_eq!(package.str_at("tags/0"), Ok("a"));
    }

    #[test]
    fn test_typed_access_errors() {
        let package = sample();
        assert_eq!(
            package.integer_at("nope"),
            Err(AccessError::NotFound {
                path: "nope".into()
            })
        );
        assert_eq!(
            package.str_at("count"),
            Err(AccessError::TypeMismatch {
                path: "count".into(),
                expected: "String",
                actual: TypeTag::scalar(BaseKind::Integer),
            })
        );
    }

    #[test]
    fn test_summary() {
        let package = sample();
        let summary = package.summary();
        assert_eq!(summary.format_version, 1);
        assert_eq!(summary.content_type, 0);
        assert_eq!(summary.root_entries, 3);
        // count, tags + 2 items, model + 3 children
        assert_eq!(summary.total_nodes, 8);
        assert!(summary.to_string().starts_with("CPK v1, content type 0, flags 0x00000000"));
    }
}
