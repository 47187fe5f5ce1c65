//! cpk - Decoder and encoder for CPK hierarchical binary packages
//!
//! A CPK package is a small header followed by an ordered tree of named,
//! typed nodes. Every node carries a one-byte type tag combining a base kind
//! (integer, float, boolean, string, bytes or composite) with independent
//! object and array bits, so objects of arrays of objects nest to any depth.
//!
//! # Features
//!
//! - All-or-nothing decoding with byte offsets on every error
//! - Exact per-node size accounting (`serialized_length`)
//! - Configurable nesting limit for untrusted input
//! - Little-endian, portable across architectures
//! - Plain-text renderers behind a registry, and a `cpk-view` binary
//!
//! # Example
//!
//! ```rust
//! use cpk::{BaseKind, NodeMap, Package, ValueNode, writer};
//!
//! let root = NodeMap::try_from_entries([
//!     ("count", ValueNode::integer(42)),
//!     (
//!         "tags",
//!         ValueNode::array(
//!             BaseKind::String,
//!             vec![ValueNode::string("a"), ValueNode::string("b")],
//!         )
//!         .unwrap(),
//!     ),
//! ])
//! .unwrap();
//! let package = Package::new(0, 0, root);
//!
//! let bytes = writer::to_bytes(&package).unwrap();
//! let decoded = cpk::decode(&bytes).unwrap();
//!
//! assert_eq!(decoded.integer_at("count"), Ok(42));
//! assert_eq!(decoded.str_at("tags/[1]"), Ok("b"));
//! assert_eq!(decoded.root()["count"].serialized_length(), 16);
//! ```

pub mod error;
pub mod parser;
pub mod types;
pub mod view;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::{
    AccessError, BuildError, DecodeError, EncodeError, RegistryError, ScalarParseError,
};
pub use parser::{DEFAULT_MAX_DEPTH, Decoder, DecoderConfig, decode, decode_file, decode_reader};
pub use types::{
    BaseKind, FORMAT_VERSION, HEADER_SIZE, NamedNode, NodeMap, Package, PathSegment,
    SUPPORTED_VERSIONS, Scalar, Structure, Summary, TypeTag, ValueNode, format_scalar,
};
pub use view::{Renderer, RendererRegistry};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::{ArrayElement, NdarrayError};
