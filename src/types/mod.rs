//! Core types for the CPK format

mod node;
mod package;
pub mod path;
mod scalar;
mod tag;

pub use node::{NamedNode, NodeMap, ValueNode};
pub use path::{PathSegment, escape_name, parse_path};
pub use package::{FORMAT_VERSION, HEADER_SIZE, Package, SUPPORTED_VERSIONS, Summary};
pub use scalar::{Scalar, format_scalar};
pub use tag::{BaseKind, Structure, TypeTag};
