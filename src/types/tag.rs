//! Type tags - base kinds plus structural flags

use bitflags::bitflags;
use std::fmt;

/// Base kind stored in the low nibble of a tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BaseKind {
    /// Pure container, carries no scalar payload
    Composite = 0x00,
    Integer = 0x01,
    Float = 0x02,
    Boolean = 0x03,
    String = 0x04,
    Bytes = 0x05,
}

impl BaseKind {
    /// Try to convert from the low nibble of a tag byte
    pub fn from_u8(kind: u8) -> Option<Self> {
        match kind {
            0x00 => Some(BaseKind::Composite),
            0x01 => Some(BaseKind::Integer),
            0x02 => Some(BaseKind::Float),
            0x03 => Some(BaseKind::Boolean),
            0x04 => Some(BaseKind::String),
            0x05 => Some(BaseKind::Bytes),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseKind::Composite => "Composite",
            BaseKind::Integer => "Integer",
            BaseKind::Float => "Float",
            BaseKind::Boolean => "Boolean",
            BaseKind::String => "String",
            BaseKind::Bytes => "Bytes",
        }
    }
}

impl fmt::Display for BaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Structural modifiers of a node, independently combinable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct Structure: u8 {
        /// Node holds a keyed mapping of named children
        const OBJECT = 0x40;
        /// Node holds an ordered sequence of items
        const ARRAY = 0x80;
    }
}

const KIND_MASK: u8 = 0x0F;
const RESERVED_MASK: u8 = 0x30;

/// Full type descriptor of a value node: base kind plus structure.
///
/// Ordering is by base kind first, then by structure bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeTag {
    kind: BaseKind,
    structure: Structure,
}

impl TypeTag {
    pub const fn new(kind: BaseKind, structure: Structure) -> Self {
        Self { kind, structure }
    }

    pub const fn scalar(kind: BaseKind) -> Self {
        Self::new(kind, Structure::empty())
    }

    /// Decode a wire tag byte. Returns `None` for unknown kinds or reserved bits.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if byte & RESERVED_MASK != 0 {
            return None;
        }
        let kind = BaseKind::from_u8(byte & KIND_MASK)?;
        let structure = Structure::from_bits_truncate(byte);
        Some(Self::new(kind, structure))
    }

    pub fn to_byte(self) -> u8 {
        self.kind as u8 | self.structure.bits()
    }

    pub fn kind(self) -> BaseKind {
        self.kind
    }

    pub fn structure(self) -> Structure {
        self.structure
    }

    /// Whether every bit of `flag` is set on this tag
    pub fn has_flag(self, flag: Structure) -> bool {
        self.structure.contains(flag)
    }

    pub fn is_scalar(self) -> bool {
        self.structure.is_empty()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.name())?;
        if self.structure.contains(Structure::OBJECT) {
            f.write_str("|Object")?;
        }
        if self.structure.contains(Structure::ARRAY) {
            f.write_str("|Array")?;
        }
        Ok(())
    }
}
