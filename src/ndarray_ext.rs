//! ndarray integration for CPK arrays
//!
//! A rectangular nest of pure arrays (`Integer|Array` of `Integer|Array` of
//! integers, and so on) maps onto an `ArrayD` whose shape is the item count
//! at each level. A scalar maps onto a 0-d array.
//!
//! Enable with the `ndarray` feature flag.

use crate::types::{BaseKind, ValueNode};
use ndarray::{ArrayD, ArrayViewD, IxDyn};
use thiserror::Error;

/// Error type for ndarray conversions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdarrayError {
    /// Node carries named children, so it has no array shape
    #[error("node has named children and cannot be viewed as an ndarray")]
    NotAnArray,

    /// Element kind doesn't match the requested element type
    #[error("expected {expected} elements, found {actual}")]
    KindMismatch { expected: BaseKind, actual: BaseKind },

    /// Sub-arrays at `level` disagree on their length, or mix arrays and scalars
    #[error("ragged array at nesting level {level}")]
    Ragged { level: usize },
}

/// Element types that can live in a CPK array
pub trait ArrayElement: Sized + Clone + 'static {
    const KIND: BaseKind;

    fn from_node(node: &ValueNode) -> Option<Self>;

    fn into_node(self) -> ValueNode;
}

impl ArrayElement for i64 {
    const KIND: BaseKind = BaseKind::Integer;

    fn from_node(node: &ValueNode) -> Option<Self> {
        node.as_integer()
    }

    fn into_node(self) -> ValueNode {
        ValueNode::integer(self)
    }
}

impl ArrayElement for f64 {
    const KIND: BaseKind = BaseKind::Float;

    fn from_node(node: &ValueNode) -> Option<Self> {
        node.as_float()
    }

    fn into_node(self) -> ValueNode {
        ValueNode::float(self)
    }
}

impl ArrayElement for bool {
    const KIND: BaseKind = BaseKind::Boolean;

    fn from_node(node: &ValueNode) -> Option<Self> {
        node.as_bool()
    }

    fn into_node(self) -> ValueNode {
        ValueNode::boolean(self)
    }
}

// =============================================================================
// From CPK to ndarray
// =============================================================================

impl ValueNode {
    /// Convert a rectangular nest of pure arrays into an ndarray
    pub fn to_ndarray<T: ArrayElement>(&self) -> Result<ArrayD<T>, NdarrayError> {
        if self.children().is_some() {
            return Err(NdarrayError::NotAnArray);
        }
        if self.base_kind() != T::KIND {
            return Err(NdarrayError::KindMismatch {
                expected: T::KIND,
                actual: self.base_kind(),
            });
        }

        // Shape comes from the first item at every level
        let mut shape = Vec::new();
        let mut node = self;
        while let ValueNode::Array { items, .. } = node {
            shape.push(items.len());
            match items.first() {
                Some(first) => node = first,
                None => break,
            }
        }

        let mut data = Vec::new();
        collect(self, &shape, 0, &mut data)?;
        ArrayD::from_shape_vec(IxDyn(&shape), data)
            .map_err(|_| NdarrayError::Ragged { level: 0 })
    }
}

fn collect<T: ArrayElement>(
    node: &ValueNode,
    shape: &[usize],
    level: usize,
    out: &mut Vec<T>,
) -> Result<(), NdarrayError> {
    match node {
        ValueNode::Object { .. } | ValueNode::ObjectArray { .. } => {
            Err(NdarrayError::NotAnArray)
        }
        ValueNode::Scalar(_) if level == shape.len() => {
            let value = T::from_node(node).ok_or(NdarrayError::KindMismatch {
                expected: T::KIND,
                actual: node.base_kind(),
            })?;
            out.push(value);
            Ok(())
        }
        ValueNode::Array { items, .. } if shape.get(level) == Some(&items.len()) => {
            for item in items {
                collect(item, shape, level + 1, out)?;
            }
            Ok(())
        }
        _ => Err(NdarrayError::Ragged { level }),
    }
}

// =============================================================================
// From ndarray to CPK
// =============================================================================

impl ValueNode {
    /// Build nested arrays from an ndarray; a 0-d array becomes a scalar
    pub fn from_ndarray<T: ArrayElement>(array: &ArrayD<T>) -> Self {
        build(array.view())
    }
}

fn build<T: ArrayElement>(view: ArrayViewD<'_, T>) -> ValueNode {
    if view.ndim() == 0 {
        return view[IxDyn(&[])].clone().into_node();
    }
    ValueNode::Array {
        kind: T::KIND,
        items: view.outer_iter().map(build).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeMap;
    use ndarray::array;

    #[test]
    fn test_from_ndarray_shape() {
        let matrix = array![[1i64, 2, 3], [4, 5, 6]].into_dyn();
        let node = ValueNode::from_ndarray(&matrix);

        assert_eq!(node.tag().to_string(), "Integer|Array");
        let rows = node.items().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].items().unwrap()[2].as_integer(), Some(6));
    }

    #[test]
    fn test_zero_dim_is_scalar() {
        let scalar = ArrayD::from_elem(IxDyn(&[]), 2.5f64);
        let node = ValueNode::from_ndarray(&scalar);
        assert_eq!(node.as_float(), Some(2.5));

        let back: ArrayD<f64> = node.to_ndarray().unwrap();
        assert_eq!(back, scalar);
    }

    #[test]
    fn test_kind_mismatch() {
        let node = ValueNode::from_ndarray(&array![true, false].into_dyn());
        assert_eq!(
            node.to_ndarray::<i64>(),
            Err(NdarrayError::KindMismatch {
                expected: BaseKind::Integer,
                actual: BaseKind::Boolean,
            })
        );
    }

    #[test]
    fn test_ragged() {
        let row = |n: usize| {
            ValueNode::array(BaseKind::Integer, vec![ValueNode::integer(0); n]).unwrap()
        };
        let node = ValueNode::array(BaseKind::Integer, vec![row(2), row(3)]).unwrap();
        assert_eq!(
            node.to_ndarray::<i64>(),
            Err(NdarrayError::Ragged { level: 1 })
        );

        // Array and scalar mixed at one level
        let node =
            ValueNode::array(BaseKind::Integer, vec![row(1), ValueNode::integer(1)]).unwrap();
        assert_eq!(
            node.to_ndarray::<i64>(),
            Err(NdarrayError::Ragged { level: 1 })
        );
    }

    #[test]
    fn test_object_is_not_an_array() {
        let node = ValueNode::object(NodeMap::new());
        assert_eq!(node.to_ndarray::<i64>(), Err(NdarrayError::NotAnArray));
    }

    #[test]
    fn test_empty_dimension() {
        let empty = ArrayD::<f64>::zeros(IxDyn(&[2, 0]));
        let node = ValueNode::from_ndarray(&empty);
        let back: ArrayD<f64> = node.to_ndarray().unwrap();
        assert_eq!(back.shape(), &[2, 0]);
    }
}
