//! Property tests: encode/decode agreement, size accounting and robustness
//! against truncated or arbitrary input

use cpk::{BaseKind, DecodeError, HEADER_SIZE, NodeMap, Package, ValueNode, decode, writer};
use proptest::prelude::*;
use std::collections::HashSet;

fn node_map(entries: Vec<(String, ValueNode)>) -> NodeMap {
    let mut seen = HashSet::new();
    NodeMap::try_from_entries(entries.into_iter().filter(|(name, _)| seen.insert(name.clone())))
        .unwrap()
}

/// Keep the items sharing the first item's base kind
fn homogeneous(items: Vec<ValueNode>) -> (BaseKind, Vec<ValueNode>) {
    let kind = items.first().map_or(BaseKind::Integer, ValueNode::base_kind);
    let items = items.into_iter().filter(|v| v.base_kind() == kind).collect();
    (kind, items)
}

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn arb_scalar() -> impl Strategy<Value = ValueNode> {
    prop_oneof![
        any::<i64>().prop_map(ValueNode::integer),
        any::<f64>().prop_map(ValueNode::float),
        any::<bool>().prop_map(ValueNode::boolean),
        "[a-z0-9 ]{0,12}".prop_map(ValueNode::string),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(ValueNode::bytes),
    ]
}

fn arb_value() -> impl Strategy<Value = ValueNode> {
    arb_scalar().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec((arb_name(), inner.clone()), 0..6)
                .prop_map(|entries| ValueNode::object(node_map(entries))),
            prop::collection::vec(inner.clone(), 0..6).prop_map(|items| {
                let (kind, items) = homogeneous(items);
                ValueNode::array(kind, items).unwrap()
            }),
            (
                prop::collection::vec((arb_name(), inner.clone()), 0..4),
                prop::collection::vec(inner, 0..4),
            )
                .prop_map(|(entries, items)| {
                    let (kind, items) = homogeneous(items);
                    ValueNode::object_array(kind, node_map(entries), items).unwrap()
                }),
        ]
    })
}

fn arb_package() -> impl Strategy<Value = Package> {
    (
        any::<u16>(),
        any::<u32>(),
        prop::collection::vec((arb_name(), arb_value()), 0..5),
    )
        .prop_map(|(content_type, flags, entries)| {
            Package::new(content_type, flags, node_map(entries))
        })
}

proptest! {
    #[test]
    fn encode_decode_round_trip(package in arb_package()) {
        let bytes = writer::to_bytes(&package).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &package);
        prop_assert_eq!(writer::to_bytes(&decoded).unwrap(), bytes);
    }

    #[test]
    fn root_lengths_sum_to_stream(package in arb_package()) {
        let bytes = writer::to_bytes(&package).unwrap();
        let decoded = decode(&bytes).unwrap();
        let total: u64 = decoded.root().iter().map(|n| n.serialized_length()).sum();
        prop_assert_eq!(total as usize + HEADER_SIZE + 4, bytes.len());
    }

    #[test]
    fn every_proper_prefix_is_truncated(
        package in arb_package(),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = writer::to_bytes(&package).unwrap();
        let len = cut.index(bytes.len());
        let result = decode(&bytes[..len]);
        prop_assert!(
            matches!(result, Err(DecodeError::TruncatedStream { .. })),
            "prefix of {} bytes gave {:?}", len, result
        );
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        if let Err(err) = decode(&bytes) {
            if let Some(offset) = err.offset() {
                prop_assert!(offset as usize <= bytes.len());
            }
        }
    }
}
