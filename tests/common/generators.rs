//! proptest strategies producing [`GenericNode`](yamlconv::GenericNode) trees.

use proptest::prelude::*;
use yamlconv::GenericNode;

/// Scalars whose values survive a JSON round trip bit-for-bit. Floats are
/// multiples of 0.25 so the decimal rendering is exact.
pub fn scalar() -> impl Strategy<Value = GenericNode> {
    prop_oneof![
        Just(GenericNode::Null),
        any::<bool>().prop_map(GenericNode::Bool),
        any::<i64>().prop_map(GenericNode::from),
        (-4_000i32..4_000).prop_map(|q| GenericNode::from(f64::from(q) / 4.0)),
        "[ -~]{0,12}".prop_map(GenericNode::from),
    ]
}

/// Keys that coerce cleanly. Strings are alphabetic so they never collide
/// with the decimal rendering of an integer key.
pub fn valid_key() -> impl Strategy<Value = GenericNode> {
    prop_oneof![
        "[a-z_]{1,8}".prop_map(GenericNode::from),
        any::<i64>().prop_map(GenericNode::from),
    ]
}

/// Keys that must be rejected.
pub fn invalid_key() -> impl Strategy<Value = GenericNode> {
    prop_oneof![
        Just(GenericNode::Null),
        any::<bool>().prop_map(GenericNode::Bool),
        (-400i32..400).prop_map(|q| GenericNode::from(f64::from(q) / 4.0 + 0.125)),
        prop::collection::vec(scalar(), 0..3).prop_map(GenericNode::Sequence),
        prop::collection::vec((valid_key(), scalar()), 0..3)
            .prop_map(|pairs| GenericNode::Mapping(pairs.into_iter().collect())),
    ]
}

/// Arbitrary trees with only string and integer keys.
pub fn valid_tree() -> impl Strategy<Value = GenericNode> {
    scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(GenericNode::Sequence),
            prop::collection::vec((valid_key(), inner), 0..6)
                .prop_map(|pairs| GenericNode::Mapping(pairs.into_iter().collect())),
        ]
    })
}

/// A valid tree with one invalid key buried somewhere along a random path.
pub fn tree_with_invalid_key() -> impl Strategy<Value = GenericNode> {
    (valid_tree(), invalid_key(), prop::collection::vec(any::<bool>(), 0..4)).prop_map(
        |(sibling, bad_key, path)| {
            let mut bad = serde_yaml::Mapping::new();
            bad.insert(GenericNode::from("sibling"), sibling);
            bad.insert(bad_key, GenericNode::Null);
            path.into_iter().fold(GenericNode::Mapping(bad), |node, wrap_in_seq| {
                if wrap_in_seq {
                    GenericNode::Sequence(vec![GenericNode::Null, node])
                } else {
                    let mut outer = serde_yaml::Mapping::new();
                    outer.insert(GenericNode::from("nested"), node);
                    GenericNode::Mapping(outer)
                }
            })
        },
    )
}
