//! Decoding raw bytes into a [`GenericNode`].
//!
//! The tree is built by [`LooseNode`] rather than `serde_yaml::Value`'s own
//! `Deserialize` impl so that decoding stays permissive:
//!
//! - a key repeated within one mapping overwrites the earlier value, keeping
//!   the position of the first occurrence
//! - integers outside the `i64`/`u64` range decode as floats
//!
//! Merge keys (`<<: *anchor`) are resolved once the tree is built.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::Mapping;

use crate::{ConvertError, GenericNode};

/// Parse the first YAML document in `bytes`.
///
/// Later documents in a multi-document stream are ignored. A stream with no
/// documents at all (empty input, comments only) decodes to `null`.
pub fn parse_document(bytes: &[u8]) -> Result<GenericNode, ConvertError> {
    match serde_yaml::Deserializer::from_slice(bytes).next() {
        Some(document) => {
            let LooseNode(mut node) = LooseNode::deserialize(document)?;
            node.apply_merge()?;
            tracing::trace!(kind = %crate::KeyKind::of(&node), "parsed document");
            Ok(node)
        }
        None => Ok(GenericNode::Null),
    }
}

/// A [`GenericNode`] decoded with last-write-wins mappings.
struct LooseNode(GenericNode);

impl<'de> Deserialize<'de> for LooseNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LooseVisitor).map(LooseNode)
    }
}

struct LooseVisitor;

impl<'de> Visitor<'de> for LooseVisitor {
    type Value = GenericNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<GenericNode, E> {
        Ok(GenericNode::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<GenericNode, E> {
        Ok(GenericNode::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<GenericNode, E> {
        Ok(GenericNode::from(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<GenericNode, E> {
        Ok(match (i64::try_from(v), u64::try_from(v)) {
            (Ok(i), _) => GenericNode::from(i),
            (_, Ok(u)) => GenericNode::from(u),
            _ => GenericNode::from(v as f64),
        })
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<GenericNode, E> {
        Ok(match u64::try_from(v) {
            Ok(u) => GenericNode::from(u),
            Err(_) => GenericNode::from(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<GenericNode, E> {
        Ok(GenericNode::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<GenericNode, E> {
        Ok(GenericNode::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<GenericNode, E> {
        Ok(GenericNode::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<GenericNode, E> {
        Ok(GenericNode::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<GenericNode, E> {
        Ok(GenericNode::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<GenericNode, D::Error>
    where
        D: Deserializer<'de>,
    {
        LooseNode::deserialize(deserializer).map(|LooseNode(node)| node)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<GenericNode, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(LooseNode(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(GenericNode::Sequence(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<GenericNode, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut mapping = Mapping::new();
        while let Some((LooseNode(key), LooseNode(value))) = map.next_entry()? {
            mapping.insert(key, value);
        }
        Ok(GenericNode::Mapping(mapping))
    }

    /// Explicitly tagged nodes (`!thing value`) arrive as a one-variant enum.
    fn visit_enum<A>(self, data: A) -> Result<GenericNode, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (tag, contents) = data.variant::<String>()?;
        let LooseNode(value) = contents.newtype_variant()?;
        Ok(GenericNode::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}
