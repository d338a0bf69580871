//! Key-bound decode helpers.

use crate::decode::{Decodable, DecodeError, PathSegment};
use crate::node::Node;

/// A value bound to the key (object key or array index) it was found under.
///
/// Exists purely to carry provenance: any failure from [`decode`](Self::decode)
/// is wrapped with this decoder's key, so the error path gains one segment per
/// containment level as it propagates outward.
#[derive(Debug, Clone)]
pub struct FieldDecoder<'a> {
    key: PathSegment,
    node: &'a Node,
}

impl<'a> FieldDecoder<'a> {
    pub fn new(key: PathSegment, node: &'a Node) -> Self {
        Self { key, node }
    }

    pub fn key(&self) -> &PathSegment {
        &self.key
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Decodes the bound value, annotating any failure with this key.
    pub fn decode<T: Decodable>(&self) -> Result<T, DecodeError> {
        T::decode(self.node).map_err(|e| e.with_segment(self.key.clone()))
    }
}

/// A possibly-absent value bound to its key.
///
/// Absence of the key and presence of an explicit `null` are distinct states:
/// an absent key yields `None` from [`node`](Self::node) and from
/// [`decode`](Self::decode), while `"k": null` is present with a null node and
/// is handed to the target type, which decides whether it can represent null.
#[derive(Debug, Clone)]
pub struct OptionalDecoder<'a> {
    key: PathSegment,
    node: Option<&'a Node>,
}

impl<'a> OptionalDecoder<'a> {
    pub fn new(key: PathSegment, node: Option<&'a Node>) -> Self {
        Self { key, node }
    }

    pub fn key(&self) -> &PathSegment {
        &self.key
    }

    /// The bound value, or `None` if the key was absent.
    pub fn node(&self) -> Option<&'a Node> {
        self.node
    }

    pub fn is_present(&self) -> bool {
        self.node.is_some()
    }

    /// Converts into a required decoder, failing with an "undefined key"
    /// error naming this key if absent.
    pub fn require(self) -> Result<FieldDecoder<'a>, DecodeError> {
        match self.node {
            Some(node) => Ok(FieldDecoder::new(self.key, node)),
            None => Err(DecodeError::undefined(self.key)),
        }
    }

    /// Decodes the bound value if present; an absent key yields `Ok(None)`.
    pub fn decode<T: Decodable>(&self) -> Result<Option<T>, DecodeError> {
        match self.node {
            Some(node) => T::decode(node)
                .map(Some)
                .map_err(|e| e.with_segment(self.key.clone())),
            None => Ok(None),
        }
    }

    /// Decodes the bound value if present, falling back to `fallback` when the
    /// key was elided.
    pub fn decode_or<T: Decodable>(&self, fallback: T) -> Result<T, DecodeError> {
        Ok(self.decode()?.unwrap_or(fallback))
    }

    /// Decodes the bound value if present, falling back to `T::default()`.
    pub fn decode_or_default<T: Decodable + Default>(&self) -> Result<T, DecodeError> {
        Ok(self.decode()?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Kind;

    #[test]
    fn decode_wraps_with_key() {
        let node = Node::Null;
        let field = FieldDecoder::new(PathSegment::Key("flag".into()), &node);
        let err = field.decode::<bool>().unwrap_err();
        assert_eq!(err.path(), [&PathSegment::Key("flag".into())]);
        assert_eq!(
            err.leaf(),
            &DecodeError::typecast(Kind::Bool, Kind::Null)
        );
    }

    #[test]
    fn absent_is_distinct_from_null() {
        let null = Node::Null;
        let present = OptionalDecoder::new(PathSegment::Key("k".into()), Some(&null));
        let absent = OptionalDecoder::new(PathSegment::Key("k".into()), None);

        assert!(present.is_present());
        assert!(!absent.is_present());
        // Present null decodes to Some(None) through Option<bool>; absent to None.
        assert_eq!(present.decode::<Option<bool>>(), Ok(Some(None)));
        assert_eq!(absent.decode::<Option<bool>>(), Ok(None));
    }

    #[test]
    fn require_names_key() {
        let absent = OptionalDecoder::new(PathSegment::Key("name".into()), None);
        let err = absent.require().unwrap_err();
        assert_eq!(
            err,
            DecodeError::undefined(PathSegment::Key("name".into()))
        );
    }

    #[test]
    fn decode_or_uses_fallback_only_when_absent() {
        let node = Node::Bool(true);
        let present = OptionalDecoder::new(PathSegment::Key("p".into()), Some(&node));
        let absent = OptionalDecoder::new(PathSegment::Key("p".into()), None);
        assert_eq!(present.decode_or(false), Ok(true));
        assert_eq!(absent.decode_or(false), Ok(false));
    }
}
