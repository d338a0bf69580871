//! Keyed object decoding over a closed set of field names.

use crate::decode::{Decodable, DecodeError, FieldDecoder, OptionalDecoder, PathSegment};
use crate::node::Node;
use crate::object::Object;

/// A closed, user-defined enumeration of the field names a type expects.
///
/// # Example
///
/// ```
/// use json_grain::CodingKey;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Keys {
///     Name,
///     Kind,
/// }
///
/// impl CodingKey for Keys {
///     const ALL: &'static [Self] = &[Keys::Name, Keys::Kind];
///
///     fn name(self) -> &'static str {
///         match self {
///             Keys::Name => "name",
///             Keys::Kind => "kind",
///         }
///     }
/// }
/// ```
pub trait CodingKey: Copy + PartialEq + 'static {
    /// Every key of the closed set.
    const ALL: &'static [Self];

    /// The field name this key binds to.
    fn name(self) -> &'static str;
}

/// An index over an [`Object`], keyed by a [`CodingKey`] set.
///
/// Construction fails with a duplicate-key error if two fields bind the same
/// coding key; fields whose names are outside the closed set are ignored.
#[derive(Debug)]
pub struct ObjectDecoder<'a, K: CodingKey> {
    entries: Vec<(K, &'a Node)>,
}

impl<'a, K: CodingKey> ObjectDecoder<'a, K> {
    pub fn new(object: &'a Object) -> Result<Self, DecodeError> {
        let mut entries: Vec<(K, &'a Node)> = Vec::with_capacity(object.len());
        for (name, value) in object {
            let Some(key) = K::ALL.iter().copied().find(|k| k.name() == name) else {
                continue;
            };
            if entries.iter().any(|(bound, _)| *bound == key) {
                return Err(DecodeError::duplicate(name.clone()));
            }
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    fn lookup(&self, key: K) -> Option<&'a Node> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, node)| *node)
    }

    /// A required field. Fails with an "undefined key" error if absent;
    /// a present explicit `null` succeeds and yields the null node.
    pub fn field(&self, key: K) -> Result<FieldDecoder<'a>, DecodeError> {
        self.optional(key).require()
    }

    /// An optional field; absence and explicit `null` stay distinguishable.
    pub fn optional(&self, key: K) -> OptionalDecoder<'a> {
        OptionalDecoder::new(PathSegment::Key(key.name().to_owned()), self.lookup(key))
    }

    /// The first present key's decoder, trying `keys` in order and falling
    /// through to the last key if none are present, so a later "undefined"
    /// error still names a sensible key.
    ///
    /// Panics if `keys` is empty.
    pub fn coalesce(&self, keys: &[K]) -> OptionalDecoder<'a> {
        assert!(!keys.is_empty(), "coalesce requires at least one key");
        for &key in keys {
            if let Some(node) = self.lookup(key) {
                return OptionalDecoder::new(PathSegment::Key(key.name().to_owned()), Some(node));
            }
        }
        self.optional(*keys.last().unwrap())
    }

    /// Shorthand for `field(key)?.decode()`.
    pub fn decode<T: Decodable>(&self, key: K) -> Result<T, DecodeError> {
        self.field(key)?.decode()
    }
}
