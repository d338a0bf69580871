//! Capability-based decoding from [`Node`] to typed values.
//!
//! Three flat capability interfaces, composed by delegation rather than
//! inheritance:
//!
//! - [`Decodable`]: constructible from any [`Node`];
//! - [`StringDecodable`]: constructible from the text of a JSON string,
//!   deliberately kept separate from [`Decodable`] so that types which happen
//!   to be textually convertible do not pick up string-based decoding as a
//!   silent default;
//! - [`ObjectDecodable`]: constructible from a keyed [`ObjectDecoder`] index;
//!   its `Decodable` body is the one-line delegation through
//!   [`decode_object`].
//!
//! Every failure is annotated with the object key or array index it was found
//! under, one segment per containment level (see [`DecodeError`]).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::node::Node;
use crate::number::Number;

mod error;
mod field;
mod object;

pub use error::{DecodeError, PathSegment};
pub use field::{FieldDecoder, OptionalDecoder};
pub use object::{CodingKey, ObjectDecoder};

/// A type constructible from a JSON value.
pub trait Decodable: Sized {
    fn decode(node: &Node) -> Result<Self, DecodeError>;
}

/// A type constructible from the text of a JSON string.
pub trait StringDecodable: Sized {
    fn decode_str(text: &str) -> Result<Self, DecodeError>;
}

/// A type constructible from a keyed object index.
pub trait ObjectDecodable: Sized {
    type Keys: CodingKey;

    fn decode_fields(object: &ObjectDecoder<'_, Self::Keys>) -> Result<Self, DecodeError>;
}

/// Decodes a typed value from a node.
pub fn decode<T: Decodable>(node: &Node) -> Result<T, DecodeError> {
    T::decode(node)
}

/// Decodes a string-decodable type, casting the node to a string first.
pub fn decode_text<T: StringDecodable>(node: &Node) -> Result<T, DecodeError> {
    T::decode_str(node.cast_string()?)
}

/// Decodes an object-decodable type, casting the node to an object and
/// indexing it by the type's coding keys. Per-type [`Decodable`] impls
/// delegate here in one line.
pub fn decode_object<T: ObjectDecodable>(node: &Node) -> Result<T, DecodeError> {
    let object = node.cast_object()?;
    let index = ObjectDecoder::new(object)?;
    T::decode_fields(&index)
}

impl Decodable for Node {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        Ok(node.clone())
    }
}

impl Decodable for () {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        node.cast_null()
    }
}

impl Decodable for bool {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        node.cast_bool()
    }
}

impl Decodable for Number {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        node.cast_number()
    }
}

impl Decodable for String {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        node.cast_string().map(str::to_owned)
    }
}

impl Decodable for char {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let text = node.cast_string()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(DecodeError::value::<char>(text)),
        }
    }
}

macro_rules! impl_decodable_unsigned {
    ($($t:ty)*) => {$(
        impl Decodable for $t {
            fn decode(node: &Node) -> Result<Self, DecodeError> {
                let number = node.cast_number()?;
                number
                    .as_u64()
                    .and_then(|units| <$t>::try_from(units).ok())
                    .ok_or_else(|| DecodeError::value::<$t>(number))
            }
        }
    )*};
}

macro_rules! impl_decodable_signed {
    ($($t:ty)*) => {$(
        impl Decodable for $t {
            fn decode(node: &Node) -> Result<Self, DecodeError> {
                let number = node.cast_number()?;
                number
                    .as_i64()
                    .and_then(|value| <$t>::try_from(value).ok())
                    .ok_or_else(|| DecodeError::value::<$t>(number))
            }
        }
    )*};
}

impl_decodable_unsigned!(u8 u16 u32 u64 usize);
impl_decodable_signed!(i8 i16 i32 i64 isize);

impl Decodable for f64 {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        Ok(node.cast_number()?.as_f64())
    }
}

impl Decodable for f32 {
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        Ok(node.cast_number()?.as_f64() as f32)
    }
}

impl<T: Decodable> Decodable for Option<T> {
    /// An explicit `null` decodes to `None`; anything else delegates to `T`.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        match node {
            Node::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Decodable> Decodable for Vec<T> {
    /// Element order is preserved; the first failing element aborts the decode,
    /// annotated with its index.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let array = node.cast_array()?;
        let mut elements = Vec::with_capacity(array.len());
        for (index, element) in array.iter().enumerate() {
            elements.push(
                T::decode(element).map_err(|e| e.with_segment(PathSegment::Index(index)))?,
            );
        }
        Ok(elements)
    }
}

impl<T: Decodable + Eq + Hash> Decodable for HashSet<T> {
    /// Later duplicates silently replace earlier ones.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let array = node.cast_array()?;
        let mut set = HashSet::with_capacity(array.len());
        for (index, element) in array.iter().enumerate() {
            set.replace(
                T::decode(element).map_err(|e| e.with_segment(PathSegment::Index(index)))?,
            );
        }
        Ok(set)
    }
}

impl<T: Decodable + Ord> Decodable for BTreeSet<T> {
    /// Later duplicates silently replace earlier ones.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let array = node.cast_array()?;
        let mut set = BTreeSet::new();
        for (index, element) in array.iter().enumerate() {
            set.replace(
                T::decode(element).map_err(|e| e.with_segment(PathSegment::Index(index)))?,
            );
        }
        Ok(set)
    }
}

impl<T: Decodable> Decodable for HashMap<String, T> {
    /// Fails with a duplicate-key error if two fields collapse to one key.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let object = node.cast_object()?;
        let mut map = HashMap::with_capacity(object.len());
        for (key, value) in object {
            if map.contains_key(key) {
                return Err(DecodeError::duplicate(key.clone()));
            }
            let value =
                T::decode(value).map_err(|e| e.with_segment(PathSegment::Key(key.clone())))?;
            map.insert(key.clone(), value);
        }
        Ok(map)
    }
}

impl<T: Decodable> Decodable for BTreeMap<String, T> {
    /// Fails with a duplicate-key error if two fields collapse to one key.
    fn decode(node: &Node) -> Result<Self, DecodeError> {
        let object = node.cast_object()?;
        let mut map = BTreeMap::new();
        for (key, value) in object {
            if map.contains_key(key) {
                return Err(DecodeError::duplicate(key.clone()));
            }
            let value =
                T::decode(value).map_err(|e| e.with_segment(PathSegment::Key(key.clone())))?;
            map.insert(key.clone(), value);
        }
        Ok(map)
    }
}

impl StringDecodable for String {
    fn decode_str(text: &str) -> Result<Self, DecodeError> {
        Ok(text.to_owned())
    }
}

macro_rules! impl_string_decodable_from_str {
    ($($t:ty)*) => {$(
        impl StringDecodable for $t {
            fn decode_str(text: &str) -> Result<Self, DecodeError> {
                text.parse::<$t>()
                    .map_err(|_| DecodeError::value::<$t>(text))
            }
        }
    )*};
}

impl_string_decodable_from_str!(bool char u8 u16 u32 u64 usize i8 i16 i32 i64 isize f32 f64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::Array;
    use crate::node::Kind;
    use crate::number::Sign;
    use crate::object::Object;

    fn num(units: u64, places: u32) -> Node {
        Node::Number(Number::new(Sign::Plus, units, places))
    }

    #[test]
    fn integer_decode_is_exact() {
        assert_eq!(decode::<u64>(&num(2500, 2)), Ok(25));
        let err = decode::<u64>(&num(25, 1)).unwrap_err();
        assert!(matches!(err, DecodeError::Value { .. }));
        // Out of range for the narrow type: kind matched, value did not.
        let err = decode::<u8>(&num(300, 0)).unwrap_err();
        assert!(matches!(err, DecodeError::Value { .. }));
        // Wrong kind entirely.
        let err = decode::<u8>(&Node::Bool(true)).unwrap_err();
        assert_eq!(err, DecodeError::typecast(Kind::Number, Kind::Bool));
    }

    #[test]
    fn vec_annotates_failing_index() {
        let node = Node::Array(Array::new(vec![num(1, 0), Node::Null, num(3, 0)]));
        let err = decode::<Vec<u64>>(&node).unwrap_err();
        assert_eq!(err.path(), [&PathSegment::Index(1)]);
        assert_eq!(err.leaf(), &DecodeError::typecast(Kind::Number, Kind::Null));
    }

    #[test]
    fn map_rejects_duplicates_set_does_not() {
        let node = Node::Object(Object::new(vec![
            ("a".into(), num(1, 0)),
            ("a".into(), num(2, 0)),
        ]));
        let err = decode::<HashMap<String, u64>>(&node).unwrap_err();
        assert_eq!(err, DecodeError::duplicate("a"));

        let node = Node::Array(Array::new(vec![num(1, 0), num(1, 0)]));
        let set = decode::<BTreeSet<u64>>(&node).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn option_distinguishes_null() {
        assert_eq!(decode::<Option<bool>>(&Node::Null), Ok(None));
        assert_eq!(decode::<Option<bool>>(&Node::Bool(true)), Ok(Some(true)));
        assert!(decode::<Option<bool>>(&num(1, 0)).is_err());
    }

    #[test]
    fn string_decodable_is_not_a_default_route() {
        // A number held as a JSON string decodes through decode_text only.
        let node = Node::String("42".into());
        assert_eq!(decode_text::<u64>(&node), Ok(42));
        assert!(decode::<u64>(&node).is_err());
        let err = decode_text::<u64>(&Node::String("4x".into())).unwrap_err();
        assert!(matches!(err, DecodeError::Value { .. }));
    }

    #[test]
    fn char_requires_single_scalar() {
        assert_eq!(decode::<char>(&Node::String("x".into())), Ok('x'));
        assert!(decode::<char>(&Node::String("xy".into())).is_err());
        assert!(decode::<char>(&Node::String("".into())).is_err());
    }
}
