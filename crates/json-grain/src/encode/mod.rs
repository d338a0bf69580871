//! Streaming encoding from typed values to JSON text.
//!
//! The mirror image of the decode framework: three flat capability
//! interfaces ([`Encodable`], [`StringEncodable`], [`ObjectEncodable`])
//! writing straight into a [`Writer`] through scoped cursors. No intermediate
//! [`Node`] tree is built on this path; composing through a `Node` remains
//! available as the explicit value-producing route (a `Node` is itself
//! [`Encodable`]).
//!
//! Output is UTF-8 JSON text with one documented extension: non-finite floats
//! are written as the tokens `nan`, `snan`, `inf`, `-inf` (see
//! [`literal::float`]).

use json_grain_buffers::Writer;

use crate::array::Array;
use crate::decode::CodingKey;
use crate::node::Node;
use crate::number::Number;
use crate::object::Object;

mod cursor;
pub mod literal;

pub use cursor::{ArrayEncoder, ObjectEncoder};

/// A type that writes itself into an open output buffer.
pub trait Encodable {
    fn encode(&self, out: &mut Writer);
}

/// A type encoded via its textual representation, wrapped and escaped as a
/// JSON string literal. Kept separate from [`Encodable`] so that types with a
/// `Display` form do not silently pick up string encoding; per-type
/// `Encodable` impls opt in by delegating to [`encode_text`].
pub trait StringEncodable: std::fmt::Display {}

impl StringEncodable for String {}
impl StringEncodable for str {}
impl StringEncodable for char {}

/// Writes a string-encodable value as an escaped JSON string literal.
pub fn encode_text<T: StringEncodable + ?Sized>(value: &T, out: &mut Writer) {
    literal::string(out, &value.to_string());
}

/// A type encoded as a `{...}` object through a keyed cursor.
pub trait ObjectEncodable {
    type Keys: CodingKey;

    fn encode_fields(&self, object: &mut ObjectEncoder<'_, Self::Keys>);
}

/// Writes an object-encodable value. Per-type [`Encodable`] impls delegate
/// here in one line.
pub fn encode_object<T: ObjectEncodable>(value: &T, out: &mut Writer) {
    let mut object = ObjectEncoder::open(out);
    value.encode_fields(&mut object);
}

/// Encodes one value to bytes.
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Writer::new();
    value.encode(&mut out);
    out.flush()
}

/// Builds an array document through a scoped cursor and returns its bytes.
pub fn array_with(build: impl FnOnce(&mut ArrayEncoder<'_>)) -> Vec<u8> {
    let mut out = Writer::new();
    {
        let mut array = ArrayEncoder::open(&mut out);
        build(&mut array);
    }
    out.flush()
}

/// Builds an object document through a scoped keyed cursor and returns its
/// bytes.
pub fn object_with<K: CodingKey>(build: impl FnOnce(&mut ObjectEncoder<'_, K>)) -> Vec<u8> {
    let mut out = Writer::new();
    {
        let mut object = ObjectEncoder::open(&mut out);
        build(&mut object);
    }
    out.flush()
}

impl Encodable for () {
    fn encode(&self, out: &mut Writer) {
        literal::null(out);
    }
}

impl Encodable for bool {
    fn encode(&self, out: &mut Writer) {
        literal::boolean(out, *self);
    }
}

impl Encodable for Number {
    fn encode(&self, out: &mut Writer) {
        out.ascii(&self.to_string());
    }
}

macro_rules! impl_encodable_integer {
    ($($t:ty)*) => {$(
        impl Encodable for $t {
            fn encode(&self, out: &mut Writer) {
                out.ascii(&self.to_string());
            }
        }
    )*};
}

impl_encodable_integer!(u8 u16 u32 u64 usize i8 i16 i32 i64 isize);

impl Encodable for f64 {
    fn encode(&self, out: &mut Writer) {
        literal::float(out, *self);
    }
}

impl Encodable for f32 {
    fn encode(&self, out: &mut Writer) {
        if self.is_finite() {
            // f32 needs its own shortest form; widening first would print the
            // f64 digits of the f32 approximation.
            out.ascii(&self.to_string());
        } else {
            literal::float(out, f64::from(*self));
        }
    }
}

impl Encodable for str {
    fn encode(&self, out: &mut Writer) {
        literal::string(out, self);
    }
}

impl Encodable for String {
    fn encode(&self, out: &mut Writer) {
        literal::string(out, self);
    }
}

impl Encodable for char {
    fn encode(&self, out: &mut Writer) {
        encode_text(self, out);
    }
}

impl<T: Encodable> Encodable for Option<T> {
    /// `None` is the `null` token; `Some` delegates.
    fn encode(&self, out: &mut Writer) {
        match self {
            None => literal::null(out),
            Some(value) => value.encode(out),
        }
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encode(&self, out: &mut Writer) {
        (**self).encode(out);
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, out: &mut Writer) {
        let mut array = ArrayEncoder::open(out);
        for element in self {
            array.element(element);
        }
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, out: &mut Writer) {
        self.as_slice().encode(out);
    }
}

impl Encodable for Array {
    fn encode(&self, out: &mut Writer) {
        self.as_slice().encode(out);
    }
}

impl Encodable for Object {
    /// Field order is reproduced exactly as stored.
    fn encode(&self, out: &mut Writer) {
        out.u8(b'{');
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                out.u8(b',');
            }
            literal::string(out, key);
            out.u8(b':');
            value.encode(out);
        }
        out.u8(b'}');
    }
}

impl Encodable for Node {
    /// The value-producing composition path: an already-built tree streams
    /// out without further transformation.
    fn encode(&self, out: &mut Writer) {
        match self {
            Node::Null => literal::null(out),
            Node::Bool(value) => literal::boolean(out, *value),
            Node::Number(value) => value.encode(out),
            Node::String(value) => literal::string(out, value),
            Node::Array(value) => value.encode(out),
            Node::Object(value) => value.encode(out),
        }
    }
}
