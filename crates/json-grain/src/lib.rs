//! Exact-decimal JSON for Rust.
//!
//! json-grain moves data between raw UTF-8 bytes and strongly typed values
//! around one shared model:
//!
//! - [`Node`]: the JSON value variant, with numbers held as exact decimal
//!   triples ([`Number`]) that never pass through binary floating point while
//!   parsing;
//! - [`parse`] / [`Parser`]: a recursive-descent parser with positioned,
//!   annotatable errors and a boundary-scanning mode for concatenated
//!   documents;
//! - [`decode`]: capability traits and combinators turning nodes into typed
//!   values, annotating every failure with the key/index path that produced
//!   it;
//! - [`encode`]: capability traits and scoped cursors serializing typed
//!   values straight into a byte buffer, with no intermediate tree.
//!
//! # Example
//!
//! ```
//! use json_grain::{parse, Number, Sign};
//!
//! let node = parse(br#"{"success":true,"value":0.1}"#)?;
//! let object = node.cast_object()?;
//! assert_eq!(object.get("success").unwrap().cast_bool()?, true);
//! assert_eq!(
//!     object.get("value").unwrap().cast_number()?,
//!     Number::new(Sign::Plus, 1, 1),
//! );
//! assert_eq!(node.to_string(), r#"{"success":true,"value":0.1}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod array;
mod node;
mod number;
mod object;

pub mod decode;
pub mod encode;
pub mod parse;

pub use array::{Array, Expectation, Shape};
pub use node::{Kind, Node};
pub use number::{Number, Sign};
pub use object::Object;

pub use decode::{
    decode, decode_object, decode_text, CodingKey, Decodable, DecodeError, FieldDecoder,
    ObjectDecodable, ObjectDecoder, OptionalDecoder, PathSegment, StringDecodable,
};
pub use encode::{
    array_with, encode, encode_object, encode_text, object_with, ArrayEncoder, Encodable,
    ObjectEncodable, ObjectEncoder, StringEncodable,
};
pub use parse::{parse, ParseError, ParseErrorKind, Parser};
