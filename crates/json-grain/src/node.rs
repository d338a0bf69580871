//! The JSON value variant.

use std::fmt;

use crate::array::Array;
use crate::decode::DecodeError;
use crate::number::Number;
use crate::object::Object;

/// A parsed JSON value.
///
/// Numbers are exact decimals ([`Number`]); arrays and objects are ordered
/// views over already-parsed children ([`Array`], [`Object`]). Nodes are
/// immutable once produced by the parser and carry no references into the
/// original input buffer, so they can be shared freely across threads for
/// read-only decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

/// The six JSON value kinds, used in typecast diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Node {
    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::Number(_) => Kind::Number,
            Node::String(_) => Kind::String,
            Node::Array(_) => Kind::Array,
            Node::Object(_) => Kind::Object,
        }
    }

    /// Casts to `null`, or fails with a typecast error.
    pub fn cast_null(&self) -> Result<(), DecodeError> {
        match self {
            Node::Null => Ok(()),
            other => Err(DecodeError::typecast(Kind::Null, other.kind())),
        }
    }

    /// Casts to `bool`, or fails with a typecast error.
    pub fn cast_bool(&self) -> Result<bool, DecodeError> {
        match self {
            Node::Bool(value) => Ok(*value),
            other => Err(DecodeError::typecast(Kind::Bool, other.kind())),
        }
    }

    /// Casts to a number, or fails with a typecast error.
    pub fn cast_number(&self) -> Result<Number, DecodeError> {
        match self {
            Node::Number(value) => Ok(*value),
            other => Err(DecodeError::typecast(Kind::Number, other.kind())),
        }
    }

    /// Casts to a string, or fails with a typecast error.
    pub fn cast_string(&self) -> Result<&str, DecodeError> {
        match self {
            Node::String(value) => Ok(value),
            other => Err(DecodeError::typecast(Kind::String, other.kind())),
        }
    }

    /// Casts to an array, or fails with a typecast error.
    pub fn cast_array(&self) -> Result<&Array, DecodeError> {
        match self {
            Node::Array(value) => Ok(value),
            other => Err(DecodeError::typecast(Kind::Array, other.kind())),
        }
    }

    /// Casts to an object, or fails with a typecast error.
    pub fn cast_object(&self) -> Result<&Object, DecodeError> {
        match self {
            Node::Object(value) => Ok(value),
            other => Err(DecodeError::typecast(Kind::Object, other.kind())),
        }
    }
}

impl fmt::Display for Node {
    /// Renders compact JSON text via the streaming encoder.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = crate::encode::encode(self);
        // The encoder only emits valid UTF-8.
        f.write_str(std::str::from_utf8(&bytes).map_err(|_| fmt::Error)?)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        Node::Number(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_owned())
    }
}

impl From<Array> for Node {
    fn from(value: Array) -> Self {
        Node::Array(value)
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Node::Object(value)
    }
}
