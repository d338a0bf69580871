//! Decode error taxonomy and key-path annotation.

use std::fmt;

use thiserror::Error;

use crate::array::Expectation;
use crate::node::Kind;

/// One step of the key path leading to a decode failure: an object key or an
/// array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "[\"{key}\"]"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A decode failure.
///
/// Errors propagate outward from the failing leaf, gaining one `Context`
/// wrapper per containment level, so the rendered message reads the key path
/// root-to-leaf:
///
/// ```text
/// ["market"]["type"]: invalid value 'swap' for MarketType
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The value's kind does not match the requested shape.
    #[error("cannot cast {actual} to {expected}")]
    Typecast { expected: Kind, actual: Kind },

    /// The kind matched but the value is not acceptable for the target.
    #[error("invalid value '{value}' for {target}")]
    Value { target: &'static str, value: String },

    /// A required key is absent.
    #[error("undefined key {key}")]
    Undefined { key: PathSegment },

    /// Two fields collapse to the same unique key.
    #[error("duplicate key \"{key}\"")]
    DuplicateKey { key: String },

    /// A container's element count failed a pre-decode shape check.
    #[error("count {count} is not {expected}")]
    Shape { count: usize, expected: Expectation },

    /// Any of the above, annotated with one key-path segment.
    #[error("{}{}", segment, fmt_context_rest(source))]
    Context {
        segment: PathSegment,
        #[source]
        source: Box<DecodeError>,
    },
}

/// Continues a `Context` rendering: path segments concatenate, and the
/// separator appears only before the leaf error.
fn fmt_context_rest(source: &DecodeError) -> String {
    match source {
        DecodeError::Context { .. } => source.to_string(),
        leaf => format!(": {leaf}"),
    }
}

impl DecodeError {
    pub fn typecast(expected: Kind, actual: Kind) -> Self {
        DecodeError::Typecast { expected, actual }
    }

    /// A value error naming `T` as the target, for enum-membership and other
    /// "kind was right, value was not" failures.
    pub fn value<T>(value: impl fmt::Display) -> Self {
        DecodeError::Value {
            target: std::any::type_name::<T>(),
            value: value.to_string(),
        }
    }

    pub fn undefined(key: PathSegment) -> Self {
        DecodeError::Undefined { key }
    }

    pub fn duplicate(key: impl Into<String>) -> Self {
        DecodeError::DuplicateKey { key: key.into() }
    }

    /// Wraps this error with one more containment level.
    pub fn with_segment(self, segment: PathSegment) -> Self {
        DecodeError::Context {
            segment,
            source: Box::new(self),
        }
    }

    /// The accumulated key path, root-to-leaf.
    pub fn path(&self) -> Vec<&PathSegment> {
        let mut path = Vec::new();
        let mut error = self;
        while let DecodeError::Context { segment, source } = error {
            path.push(segment);
            error = source;
        }
        path
    }

    /// The innermost error, with all path annotation stripped.
    pub fn leaf(&self) -> &DecodeError {
        let mut error = self;
        while let DecodeError::Context { source, .. } = error {
            error = source;
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_accumulates_outward() {
        let leaf = DecodeError::typecast(Kind::Bool, Kind::Null);
        let wrapped = leaf
            .clone()
            .with_segment(PathSegment::Index(3))
            .with_segment(PathSegment::Key("rows".into()));
        assert_eq!(
            wrapped.path(),
            [&PathSegment::Key("rows".into()), &PathSegment::Index(3)]
        );
        assert_eq!(wrapped.leaf(), &leaf);
        assert_eq!(wrapped.to_string(), "[\"rows\"][3]: cannot cast null to bool");
    }

    #[test]
    fn value_error_names_target() {
        let err = DecodeError::value::<bool>("yes");
        let DecodeError::Value { target, value } = &err else {
            panic!("expected value error");
        };
        assert!(target.ends_with("bool"));
        assert_eq!(value, "yes");
    }
}
