//! Ordered array view with shape checks.

use std::ops;

use crate::decode::{DecodeError, FieldDecoder, PathSegment};
use crate::node::Node;

/// An ordered sequence of JSON values.
///
/// Random access by index; indexing out of bounds is a programming error and
/// panics, matching standard slice semantics. Decode-time existence checks
/// belong to the decode framework, not here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    elements: Vec<Node>,
}

/// Element or field count of a container, for cheap pre-decode validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub count: usize,
}

impl Shape {
    /// Fails with a shape error unless the count is exactly `expected`.
    pub fn expect_count(&self, expected: usize) -> Result<(), DecodeError> {
        if self.count == expected {
            Ok(())
        } else {
            Err(DecodeError::Shape {
                count: self.count,
                expected: Expectation::Exactly(expected),
            })
        }
    }

    /// Fails with a shape error unless the count is a multiple of `divisor`.
    /// Returns the quotient on success.
    pub fn expect_multiple_of(&self, divisor: usize) -> Result<usize, DecodeError> {
        if divisor != 0 && self.count % divisor == 0 {
            Ok(self.count / divisor)
        } else {
            Err(DecodeError::Shape {
                count: self.count,
                expected: Expectation::MultipleOf(divisor),
            })
        }
    }
}

/// What a [`Shape`] check demanded of the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Exactly(usize),
    MultipleOf(usize),
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Exactly(n) => write!(f, "exactly {n}"),
            Expectation::MultipleOf(n) => write!(f, "a multiple of {n}"),
        }
    }
}

impl Array {
    pub fn new(elements: Vec<Node>) -> Self {
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            count: self.elements.len(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.elements
    }

    /// A decoder for the element at `index`, bound to the index for error
    /// annotation. Panics if out of bounds.
    pub fn index(&self, index: usize) -> FieldDecoder<'_> {
        FieldDecoder::new(PathSegment::Index(index), &self.elements[index])
    }
}

impl ops::Index<usize> for Array {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl From<Vec<Node>> for Array {
    fn from(elements: Vec<Node>) -> Self {
        Self::new(elements)
    }
}
