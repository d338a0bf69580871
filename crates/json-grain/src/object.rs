//! Ordered object view.

use std::ops;

use crate::array::Shape;
use crate::decode::{FieldDecoder, PathSegment};
use crate::node::Node;

/// An ordered sequence of `(key, value)` fields.
///
/// Insertion order is preserved and significant: re-encoding reproduces it
/// bit-for-bit. Duplicate keys are permitted here; converting into a
/// unique-key mapping (dictionary decoding, [`ObjectDecoder`] construction)
/// fails on duplicates instead.
///
/// [`ObjectDecoder`]: crate::decode::ObjectDecoder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    fields: Vec<(String, Node)>,
}

impl Object {
    pub fn new(fields: Vec<(String, Node)>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            count: self.fields.len(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Node)> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &[(String, Node)] {
        &self.fields
    }

    /// The value of the first field named `key`, if any. When duplicate keys
    /// exist, the first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// A decoder for the field at ordinal `index`, bound to its key for error
    /// annotation. Panics if out of bounds.
    pub fn field(&self, index: usize) -> FieldDecoder<'_> {
        let (key, value) = &self.fields[index];
        FieldDecoder::new(PathSegment::Key(key.clone()), value)
    }
}

impl ops::Index<usize> for Object {
    type Output = (String, Node);

    fn index(&self, index: usize) -> &(String, Node) {
        &self.fields[index]
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (String, Node);
    type IntoIter = std::slice::Iter<'a, (String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl From<Vec<(String, Node)>> for Object {
    fn from(fields: Vec<(String, Node)>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let object = Object::new(vec![
            ("a".into(), Node::Bool(true)),
            ("a".into(), Node::Bool(false)),
        ]);
        assert_eq!(object.get("a"), Some(&Node::Bool(true)));
        assert_eq!(object.get("b"), None);
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn ordered_access_sees_duplicates() {
        let object = Object::new(vec![
            ("a".into(), Node::Bool(true)),
            ("a".into(), Node::Bool(false)),
        ]);
        let keys: Vec<&str> = object.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "a"]);
    }
}
