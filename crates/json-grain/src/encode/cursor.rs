//! Scoped encoder cursors with comma and bracket bookkeeping.

use json_grain_buffers::Writer;

use crate::decode::CodingKey;
use crate::encode::{literal, Encodable};

/// An open `[...]` context over the output buffer.
///
/// A cursor holds the only mutable reference to the buffer for its whole
/// open-to-close lifetime, so a parent context cannot interleave writes while
/// a child cursor is open; the borrow checker rejects it. Opening writes the
/// `[` bracket, and the closing `]` is written on drop, on every exit path.
pub struct ArrayEncoder<'a> {
    out: &'a mut Writer,
    first: bool,
}

impl<'a> ArrayEncoder<'a> {
    pub(crate) fn open(out: &'a mut Writer) -> Self {
        out.u8(b'[');
        Self { out, first: true }
    }

    fn separate(&mut self) {
        if !self.first {
            self.out.u8(b',');
        }
        self.first = false;
    }

    /// Writes one element.
    pub fn element<T: Encodable + ?Sized>(&mut self, value: &T) {
        self.separate();
        value.encode(self.out);
    }

    /// Opens a nested array in the next element slot.
    pub fn array(&mut self, build: impl FnOnce(&mut ArrayEncoder<'_>)) {
        self.separate();
        let mut child = ArrayEncoder::open(self.out);
        build(&mut child);
    }

    /// Opens a nested object in the next element slot.
    pub fn object<K: CodingKey>(&mut self, build: impl FnOnce(&mut ObjectEncoder<'_, K>)) {
        self.separate();
        let mut child = ObjectEncoder::open(self.out);
        build(&mut child);
    }
}

impl Drop for ArrayEncoder<'_> {
    fn drop(&mut self) {
        self.out.u8(b']');
    }
}

/// An open `{...}` context, keyed by a [`CodingKey`] set.
///
/// Fields are written in call order; the same exclusive-buffer rule as
/// [`ArrayEncoder`] applies.
pub struct ObjectEncoder<'a, K: CodingKey> {
    out: &'a mut Writer,
    first: bool,
    _keys: std::marker::PhantomData<K>,
}

impl<'a, K: CodingKey> ObjectEncoder<'a, K> {
    pub(crate) fn open(out: &'a mut Writer) -> Self {
        out.u8(b'{');
        Self {
            out,
            first: true,
            _keys: std::marker::PhantomData,
        }
    }

    fn separate(&mut self, key: K) {
        if !self.first {
            self.out.u8(b',');
        }
        self.first = false;
        literal::string(self.out, key.name());
        self.out.u8(b':');
    }

    /// Writes one field.
    pub fn field<T: Encodable + ?Sized>(&mut self, key: K, value: &T) {
        self.separate(key);
        value.encode(self.out);
    }

    /// Writes the field only when the value is present; `None` elides the key
    /// entirely (as opposed to `field` with an `Option`, which writes `null`).
    pub fn field_optional<T: Encodable>(&mut self, key: K, value: &Option<T>) {
        if let Some(value) = value {
            self.field(key, value);
        }
    }

    /// Opens a nested array under `key`.
    pub fn field_array(&mut self, key: K, build: impl FnOnce(&mut ArrayEncoder<'_>)) {
        self.separate(key);
        let mut child = ArrayEncoder::open(self.out);
        build(&mut child);
    }

    /// Opens a nested object under `key`.
    pub fn field_object<K2: CodingKey>(
        &mut self,
        key: K,
        build: impl FnOnce(&mut ObjectEncoder<'_, K2>),
    ) {
        self.separate(key);
        let mut child = ObjectEncoder::open(self.out);
        build(&mut child);
    }
}

impl<K: CodingKey> Drop for ObjectEncoder<'_, K> {
    fn drop(&mut self) {
        self.out.u8(b'}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{array_with, object_with};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Keys {
        A,
        B,
    }

    impl CodingKey for Keys {
        const ALL: &'static [Self] = &[Keys::A, Keys::B];

        fn name(self) -> &'static str {
            match self {
                Keys::A => "a",
                Keys::B => "b",
            }
        }
    }

    #[test]
    fn commas_only_between_elements() {
        let bytes = array_with(|arr| {
            arr.element(&1u64);
            arr.element(&2u64);
            arr.array(|inner| {
                inner.element(&3u64);
            });
        });
        assert_eq!(bytes, b"[1,2,[3]]");
    }

    #[test]
    fn empty_contexts_close() {
        assert_eq!(array_with(|_| {}), b"[]");
        assert_eq!(object_with::<Keys>(|_| {}), b"{}");
    }

    #[test]
    fn object_fields_in_call_order() {
        let bytes = object_with::<Keys>(|obj| {
            obj.field(Keys::B, &true);
            obj.field_array(Keys::A, |arr| {
                arr.element(&());
            });
        });
        assert_eq!(bytes, br#"{"b":true,"a":[null]}"#);
    }

    #[test]
    fn optional_fields_elide_none() {
        let bytes = object_with::<Keys>(|obj| {
            obj.field_optional(Keys::A, &Some(1u64));
            obj.field_optional(Keys::B, &None::<u64>);
        });
        assert_eq!(bytes, br#"{"a":1}"#);
    }
}
