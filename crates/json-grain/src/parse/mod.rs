//! Recursive-descent JSON parser with positional diagnostics.
//!
//! The grammar is strict RFC-style JSON with one relaxation: leading zeros in
//! numbers are accepted. Numbers are normalized to the exact decimal triple by
//! shifting decimal places with checked integer arithmetic; no value ever
//! passes through binary floating point on the way in.
//!
//! Besides single-document [`parse`], a [`Parser`] can be invoked repeatedly
//! over one buffer to recover the boundaries of back-to-back top-level values
//! with no separator between them (NDJSON-like batches): [`Parser::next`]
//! yields decoded documents, [`Parser::next_range`] yields only their
//! `[start, end)` byte ranges without allocating any value.

use std::ops::Range;

use crate::array::Array;
use crate::node::Node;
use crate::number::{Number, Sign};
use crate::object::Object;

mod error;

pub use error::{ParseError, ParseErrorKind};

/// Parses exactly one complete document (object or array root). Trailing
/// bytes other than whitespace are an error.
pub fn parse(data: &[u8]) -> Result<Node, ParseError> {
    let mut parser = Parser::new(data);
    let Some(node) = parser.next()? else {
        return Err(ParseError::new(parser.x, ParseErrorKind::EndOfInput));
    };
    parser.skip_whitespace();
    if parser.x < parser.data.len() {
        return Err(ParseError::new(parser.x, ParseErrorKind::Trailing));
    }
    Ok(node)
}

/// A byte cursor over one input buffer, possibly holding several concatenated
/// documents.
pub struct Parser<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// The current byte offset.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Consumes exactly one root value and advances the cursor to the first
    /// byte after it. Clean end of input yields `Ok(None)`; remaining bytes
    /// that do not form a complete valid root are an error.
    pub fn next(&mut self) -> Result<Option<Node>, ParseError> {
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Ok(None);
        }
        self.read_root().map(Some)
    }

    /// Boundary-scanning variant of [`next`](Self::next): validates and skips
    /// one root value, returning its `[start, end)` byte range without
    /// allocating the decoded value.
    pub fn next_range(&mut self) -> Result<Option<Range<usize>>, ParseError> {
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Ok(None);
        }
        let start = self.x;
        self.skip_root()?;
        Ok(Some(start..self.x))
    }

    fn err<T>(&self, kind: ParseErrorKind) -> Result<T, ParseError> {
        Err(ParseError::new(self.x, kind))
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.x).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    fn read_root(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some(b'{') => self.read_object().map(Node::Object),
            Some(b'[') => self.read_array().map(Node::Array),
            Some(_) => self.err(ParseErrorKind::Expected("'{' or '['")),
            None => self.err(ParseErrorKind::EndOfInput),
        }
    }

    fn skip_root(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'{') => self.skip_object(),
            Some(b'[') => self.skip_array(),
            Some(_) => self.err(ParseErrorKind::Expected("'{' or '['")),
            None => self.err(ParseErrorKind::EndOfInput),
        }
    }

    /// Reads one value; the cursor must sit on its first byte.
    fn read_value(&mut self) -> Result<Node, ParseError> {
        match self.peek() {
            Some(b'{') => self.read_object().map(Node::Object),
            Some(b'[') => self.read_array().map(Node::Array),
            Some(b'"') => self.read_string().map(Node::String),
            Some(b'n') => self.read_literal(b"null", Node::Null),
            Some(b't') => self.read_literal(b"true", Node::Bool(true)),
            Some(b'f') => self.read_literal(b"false", Node::Bool(false)),
            Some(c) if c == b'-' || c.is_ascii_digit() => self.read_number().map(Node::Number),
            Some(_) => self.err(ParseErrorKind::Expected("value")),
            None => self.err(ParseErrorKind::EndOfInput),
        }
    }

    fn skip_value(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'{') => self.skip_object(),
            Some(b'[') => self.skip_array(),
            Some(b'"') => self.skip_string(),
            // Scalars are cheap to materialize; read and discard.
            _ => self.read_value().map(drop),
        }
    }

    fn read_literal(&mut self, literal: &'static [u8], node: Node) -> Result<Node, ParseError> {
        let end = self.x + literal.len();
        if end > self.data.len() || &self.data[self.x..end] != literal {
            return self.err(ParseErrorKind::Expected("value"));
        }
        self.x = end;
        Ok(node)
    }

    fn read_array(&mut self) -> Result<Array, ParseError> {
        self.x += 1; // opening '['
        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(Array::new(elements));
        }
        loop {
            elements.push(self.read_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.x += 1;
                    self.skip_whitespace();
                }
                Some(b']') => {
                    self.x += 1;
                    return Ok(Array::new(elements));
                }
                Some(_) => return self.err(ParseErrorKind::Expected("',' or ']'")),
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    fn skip_array(&mut self) -> Result<(), ParseError> {
        self.x += 1;
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.x += 1;
            return Ok(());
        }
        loop {
            self.skip_value()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.x += 1;
                    self.skip_whitespace();
                }
                Some(b']') => {
                    self.x += 1;
                    return Ok(());
                }
                Some(_) => return self.err(ParseErrorKind::Expected("',' or ']'")),
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    fn read_object(&mut self) -> Result<Object, ParseError> {
        self.x += 1; // opening '{'
        let mut fields = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(Object::new(fields));
        }
        loop {
            let key = self.read_field_key()?;
            let value = self.read_value()?;
            fields.push((key, value));
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.x += 1;
                    self.skip_whitespace();
                }
                Some(b'}') => {
                    self.x += 1;
                    return Ok(Object::new(fields));
                }
                Some(_) => return self.err(ParseErrorKind::Expected("',' or '}'")),
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    fn skip_object(&mut self) -> Result<(), ParseError> {
        self.x += 1;
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.x += 1;
            return Ok(());
        }
        loop {
            if self.peek() != Some(b'"') {
                return self.err(ParseErrorKind::Expected("'\"'"));
            }
            self.skip_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return self.err(ParseErrorKind::Expected("':'"));
            }
            self.x += 1;
            self.skip_whitespace();
            self.skip_value()?;
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.x += 1;
                    self.skip_whitespace();
                }
                Some(b'}') => {
                    self.x += 1;
                    return Ok(());
                }
                Some(_) => return self.err(ParseErrorKind::Expected("',' or '}'")),
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    /// Reads a quoted key plus the `:` separator, leaving the cursor on the
    /// first byte of the value.
    fn read_field_key(&mut self) -> Result<String, ParseError> {
        if self.peek() != Some(b'"') {
            return self.err(ParseErrorKind::Expected("'\"'"));
        }
        let key = self.read_string()?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return self.err(ParseErrorKind::Expected("':'"));
        }
        self.x += 1;
        self.skip_whitespace();
        Ok(key)
    }

    fn read_string(&mut self) -> Result<String, ParseError> {
        self.x += 1; // opening quote
        let mut out: Vec<u8> = Vec::new();
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.x += 1;
                    let position = self.x;
                    return String::from_utf8(out)
                        .map_err(|_| ParseError::new(position, ParseErrorKind::InvalidUtf8));
                }
                Some(b'\\') => {
                    let c = self.read_escape()?;
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
                Some(c) if c < 0x20 => return self.err(ParseErrorKind::Control),
                Some(c) => {
                    out.push(c);
                    self.x += 1;
                }
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    /// Skips a string with full validation, so range scanning accepts exactly
    /// the documents [`read_string`](Self::read_string) accepts. Raw byte runs
    /// between escapes are checked for UTF-8 without being copied out.
    fn skip_string(&mut self) -> Result<(), ParseError> {
        self.x += 1; // opening quote
        let mut run = self.x;
        loop {
            match self.peek() {
                Some(b'"') => {
                    let end = self.x;
                    self.x += 1;
                    return self.check_utf8(run..end);
                }
                Some(b'\\') => {
                    self.check_utf8(run..self.x)?;
                    self.read_escape()?;
                    run = self.x;
                }
                Some(c) if c < 0x20 => return self.err(ParseErrorKind::Control),
                Some(_) => self.x += 1,
                None => return self.err(ParseErrorKind::EndOfInput),
            }
        }
    }

    fn check_utf8(&self, run: Range<usize>) -> Result<(), ParseError> {
        if std::str::from_utf8(&self.data[run]).is_err() {
            return Err(ParseError::new(self.x, ParseErrorKind::InvalidUtf8));
        }
        Ok(())
    }

    /// Decodes one escape sequence; the cursor sits on the backslash.
    /// Surrogate pairs are combined; a `\u` escape that does not resolve to a
    /// scalar is an [`ParseErrorKind::InvalidScalar`] error positioned at the
    /// backslash and carrying the offending code unit.
    fn read_escape(&mut self) -> Result<char, ParseError> {
        let start = self.x;
        self.x += 1; // backslash
        let Some(c) = self.peek() else {
            return self.err(ParseErrorKind::EndOfInput);
        };
        self.x += 1;
        let c = match c {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let unit = self.read_hex4()?;
                return match unit {
                    0xd800..=0xdbff => {
                        // High surrogate: the low half must follow immediately.
                        if self.peek() == Some(b'\\') && self.data.get(self.x + 1) == Some(&b'u') {
                            self.x += 2;
                            let low = self.read_hex4()?;
                            if !(0xdc00..=0xdfff).contains(&low) {
                                return Err(ParseError::new(
                                    start,
                                    ParseErrorKind::InvalidScalar { unit: low },
                                ));
                            }
                            let scalar = 0x10000
                                + (((unit as u32) - 0xd800) << 10)
                                + ((low as u32) - 0xdc00);
                            // Combined surrogate pairs are always scalar values.
                            char::from_u32(scalar).ok_or(ParseError::new(
                                start,
                                ParseErrorKind::InvalidScalar { unit },
                            ))
                        } else {
                            Err(ParseError::new(
                                start,
                                ParseErrorKind::InvalidScalar { unit },
                            ))
                        }
                    }
                    0xdc00..=0xdfff => Err(ParseError::new(
                        start,
                        ParseErrorKind::InvalidScalar { unit },
                    )),
                    _ => char::from_u32(unit as u32).ok_or(ParseError::new(
                        start,
                        ParseErrorKind::InvalidScalar { unit },
                    )),
                };
            }
            _ => {
                self.x -= 1;
                return self.err(ParseErrorKind::Expected("escape sequence"));
            }
        };
        Ok(c)
    }

    fn read_hex4(&mut self) -> Result<u16, ParseError> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let Some(c) = self.peek() else {
                return self.err(ParseErrorKind::EndOfInput);
            };
            let digit = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => return self.err(ParseErrorKind::Expected("hex digit")),
            };
            unit = (unit << 4) | digit as u16;
            self.x += 1;
        }
        Ok(unit)
    }

    /// Reads a number into its decimal-triple form. Exponent notation is
    /// normalized by shifting `places` (and scaling `units` with checked
    /// multiplication), never by float evaluation.
    fn read_number(&mut self) -> Result<Number, ParseError> {
        let start = self.x;
        let overflow = ParseError::new(start, ParseErrorKind::NumberOverflow);
        let sign = if self.peek() == Some(b'-') {
            self.x += 1;
            Sign::Minus
        } else {
            Sign::Plus
        };
        let mut units: u64 = 0;
        if self.read_digits(&mut units)? == 0 {
            return self.err(ParseErrorKind::Expected("digit"));
        }
        let mut places: u32 = 0;
        if self.peek() == Some(b'.') {
            self.x += 1;
            let count = self.read_digits(&mut units)?;
            if count == 0 {
                return self.err(ParseErrorKind::Expected("digit"));
            }
            places = count;
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.x += 1;
            let negative = match self.peek() {
                Some(b'-') => {
                    self.x += 1;
                    true
                }
                Some(b'+') => {
                    self.x += 1;
                    false
                }
                _ => false,
            };
            let mut exponent: u64 = 0;
            if self.read_digits(&mut exponent)? == 0 {
                return self.err(ParseErrorKind::Expected("digit"));
            }
            let exponent = u32::try_from(exponent).map_err(|_| overflow)?;
            if negative {
                places = places.checked_add(exponent).ok_or(overflow)?;
            } else if units == 0 {
                // Scaling zero never changes the value; walking the exponent
                // digit by digit would be unbounded work.
                places = 0;
            } else if exponent >= places {
                // Nonzero units overflow u64 within at most twenty steps, so
                // this loop is bounded regardless of the exponent.
                for _ in 0..exponent - places {
                    units = units.checked_mul(10).ok_or(overflow)?;
                }
                places = 0;
            } else {
                places -= exponent;
            }
        }
        Ok(Number::new(sign, units, places))
    }

    /// Accumulates a run of decimal digits into `value`, returning how many
    /// were consumed. Overflow of the accumulator is a number-overflow error.
    fn read_digits(&mut self, value: &mut u64) -> Result<u32, ParseError> {
        let start = self.x;
        let mut count: u32 = 0;
        while let Some(c @ b'0'..=b'9') = self.peek() {
            *value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((c - b'0') as u64))
                .ok_or(ParseError::new(start, ParseErrorKind::NumberOverflow))?;
            self.x += 1;
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(data: &str) -> Number {
        let node = parse(format!("[{data}]").as_bytes()).unwrap();
        let Node::Array(array) = node else {
            panic!("expected array root");
        };
        array[0].cast_number().unwrap()
    }

    #[test]
    fn numbers_are_exact_triples() {
        assert_eq!(number("0.1"), Number::new(Sign::Plus, 1, 1));
        assert_eq!(number("-12.34"), Number::new(Sign::Minus, 1234, 2));
        assert_eq!(number("1.0"), Number::new(Sign::Plus, 10, 1));
        // Sixteen nines survive where f64 would round.
        assert_eq!(
            number("9999999999999999"),
            Number::new(Sign::Plus, 9_999_999_999_999_999, 0)
        );
    }

    #[test]
    fn exponents_shift_places() {
        assert_eq!(number("1.5e3"), Number::new(Sign::Plus, 1500, 0));
        assert_eq!(number("1.5e-3"), Number::new(Sign::Plus, 15, 4));
        assert_eq!(number("1.25e1"), Number::new(Sign::Plus, 125, 1));
        assert_eq!(number("2E+2"), Number::new(Sign::Plus, 200, 0));
        // Extreme negative exponents keep the exact triple; only an explicit
        // float conversion collapses them toward zero.
        let n = number("5e-4000000000");
        assert_eq!(n, Number::new(Sign::Plus, 5, 4_000_000_000));
        assert_eq!(n.as_f64(), 0.0);
    }

    #[test]
    fn zero_absorbs_any_exponent() {
        // Must return immediately even at the u32 exponent ceiling.
        assert_eq!(number("0e4294967295"), Number::new(Sign::Plus, 0, 0));
        assert_eq!(number("0.00e9"), Number::new(Sign::Plus, 0, 0));
        assert_eq!(number("-0e999"), Number::new(Sign::Minus, 0, 0));
    }

    #[test]
    fn huge_exponent_on_nonzero_units_overflows() {
        let err = parse(b"[5e4294967295]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NumberOverflow);
        assert_eq!(err.position, 1);
    }

    #[test]
    fn number_overflow_is_positioned() {
        let err = parse(b"[99999999999999999999999999]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NumberOverflow);
        assert_eq!(err.position, 1);
    }

    #[test]
    fn surrogate_pairs_combine() {
        let node = parse(r#"["😀"]"#.as_bytes()).unwrap();
        let Node::Array(array) = node else {
            panic!("expected array root");
        };
        assert_eq!(array[0].cast_string().unwrap(), "😀");
    }

    #[test]
    fn lone_surrogate_is_invalid_scalar() {
        let err = parse(br#"["\ud83d"]"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScalar { unit: 0xd83d });
        assert_eq!(err.position, 2);

        let err = parse(br#"["\udc00x"]"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidScalar { unit: 0xdc00 });
    }

    #[test]
    fn unquoted_key_position() {
        let err = parse(br#"{"success":true,value:0.1}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected("'\"'"));
        assert_eq!(err.position, 16);
    }

    #[test]
    fn trailing_garbage_rejected() {
        let err = parse(b"[1] x").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Trailing);
        assert_eq!(err.position, 4);
    }

    #[test]
    fn boundary_scanning_ranges_are_adjacent() {
        let data = br#"{"a":1}["b",2]"#;
        let mut parser = Parser::new(data);
        assert_eq!(parser.next_range().unwrap(), Some(0..7));
        assert_eq!(parser.next_range().unwrap(), Some(7..14));
        assert_eq!(parser.next_range().unwrap(), None);
    }

    #[test]
    fn boundary_scanning_garbage_remainder_is_error() {
        let mut parser = Parser::new(b"[1] nope");
        assert!(parser.next().unwrap().is_some());
        assert!(parser.next().is_err());
    }

    #[test]
    fn invalid_utf8_rejected_by_decode_and_range_scan() {
        let data = b"[\"\xffa\"]";
        let err = parse(data).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.position, 5);

        // Range scanning applies the same validation at the same position.
        let mut parser = Parser::new(data);
        let err = parser.next_range().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
        assert_eq!(err.position, 5);
    }

    #[test]
    fn control_byte_in_string_rejected() {
        let err = parse(b"[\"a\x01b\"]").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Control);
    }

    #[test]
    fn no_trailing_commas() {
        assert!(parse(b"[1,]").is_err());
        assert!(parse(br#"{"a":1,}"#).is_err());
    }

    #[test]
    fn empty_containers() {
        assert_eq!(parse(b" [] ").unwrap(), Node::Array(Array::default()));
        assert_eq!(parse(b"{}").unwrap(), Node::Object(Object::default()));
    }
}
