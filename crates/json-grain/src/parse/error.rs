//! Positioned parse errors and human-readable annotation.

use thiserror::Error;

/// What went wrong at [`ParseError::position`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected {0}")]
    Expected(&'static str),

    #[error("unexpected end of input")]
    EndOfInput,

    #[error("trailing characters after value")]
    Trailing,

    #[error("unescaped control character in string")]
    Control,

    /// A `\uXXXX` escape that does not resolve to a Unicode scalar value,
    /// carrying the offending 16-bit code unit.
    #[error("escape sequence does not encode a unicode scalar (\\u{unit:04x})")]
    InvalidScalar { unit: u16 },

    #[error("number magnitude exceeds the representable range")]
    NumberOverflow,

    #[error("string is not valid utf-8")]
    InvalidUtf8,
}

/// A grammar failure at a byte position. Parse failures are terminal: no
/// partial value is ever produced alongside one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {position}")]
pub struct ParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }

    /// Renders the offending source line with a `^` marker under the failing
    /// column.
    ///
    /// Works purely from the captured byte position and the raw text, without
    /// re-parsing. The caller supplies the line-splitting function; the returned
    /// lines must be subslices of `source` (as `str::lines` and
    /// `str::split('\n')` produce).
    ///
    /// ```
    /// use json_grain::parse;
    ///
    /// let text = "{\"a\":true,b:1}";
    /// let err = parse(text.as_bytes()).unwrap_err();
    /// let rendered = err.annotate(text, str::lines);
    /// assert!(rendered.ends_with("{\"a\":true,b:1}\n          ^"));
    /// ```
    pub fn annotate<'s, F, I>(&self, source: &'s str, split: F) -> String
    where
        F: FnOnce(&'s str) -> I,
        I: IntoIterator<Item = &'s str>,
    {
        let base = source.as_ptr() as usize;
        for line in split(source) {
            let start = line.as_ptr() as usize - base;
            let end = start + line.len();
            if self.position < start || self.position > end {
                continue;
            }
            let offset = self.position - start;
            let column = line[..offset.min(line.len())].chars().count();
            return format!("{self}\n{line}\n{marker:>width$}", marker = "^", width = column + 1);
        }
        self.to_string()
    }
}
