//! Literal token formatting for the streaming encoder.

use json_grain_buffers::Writer;

/// `null` as a big-endian u32 of ASCII bytes.
pub(crate) const NULL: u32 = 0x6e75_6c6c;
/// `true` as a big-endian u32 of ASCII bytes.
pub(crate) const TRUE: u32 = 0x7472_7565;

/// Writes the `null` token.
pub fn null(out: &mut Writer) {
    out.u32(NULL);
}

/// Writes a boolean token.
pub fn boolean(out: &mut Writer, value: bool) {
    if value {
        out.u32(TRUE);
    } else {
        out.u8(b'f');
        out.u32(0x616c_7365); // "alse"
    }
}

/// Writes a finite float as its shortest round-trip decimal form, and
/// non-finite values as the extension tokens `nan`, `snan`, `inf`, `-inf`.
///
/// The non-finite tokens are a documented formatting contract of this encoder
/// and are not standard JSON; output containing them is not interoperable
/// with strict RFC 8259 consumers. `snan` is written for signaling NaN
/// (quiet bit clear), `nan` for quiet NaN.
pub fn float(out: &mut Writer, value: f64) {
    if value.is_nan() {
        const QUIET_BIT: u64 = 0x0008_0000_0000_0000;
        if value.to_bits() & QUIET_BIT == 0 {
            out.ascii("snan");
        } else {
            out.ascii("nan");
        }
    } else if value.is_infinite() {
        if value > 0.0 {
            out.ascii("inf");
        } else {
            out.ascii("-inf");
        }
    } else {
        out.ascii(&value.to_string());
    }
}

/// Writes a JSON string literal with RFC 8259 minimal escaping: `"` and `\`
/// are escaped, control characters use the short forms where they exist and
/// lowercase `\u00xx` otherwise, and everything else (including non-ASCII)
/// passes through as raw UTF-8.
pub fn string(out: &mut Writer, s: &str) {
    let bytes = s.as_bytes();

    // Fast path: no byte needs escaping.
    if !bytes.iter().any(|&b| b < 0x20 || b == b'"' || b == b'\\') {
        out.ensure_capacity(bytes.len() + 2);
        out.u8(b'"');
        out.buf(bytes);
        out.u8(b'"');
        return;
    }

    out.u8(b'"');
    let mut run = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            0x08 => b"\\b",
            b'\t' => b"\\t",
            b'\n' => b"\\n",
            0x0c => b"\\f",
            b'\r' => b"\\r",
            b if b < 0x20 => {
                out.buf(&bytes[run..i]);
                run = i + 1;
                out.buf(b"\\u00");
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.u8(HEX[(b >> 4) as usize]);
                out.u8(HEX[(b & 0x0f) as usize]);
                continue;
            }
            _ => continue,
        };
        out.buf(&bytes[run..i]);
        run = i + 1;
        out.buf(escape);
    }
    out.buf(&bytes[run..]);
    out.u8(b'"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Writer)) -> String {
        let mut out = Writer::new();
        f(&mut out);
        String::from_utf8(out.flush()).unwrap()
    }

    #[test]
    fn tokens() {
        assert_eq!(render(null), "null");
        assert_eq!(render(|o| boolean(o, true)), "true");
        assert_eq!(render(|o| boolean(o, false)), "false");
    }

    #[test]
    fn nonfinite_extension_tokens() {
        assert_eq!(render(|o| float(o, f64::NAN)), "nan");
        assert_eq!(render(|o| float(o, f64::INFINITY)), "inf");
        assert_eq!(render(|o| float(o, f64::NEG_INFINITY)), "-inf");
        let signaling = f64::from_bits(0x7ff0_0000_0000_0001);
        assert_eq!(render(|o| float(o, signaling)), "snan");
    }

    #[test]
    fn finite_floats_shortest_form() {
        assert_eq!(render(|o| float(o, 0.1)), "0.1");
        assert_eq!(render(|o| float(o, -3.5)), "-3.5");
        assert_eq!(render(|o| float(o, 2.0)), "2");
    }

    #[test]
    fn string_escaping_matches_serde_json() {
        let cases = [
            "plain",
            "say \"hi\"",
            "back\\slash",
            "tab\there\nnewline",
            "\u{0000}\u{001f}",
            "control \u{0007} bell",
            "non-ascii: héllo 😀",
        ];
        for case in cases {
            let ours = render(|o| string(o, case));
            let theirs = serde_json::to_string(case).unwrap();
            assert_eq!(ours, theirs, "case {case:?}");
            // And serde_json parses it back to the original text.
            let back: String = serde_json::from_str(&ours).unwrap();
            assert_eq!(back, case);
        }
    }
}
