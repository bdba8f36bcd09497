//! The `split` tokenizer.
//!
//! Cuts a byte string either into fixed-size chunks or at every occurrence
//! of a one-byte needle, and collects the pieces into a sequence table,
//! optionally reading each piece as a number.

use crate::lexer;

use super::value::{Table, Value};

/// How to cut the haystack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Consecutive pieces of this many bytes; the last may be shorter.
    Chunk(usize),
    /// Pieces between occurrences of this byte; the byte itself is dropped.
    Needle(u8),
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Needle(b',')
    }
}

impl Delimiter {
    /// Interpret the optional delimiter argument.
    ///
    /// Anything numeric (including numeric strings) is a chunk size, clamped
    /// to at least 1.  Otherwise a string contributes its first byte; an
    /// empty string, or one starting with NUL, cuts after every byte.  Any
    /// other argument leaves the default `,`.
    pub fn from_arg(v: Option<&Value>) -> Self {
        let Some(v) = v else {
            return Delimiter::default();
        };
        if let Some(n) = v.as_number() {
            return Delimiter::Chunk(n.to_int().max(1) as usize);
        }
        match v {
            Value::Str(s) => match s.first() {
                Some(&b) if b != 0 => Delimiter::Needle(b),
                _ => Delimiter::Chunk(1),
            },
            _ => Delimiter::default(),
        }
    }
}

/// Split `haystack`.  An empty haystack gives an empty sequence; a
/// haystack ending in the needle gives a trailing empty token.
pub fn split(haystack: &[u8], delim: Delimiter, convert: bool) -> Table {
    let mut out = Table::new();
    if haystack.is_empty() {
        return out;
    }
    match delim {
        Delimiter::Chunk(size) => {
            for piece in haystack.chunks(size.max(1)) {
                out.push(token(piece, convert));
            }
        }
        Delimiter::Needle(needle) => {
            for piece in haystack.split(|&b| b == needle) {
                out.push(token(piece, convert));
            }
        }
    }
    out
}

fn token(piece: &[u8], convert: bool) -> Value {
    if convert {
        if let Some(n) = lexer::parse_number(piece) {
            return Value::Num(n);
        }
    }
    Value::Str(piece.to_vec())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::str(s)).collect()
    }

    #[test]
    fn default_comma_with_conversion() {
        let t = split(b"1,2,3", Delimiter::default(), true);
        assert_eq!(t.as_slice(), &[Value::num(1.0), Value::num(2.0), Value::num(3.0)]);
    }

    #[test]
    fn conversion_is_per_token() {
        let t = split(b"1,a,0x10", Delimiter::default(), true);
        assert_eq!(t.as_slice(), &[Value::num(1.0), Value::str("a"), Value::num(16.0)]);
    }

    #[test]
    fn conversion_off_keeps_text() {
        let t = split(b"1,2", Delimiter::default(), false);
        assert_eq!(t.as_slice(), strs(&["1", "2"]).as_slice());
    }

    #[test]
    fn chunks() {
        let t = split(b"abcdef", Delimiter::Chunk(2), true);
        assert_eq!(t.as_slice(), strs(&["ab", "cd", "ef"]).as_slice());
        let t = split(b"abcde", Delimiter::Chunk(2), true);
        assert_eq!(t.as_slice(), strs(&["ab", "cd", "e"]).as_slice());
    }

    #[test]
    fn trailing_needle_gives_empty_token() {
        let t = split(b"a,b,", Delimiter::default(), true);
        assert_eq!(t.as_slice(), strs(&["a", "b", ""]).as_slice());
    }

    #[test]
    fn adjacent_needles_give_empty_tokens() {
        let t = split(b",x,,", Delimiter::Needle(b','), false);
        assert_eq!(t.as_slice(), strs(&["", "x", "", ""]).as_slice());
    }

    #[test]
    fn empty_haystack_is_empty_sequence() {
        assert!(split(b"", Delimiter::default(), true).is_empty());
        assert!(split(b"", Delimiter::Chunk(3), true).is_empty());
    }

    #[test]
    fn no_needle_present() {
        let t = split(b"hello", Delimiter::Needle(b' '), true);
        assert_eq!(t.as_slice(), strs(&["hello"]).as_slice());
    }

    #[test]
    fn delimiter_from_args() {
        assert_eq!(Delimiter::from_arg(None), Delimiter::Needle(b','));
        assert_eq!(Delimiter::from_arg(Some(&Value::num(3.0))), Delimiter::Chunk(3));
        assert_eq!(Delimiter::from_arg(Some(&Value::num(0.0))), Delimiter::Chunk(1));
        assert_eq!(Delimiter::from_arg(Some(&Value::num(-4.0))), Delimiter::Chunk(1));
        assert_eq!(Delimiter::from_arg(Some(&Value::str("2"))), Delimiter::Chunk(2));
        assert_eq!(Delimiter::from_arg(Some(&Value::str(" x"))), Delimiter::Needle(b' '));
        assert_eq!(Delimiter::from_arg(Some(&Value::str(""))), Delimiter::Chunk(1));
        assert_eq!(Delimiter::from_arg(Some(&Value::Bool(true))), Delimiter::Needle(b','));
        assert_eq!(Delimiter::from_arg(Some(&Value::Nil)), Delimiter::Needle(b','));
    }
}
