//! String conversion builtins: `tostr`, `tonum`, `chr`, `ord`.

use crate::fix32::Fix32;
use crate::lexer;
use crate::numfmt;

use super::value::Value;

/// Textual form of a value.
///
/// | value                     | `hex == false`   | `hex == true`          |
/// |---------------------------|------------------|------------------------|
/// | absent                    | `""`             | `""`                   |
/// | number                    | `%.14g` form     | `0xhhhh.llll`          |
/// | string                    | unchanged        | unchanged              |
/// | boolean                   | `true`/`false`   | `true`/`false`         |
/// | table with `__tostring`   | override result  | override result        |
/// | table, function           | `[table]` …      | `table: 0x…` identity  |
/// | anything else (incl. nil) | `[nil]` …        | `[nil]` …              |
pub fn tostr(v: Option<&Value>, hex: bool) -> Vec<u8> {
    let Some(v) = v else {
        return Vec::new();
    };
    match v {
        Value::Num(n) if hex => numfmt::hex(*n).as_bytes().to_vec(),
        Value::Num(n) => numfmt::decimal(*n).as_bytes().to_vec(),
        Value::Str(s) => s.clone(),
        Value::Bool(true) => b"true".to_vec(),
        Value::Bool(false) => b"false".to_vec(),
        Value::Table(t) => match t.call_tostring() {
            Some(s) => s,
            None => opaque(v, hex),
        },
        Value::Function(_) => opaque(v, hex),
        Value::Nil | Value::Other(_) => bracketed(v),
    }
}

fn opaque(v: &Value, hex: bool) -> Vec<u8> {
    if hex {
        v.debug_repr().into_bytes()
    } else {
        bracketed(v)
    }
}

fn bracketed(v: &Value) -> Vec<u8> {
    format!("[{}]", v.type_name()).into_bytes()
}

/// Parse a numeric literal; `None` when it does not parse.
///
/// Numbers pass through unchanged.  Other types have no textual form to
/// parse and also give `None`.
pub fn tonum(v: Option<&Value>) -> Option<Fix32> {
    match v? {
        Value::Num(n) => Some(*n),
        Value::Str(s) => lexer::parse_number(s),
        _ => None,
    }
}

/// One-byte string holding the integer part of `n`, wrapped to 8 bits.
pub fn chr(n: Fix32) -> Vec<u8> {
    vec![n.to_int() as u8]
}

/// Byte at 1-based position `index` (default 1) of `s`.
///
/// `None` when `s` has no string form, when `index` is given but not
/// numeric, or when the position falls outside the string.
pub fn ord(s: Option<&Value>, index: Option<&Value>) -> Option<Fix32> {
    let bytes = s?.as_bytes()?;
    let pos = match index {
        None => 0,
        Some(v) => i64::from(v.as_number()?.to_int()) - 1,
    };
    let pos = usize::try_from(pos).ok()?;
    bytes.get(pos).map(|&b| Fix32::from_int(i32::from(b)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::value::{Function, Table};

    fn s(v: &Value, hex: bool) -> String {
        String::from_utf8(tostr(Some(v), hex)).unwrap()
    }

    #[test]
    fn tostr_absent_is_empty() {
        assert_eq!(tostr(None, false), b"");
        assert_eq!(tostr(None, true), b"");
    }

    #[test]
    fn tostr_numbers() {
        assert_eq!(s(&Value::num(1.5), false), "1.5");
        assert_eq!(s(&Value::num(1.5), true), "0x0001.8000");
        assert_eq!(s(&Value::num(-1.0), true), "0xffff.0000");
        assert_eq!(s(&Value::num(-3.0), false), "-3");
    }

    #[test]
    fn tostr_strings_and_booleans() {
        assert_eq!(s(&Value::str("hello"), false), "hello");
        assert_eq!(s(&Value::str("hello"), true), "hello");
        assert_eq!(s(&Value::Bool(true), false), "true");
        assert_eq!(s(&Value::Bool(false), true), "false");
    }

    #[test]
    fn tostr_nil_and_unknown_types() {
        assert_eq!(s(&Value::Nil, false), "[nil]");
        assert_eq!(s(&Value::Nil, true), "[nil]");
        assert_eq!(s(&Value::Other("userdata"), true), "[userdata]");
    }

    #[test]
    fn tostr_tables() {
        let plain = Value::from(Table::new());
        assert_eq!(s(&plain, false), "[table]");
        assert!(s(&plain, true).starts_with("table: 0x"));

        let custom = Value::from(Table::new().with_tostring(|_| b"vec2".to_vec()));
        assert_eq!(s(&custom, false), "vec2");
        assert_eq!(s(&custom, true), "vec2");
    }

    #[test]
    fn tostr_functions() {
        let func = Value::Function(Function::new("f"));
        assert_eq!(s(&func, false), "[function]");
        assert!(s(&func, true).starts_with("function: 0x"));
    }

    #[test]
    fn tonum_parses_or_is_absent() {
        assert_eq!(tonum(Some(&Value::str("12"))), Some(Fix32::from_int(12)));
        assert_eq!(tonum(Some(&Value::str("0x0.8"))), Some(Fix32::from_f64(0.5)));
        assert_eq!(tonum(Some(&Value::str("not a number"))), None);
        assert_eq!(tonum(Some(&Value::num(3.0))), Some(Fix32::from_int(3)));
        assert_eq!(tonum(Some(&Value::Bool(true))), None);
        assert_eq!(tonum(None), None);
    }

    #[test]
    fn chr_wraps_to_a_byte() {
        assert_eq!(chr(Fix32::from_int(65)), b"A");
        assert_eq!(chr(Fix32::from_int(256 + 66)), b"B");
        assert_eq!(chr(Fix32::from_int(-1)), [0xffu8]);
        assert_eq!(chr(Fix32::from_f64(97.9)), b"a");
    }

    #[test]
    fn ord_positions() {
        let abc = Value::str("abc");
        assert_eq!(ord(Some(&Value::str("a")), None), Some(Fix32::from_int(97)));
        assert_eq!(ord(Some(&abc), Some(&Value::num(3.0))), Some(Fix32::from_int(99)));
        assert_eq!(ord(Some(&abc), Some(&Value::num(5.0))), None);
        assert_eq!(ord(Some(&abc), Some(&Value::num(0.0))), None);
        assert_eq!(ord(Some(&abc), Some(&Value::str("2"))), Some(Fix32::from_int(98)));
        assert_eq!(ord(Some(&abc), Some(&Value::str("x"))), None);
        assert_eq!(ord(Some(&abc), Some(&Value::Nil)), None);
        assert_eq!(ord(Some(&Value::str("")), None), None);
    }

    #[test]
    fn ord_reads_raw_bytes() {
        let v = Value::Str(vec![0xff, 0x80]);
        assert_eq!(ord(Some(&v), Some(&Value::num(2.0))), Some(Fix32::from_int(0x80)));
    }

    #[test]
    fn ord_of_number_uses_its_text() {
        assert_eq!(ord(Some(&Value::num(65.0)), None), Some(Fix32::from_int(b'6' as i32)));
        assert_eq!(ord(Some(&Value::Bool(true)), None), None);
    }
}
