//! Number-to-text formatting into a fixed stack buffer.
//!
//! Every call owns its own [`NumBuf`]; nothing is shared between calls, so
//! the formatters are reentrant.
//!
//! The decimal form follows C's `%.14g`: up to 14 significant digits,
//! trailing zeros trimmed, and scientific notation once the decimal
//! exponent drops below -4.  No Q16.16 value reaches the upper exponent
//! limit, but the rule is implemented in full.

use std::fmt::{self, Write};

use crate::fix32::Fix32;

const SIG_DIGITS: i32 = 14;

/// A small fixed-capacity text buffer.
#[derive(Clone, Copy)]
pub struct NumBuf {
    buf: [u8; 32],
    len: usize,
}

impl NumBuf {
    pub const fn new() -> Self {
        NumBuf { buf: [0; 32], len: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever written.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }
}

impl Default for NumBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for NumBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl fmt::Debug for NumBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumBuf({:?})", self.as_str())
    }
}

/// `0x%04x.%04x` over the high and low halves of the raw word.
pub fn hex(x: Fix32) -> NumBuf {
    let (hi, lo) = x.halves();
    let mut out = NumBuf::new();
    // 11 bytes always fit.
    let _ = write!(out, "0x{hi:04x}.{lo:04x}");
    out
}

/// Shortest `%.14g` rendering of the value.
pub fn decimal(x: Fix32) -> NumBuf {
    let mut out = NumBuf::new();
    if x.bits() == 0 {
        let _ = out.write_str("0");
        return out;
    }
    let v = x.to_f64();

    // As with `%g`, the exponent is taken after rounding to 14 digits.
    let mut sci = NumBuf::new();
    let _ = write!(sci, "{:.*e}", (SIG_DIGITS - 1) as usize, v);
    let exp = exponent_of(&sci);

    if exp < -4 || exp >= SIG_DIGITS {
        let (mantissa, _) = split_exponent(&sci);
        let _ = out.write_str(trim_fraction(mantissa));
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "e{sign}{:02}", exp.unsigned_abs());
    } else {
        let prec = (SIG_DIGITS - 1 - exp) as usize;
        let _ = write!(out, "{v:.prec$}");
        let keep = trim_fraction(out.as_str()).len();
        out.truncate(keep);
    }
    out
}

fn split_exponent(sci: &NumBuf) -> (&str, &str) {
    let s = sci.as_str();
    s.split_once('e').unwrap_or((s, "0"))
}

fn exponent_of(sci: &NumBuf) -> i32 {
    split_exponent(sci).1.parse().unwrap_or(0)
}

/// Drop trailing fractional zeros and a dangling decimal point.
fn trim_fraction(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
