//! Numeric-literal lexer.
//!
//! One grammar serves `tonum`, the tokenizer's conversion step, string to
//! number coercion and the CLI expression parser:
//!
//! ```text
//! number  := space* sign? literal space*
//! literal := ("0x" | "0X") hexdig* ("." hexdig*)?
//!          | ("0b" | "0B") bindig* ("." bindig*)?
//!          | digit* ("." digit*)? (("e" | "E") sign? digit+)?
//! ```
//!
//! Every literal needs at least one digit.  Hex and binary literals are
//! assembled directly into the raw word (integer part wraps, fraction digits
//! past the 16th bit are ignored); decimal literals go through
//! [`Fix32::from_f64`].

use crate::fix32::Fix32;

/// Parse an entire byte string as a number, or `None` if any byte is left
/// over.
pub fn parse_number(src: &[u8]) -> Option<Fix32> {
    let mut lx = Lexer::new(src);
    lx.skip_space();
    let negative = match lx.peek() {
        Some(b'-') => {
            lx.advance();
            true
        }
        Some(b'+') => {
            lx.advance();
            false
        }
        _ => false,
    };
    let n = lx.literal()?;
    lx.skip_space();
    if !lx.at_end() {
        return None;
    }
    Some(if negative { -n } else { n })
}

/// Scan an unsigned literal at the start of `src`.
///
/// Returns the value and the number of bytes consumed.  Used by callers
/// that embed numbers in a larger token stream.
pub fn scan_number(src: &[u8]) -> Option<(Fix32, usize)> {
    let mut lx = Lexer::new(src);
    let n = lx.literal()?;
    Some((n, lx.pos))
}

/// Whitespace as the C locale's `isspace` sees it.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t'..=b'\r')
}

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a [u8]) -> Self {
        Lexer { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.src.get(self.pos + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_space(&mut self) {
        while self.peek().is_some_and(is_space) {
            self.pos += 1;
        }
    }

    fn literal(&mut self) -> Option<Fix32> {
        if self.peek() == Some(b'0') {
            match self.peek2() {
                Some(b'x' | b'X') => {
                    self.pos += 2;
                    return self.radix_literal(4);
                }
                Some(b'b' | b'B') => {
                    self.pos += 2;
                    return self.radix_literal(1);
                }
                _ => {}
            }
        }
        self.decimal_literal()
    }

    /// Hex (`digit_bits == 4`) or binary (`digit_bits == 1`) literal.
    fn radix_literal(&mut self, digit_bits: u32) -> Option<Fix32> {
        let radix = 1u32 << digit_bits;
        let mut int_part: u32 = 0;
        let mut frac_part: u32 = 0;
        let mut frac_shift = Fix32::FRAC_BITS;
        let mut digits = 0usize;

        while let Some(d) = self.peek().and_then(|c| (c as char).to_digit(radix)) {
            int_part = int_part.wrapping_shl(digit_bits) | d;
            self.pos += 1;
            digits += 1;
        }
        if self.eat(b'.') {
            while let Some(d) = self.peek().and_then(|c| (c as char).to_digit(radix)) {
                if frac_shift >= digit_bits {
                    frac_shift -= digit_bits;
                    frac_part |= d << frac_shift;
                }
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return None;
        }
        Some(Fix32::from_bits(
            (int_part.wrapping_shl(Fix32::FRAC_BITS) | frac_part) as i32,
        ))
    }

    fn decimal_literal(&mut self) -> Option<Fix32> {
        let start = self.pos;
        let mut digits = 0usize;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            digits += 1;
        }
        if self.eat(b'.') {
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }

        // The exponent only counts when at least one digit follows.
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.advance();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.advance();
            }
            let exp_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&self.src[start..self.pos]).ok()?;
        let value: f64 = text.parse().ok()?;
        Some(Fix32::from_f64(value))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
