//! Q16.16 fixed-point number with PICO-8 semantics.
//!
//! A [`Fix32`] is a 32-bit two's-complement word whose value is
//! `bits / 65536`.  Arithmetic wraps modulo 2^32; nothing saturates except
//! division, which mirrors the console's "infinity" results.  The raw word
//! is authoritative: bitwise operators, shifts, sign tests and hex
//! formatting all work on [`Fix32::bits`].

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};
use std::str::FromStr;

use crate::{lexer, numfmt};

/// A PICO-8 number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fix32(i32);

impl Fix32 {
    pub const FRAC_BITS: u32 = 16;
    pub const SCALE: f64 = 65536.0;

    pub const ZERO: Fix32 = Fix32(0);
    pub const ONE: Fix32 = Fix32(0x1_0000);
    pub const MINUS_ONE: Fix32 = Fix32(-0x1_0000);
    /// `0x7fff.ffff`, the largest value (also "positive infinity").
    pub const MAX: Fix32 = Fix32(i32::MAX);
    /// `0x8000.0000`, the smallest value.
    pub const MIN: Fix32 = Fix32(i32::MIN);

    /// Reinterpret a raw 32-bit pattern.
    pub const fn from_bits(bits: i32) -> Self {
        Fix32(bits)
    }

    /// The exact 32-bit pattern.
    pub const fn bits(self) -> i32 {
        self.0
    }

    /// Integer constructor; values outside `-32768..=32767` wrap.
    pub const fn from_int(n: i32) -> Self {
        Fix32(n.wrapping_shl(Self::FRAC_BITS))
    }

    /// Convert from a host float, rounding to the nearest 1/65536 and
    /// wrapping the result into 32 bits.  NaN and infinities become zero.
    pub fn from_f64(d: f64) -> Self {
        if !d.is_finite() {
            return Fix32::ZERO;
        }
        let scaled = (d * Self::SCALE).round();
        // The `as i32` step wraps.
        Fix32(scaled as i64 as i32)
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / Self::SCALE
    }

    /// Integer part with the fractional bits dropped (rounds toward -inf).
    ///
    /// This is the conversion applied to shift counts, byte values and
    /// string indices.
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    /// `true` when the sign bit of the raw word is clear.
    ///
    /// `sgn` and the `sqrt` domain check are defined on this predicate,
    /// never on a value comparison.
    pub const fn sign_bit_clear(self) -> bool {
        self.0 >= 0
    }

    pub const fn floor(self) -> Self {
        Fix32(self.0 & !0xffff)
    }

    pub const fn ceil(self) -> Self {
        Fix32(Fix32(self.0.wrapping_neg()).floor().0.wrapping_neg())
    }

    /// Magnitude; `0x8000.0000` wraps back to itself.
    pub const fn abs(self) -> Self {
        if self.0 >= 0 {
            self
        } else {
            Fix32(self.0.wrapping_neg())
        }
    }

    pub fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    pub fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }

    /// Logical (zero-filling) right shift.  Negative counts shift left.
    pub fn lshr(self, n: i32) -> Self {
        if n < 0 {
            Fix32(shift_left(self.0, n.unsigned_abs()))
        } else {
            Fix32(logical_right(self.0, n.unsigned_abs()))
        }
    }

    /// Rotate the raw word left by `n mod 32`.
    pub fn rotl(self, n: i32) -> Self {
        Fix32((self.0 as u32).rotate_left((n & 31) as u32) as i32)
    }

    /// Rotate the raw word right by `n mod 32`; exact inverse of [`rotl`](Self::rotl).
    pub fn rotr(self, n: i32) -> Self {
        Fix32((self.0 as u32).rotate_right((n & 31) as u32) as i32)
    }

    /// High and low halves of the raw word, as printed by `tostr(x, true)`.
    pub const fn halves(self) -> (u16, u16) {
        let b = self.0 as u32;
        ((b >> 16) as u16, b as u16)
    }
}

// Shift helpers take an unsigned amount so that `i32::MIN` counts cannot
// overflow on negation.

fn shift_left(bits: i32, amount: u32) -> i32 {
    if amount >= 32 {
        0
    } else {
        bits << amount
    }
}

fn arithmetic_right(bits: i32, amount: u32) -> i32 {
    bits >> amount.min(31)
}

fn logical_right(bits: i32, amount: u32) -> i32 {
    if amount >= 32 {
        0
    } else {
        ((bits as u32) >> amount) as i32
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl Add for Fix32 {
    type Output = Fix32;
    fn add(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Fix32 {
    type Output = Fix32;
    fn sub(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fix32 {
    type Output = Fix32;
    fn neg(self) -> Fix32 {
        Fix32(self.0.wrapping_neg())
    }
}

impl Mul for Fix32 {
    type Output = Fix32;
    fn mul(self, rhs: Fix32) -> Fix32 {
        Fix32(((i64::from(self.0) * i64::from(rhs.0)) >> Self::FRAC_BITS) as i32)
    }
}

impl Div for Fix32 {
    type Output = Fix32;
    fn div(self, rhs: Fix32) -> Fix32 {
        // Keeps 0x8000.0000 / 1 from turning into 0x8000.0001.
        if rhs == Fix32::ONE {
            return self;
        }
        if rhs.0 != 0 {
            let q = (i64::from(self.0) << Self::FRAC_BITS) / i64::from(rhs.0);
            if let Ok(bits) = i32::try_from(q) {
                if bits != i32::MIN {
                    return Fix32(bits);
                }
            }
        }
        if (self.0 ^ rhs.0) >= 0 {
            Fix32::MAX
        } else {
            Fix32(i32::MIN + 1)
        }
    }
}

impl Rem for Fix32 {
    type Output = Fix32;
    /// Always lands in `[0, |rhs|)`; modulo by zero yields zero.
    fn rem(self, rhs: Fix32) -> Fix32 {
        let m = rhs.abs();
        if m.0 == 0 {
            return Fix32::ZERO;
        }
        let r = self.0.wrapping_rem(m.0);
        if r < 0 {
            Fix32(r.wrapping_add(m.0))
        } else {
            Fix32(r)
        }
    }
}

// ── Bitwise ───────────────────────────────────────────────────────────────────

impl BitAnd for Fix32 {
    type Output = Fix32;
    fn bitand(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0 & rhs.0)
    }
}

impl BitOr for Fix32 {
    type Output = Fix32;
    fn bitor(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0 | rhs.0)
    }
}

impl BitXor for Fix32 {
    type Output = Fix32;
    fn bitxor(self, rhs: Fix32) -> Fix32 {
        Fix32(self.0 ^ rhs.0)
    }
}

impl Not for Fix32 {
    type Output = Fix32;
    fn not(self) -> Fix32 {
        Fix32(!self.0)
    }
}

/// Arithmetic shift left.  Counts of 32 or more give zero; negative counts
/// become a logical right shift.
impl Shl<i32> for Fix32 {
    type Output = Fix32;
    fn shl(self, n: i32) -> Fix32 {
        if n < 0 {
            Fix32(logical_right(self.0, n.unsigned_abs()))
        } else {
            Fix32(shift_left(self.0, n.unsigned_abs()))
        }
    }
}

/// Sign-extending shift right.  Counts of 32 or more leave only copies of
/// the sign bit; negative counts shift left.
impl Shr<i32> for Fix32 {
    type Output = Fix32;
    fn shr(self, n: i32) -> Fix32 {
        if n < 0 {
            Fix32(shift_left(self.0, n.unsigned_abs()))
        } else {
            Fix32(arithmetic_right(self.0, n.unsigned_abs()))
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<i16> for Fix32 {
    fn from(n: i16) -> Self {
        Fix32::from_int(i32::from(n))
    }
}

impl From<Fix32> for f64 {
    fn from(x: Fix32) -> f64 {
        x.to_f64()
    }
}

impl fmt::Display for Fix32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(numfmt::hex(*self).as_str())
        } else {
            f.write_str(numfmt::decimal(*self).as_str())
        }
    }
}

/// Error returned when a string is not a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a number")]
pub struct ParseFix32Error;

impl FromStr for Fix32 {
    type Err = ParseFix32Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lexer::parse_number(s.as_bytes()).ok_or(ParseFix32Error)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
