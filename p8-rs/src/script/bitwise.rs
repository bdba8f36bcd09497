//! Bitwise builtins over the raw 32-bit word.
//!
//! Shift and rotate counts arrive as numbers and are reduced with
//! [`Fix32::to_int`].  Out-of-range counts follow the policy documented on
//! the [`Fix32`] shift operators: 32 or more shifts everything out, a
//! negative count shifts the other way, and rotations use `n & 31`.

use crate::fix32::Fix32;

pub fn band(a: Fix32, b: Fix32) -> Fix32 {
    a & b
}

pub fn bor(a: Fix32, b: Fix32) -> Fix32 {
    a | b
}

pub fn bxor(a: Fix32, b: Fix32) -> Fix32 {
    a ^ b
}

pub fn bnot(a: Fix32) -> Fix32 {
    !a
}

pub fn shl(x: Fix32, n: Fix32) -> Fix32 {
    x << n.to_int()
}

/// Arithmetic (sign-extending) shift right.
pub fn shr(x: Fix32, n: Fix32) -> Fix32 {
    x >> n.to_int()
}

/// Logical (zero-filling) shift right.
pub fn lshr(x: Fix32, n: Fix32) -> Fix32 {
    x.lshr(n.to_int())
}

pub fn rotl(x: Fix32, n: Fix32) -> Fix32 {
    x.rotl(n.to_int())
}

pub fn rotr(x: Fix32, n: Fix32) -> Fix32 {
    x.rotr(n.to_int())
}
