//! Math builtins: `max`, `min`, `mid`, `ceil`, `flr`, `abs`, `sgn`, `sqrt`,
//! `cos`, `sin`, `atan2`.
//!
//! Angles are fractions of a full turn, and the y axis points down, so
//! `sin` and `cos` take the negated angle.  Transcendentals go through
//! `f64` and are rounded back with [`Fix32::from_f64`].

use std::f64::consts::TAU;

use crate::fix32::Fix32;

pub fn max(a: Fix32, b: Fix32) -> Fix32 {
    a.max(b)
}

pub fn min(a: Fix32, b: Fix32) -> Fix32 {
    a.min(b)
}

/// Median of three.  The comparison order is significant for ties.
pub fn mid(x: Fix32, y: Fix32, z: Fix32) -> Fix32 {
    if x > y {
        if y > z {
            y
        } else {
            x.min(z)
        }
    } else if x > z {
        x
    } else {
        y.min(z)
    }
}

pub fn ceil(x: Fix32) -> Fix32 {
    x.ceil()
}

pub fn flr(x: Fix32) -> Fix32 {
    x.floor()
}

pub fn abs(x: Fix32) -> Fix32 {
    x.abs()
}

/// `1` when the sign bit is clear (zero included), `-1` otherwise.
pub fn sgn(x: Fix32) -> Fix32 {
    if x.sign_bit_clear() {
        Fix32::ONE
    } else {
        Fix32::MINUS_ONE
    }
}

/// Square root, or 0 when the sign bit is set.
pub fn sqrt(x: Fix32) -> Fix32 {
    if x.sign_bit_clear() {
        Fix32::from_f64(x.to_f64().sqrt())
    } else {
        Fix32::ZERO
    }
}

pub fn cos(x: Fix32) -> Fix32 {
    Fix32::from_f64((-TAU * x.to_f64()).cos())
}

pub fn sin(x: Fix32) -> Fix32 {
    Fix32::from_f64((-TAU * x.to_f64()).sin())
}

/// Direction of `(dx, dy)` as a fraction of a turn.
///
/// The turn is wrapped into `[0, 1)` before rounding to 1/65536, so an
/// angle just short of a full turn can round up to exactly `1`.
///
/// `atan2(0, 0)` is `0.75`, which is why this is not simply
/// `atan2(-dy, dx) / TAU`.
pub fn atan2(dx: Fix32, dy: Fix32) -> Fix32 {
    let a = 0.75 + dx.to_f64().atan2(dy.to_f64()) / TAU;
    Fix32::from_f64(if a >= 1.0 { a - 1.0 } else { a })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn f(d: f64) -> Fix32 {
        Fix32::from_f64(d)
    }

    #[test]
    fn max_min() {
        assert_eq!(max(f(1.0), f(-2.0)), f(1.0));
        assert_eq!(min(f(1.0), f(-2.0)), f(-2.0));
    }

    #[test]
    fn mid_of_three() {
        assert_eq!(mid(f(3.0), f(1.0), f(2.0)), f(2.0));
        assert_eq!(mid(f(1.0), f(2.0), f(3.0)), f(2.0));
        assert_eq!(mid(f(2.0), f(3.0), f(1.0)), f(2.0));
        assert_eq!(mid(f(5.0), f(5.0), f(5.0)), f(5.0));
        assert_eq!(mid(f(5.0), f(5.0), f(1.0)), f(5.0));
        assert_eq!(mid(f(1.0), f(5.0), f(5.0)), f(5.0));
    }

    #[test]
    fn rounding() {
        assert_eq!(flr(f(-0.5)), f(-1.0));
        assert_eq!(ceil(f(-0.5)), f(0.0));
        assert_eq!(flr(f(2.999)), f(2.0));
        assert_eq!(ceil(f(2.001)), f(3.0));
    }

    #[test]
    fn abs_of_minimum_wraps() {
        assert_eq!(abs(Fix32::MIN), Fix32::MIN);
        assert_eq!(abs(f(-3.0)), f(3.0));
    }

    #[test]
    fn sgn_uses_sign_bit() {
        assert_eq!(sgn(f(0.0)), f(1.0));
        assert_eq!(sgn(f(-1.0)), f(-1.0));
        assert_eq!(sgn(Fix32::from_bits(-1)), f(-1.0));
        assert_eq!(sgn(f(0.5)), f(1.0));
    }

    #[test]
    fn sqrt_domain() {
        assert_eq!(sqrt(f(4.0)), f(2.0));
        assert_eq!(sqrt(f(2.25)), f(1.5));
        assert_eq!(sqrt(f(-1.0)), f(0.0));
        assert_eq!(sqrt(Fix32::from_bits(-1)), f(0.0));
        assert_eq!(sqrt(f(0.0)), f(0.0));
    }

    #[test]
    fn trig_is_clockwise_in_turns() {
        assert_eq!(cos(f(0.0)), f(1.0));
        assert_eq!(cos(f(0.5)), f(-1.0));
        assert_eq!(sin(f(0.25)), f(-1.0));
        assert_eq!(sin(f(0.75)), f(1.0));
        assert_eq!(sin(f(0.0)), f(0.0));
    }

    #[test]
    fn atan2_conventions() {
        assert_eq!(atan2(f(0.0), f(0.0)), f(0.75));
        assert_eq!(atan2(f(1.0), f(0.0)), f(0.0));
        assert_eq!(atan2(f(0.0), f(1.0)), f(0.75));
        assert_eq!(atan2(f(-1.0), f(0.0)), f(0.5));
        assert_eq!(atan2(f(0.0), f(-1.0)), f(0.25));
    }

    #[test]
    fn atan2_can_round_up_to_a_full_turn() {
        assert_eq!(atan2(f(32767.0), Fix32::from_bits(1)), Fix32::ONE);
    }
}
