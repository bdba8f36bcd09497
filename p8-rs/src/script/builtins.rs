//! Builtin registry.
//!
//! Each builtin receives the already-evaluated positional arguments and
//! returns `Some(value)` or `None` for "no value".  Builtins never fail:
//! irregular input degrades to a fallback value or to `None`.
//!
//! [`BUILTINS`] is the name table in registration order.  It is immutable
//! and shared by every caller; [`lookup`] indexes it through a map built on
//! first use.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::fix32::Fix32;

use super::value::{arg, bool_arg, num_arg, Value};
use super::{bitwise, convert, math, split};

/// Signature shared by all builtins.
pub type BuiltinFn = fn(&[Value]) -> Option<Value>;

/// Error from [`call_builtin`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuiltinError {
    #[error("unknown builtin: {0}")]
    Unknown(String),
}

/// Every builtin, in registration order.
pub static BUILTINS: &[(&str, BuiltinFn)] = &[
    // ── Math ─────────────────────────────────────────────────────────────
    ("max", |a| binary(a, math::max)),
    ("min", |a| binary(a, math::min)),
    ("mid", |a| num(math::mid(num_arg(a, 0), num_arg(a, 1), num_arg(a, 2)))),
    ("ceil", |a| unary(a, math::ceil)),
    ("flr", |a| unary(a, math::flr)),
    ("cos", |a| unary(a, math::cos)),
    ("sin", |a| unary(a, math::sin)),
    ("atan2", |a| binary(a, math::atan2)),
    ("sqrt", |a| unary(a, math::sqrt)),
    ("abs", |a| unary(a, math::abs)),
    ("sgn", |a| unary(a, math::sgn)),
    // ── Bitwise ──────────────────────────────────────────────────────────
    ("band", |a| binary(a, bitwise::band)),
    ("bor", |a| binary(a, bitwise::bor)),
    ("bxor", |a| binary(a, bitwise::bxor)),
    ("bnot", |a| unary(a, bitwise::bnot)),
    ("shl", |a| binary(a, bitwise::shl)),
    ("shr", |a| binary(a, bitwise::shr)),
    ("lshr", |a| binary(a, bitwise::lshr)),
    ("rotl", |a| binary(a, bitwise::rotl)),
    ("rotr", |a| binary(a, bitwise::rotr)),
    // ── Strings ──────────────────────────────────────────────────────────
    ("tostr", |a| Some(Value::Str(convert::tostr(arg(a, 0), bool_arg(a, 1))))),
    ("tonum", |a| convert::tonum(arg(a, 0)).map(Value::Num)),
    ("chr", |a| Some(Value::Str(convert::chr(num_arg(a, 0))))),
    ("ord", |a| convert::ord(arg(a, 0), arg(a, 1)).map(Value::Num)),
    ("split", split_builtin),
];

fn num(n: Fix32) -> Option<Value> {
    Some(Value::Num(n))
}

fn unary(args: &[Value], f: fn(Fix32) -> Fix32) -> Option<Value> {
    num(f(num_arg(args, 0)))
}

fn binary(args: &[Value], f: fn(Fix32, Fix32) -> Fix32) -> Option<Value> {
    num(f(num_arg(args, 0), num_arg(args, 1)))
}

/// `split(str, [delimiter], [convert])`.  `convert` defaults to true only
/// when omitted; an explicit `nil` turns it off.
fn split_builtin(args: &[Value]) -> Option<Value> {
    let haystack = arg(args, 0)?.as_bytes()?;
    let delim = split::Delimiter::from_arg(arg(args, 1));
    let convert = arg(args, 2).map_or(true, Value::truthy);
    Some(Value::Table(Arc::new(split::split(&haystack, delim, convert))))
}

fn index() -> &'static HashMap<&'static str, BuiltinFn> {
    static INDEX: OnceLock<HashMap<&'static str, BuiltinFn>> = OnceLock::new();
    INDEX.get_or_init(|| BUILTINS.iter().copied().collect())
}

/// Resolve a builtin by name.
pub fn lookup(name: &str) -> Option<BuiltinFn> {
    index().get(name).copied()
}

/// Names of all builtins, in registration order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|&(name, _)| name)
}

/// Dispatch a builtin call by name.
///
/// `Ok(None)` is the builtin answering "no value"; `Err` means the name is
/// not a builtin.
pub fn call_builtin(name: &str, args: &[Value]) -> Result<Option<Value>, BuiltinError> {
    match lookup(name) {
        Some(f) => Ok(f(args)),
        None => {
            tracing::debug!(name, "unknown builtin");
            Err(BuiltinError::Unknown(name.to_owned()))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
