//! Script builtins.
//!
//! The functions a PICO-8 style script engine exposes for numbers and
//! strings:
//!
//! - math: `max min mid ceil flr abs sgn sqrt cos sin atan2`
//! - bitwise: `band bor bxor bnot shl shr lshr rotl rotr`
//! - conversion: `tostr tonum chr ord`
//! - tokenizer: `split`
//!
//! The engine itself (value storage, call stack, globals) is outside this
//! crate; it hands each builtin a slice of [`Value`]s and takes back one
//! value or none.
//!
//! # Quick start
//!
//! ```rust
//! use p8::script::{call_builtin, Value};
//!
//! let r = call_builtin("tostr", &[Value::num(1.5), Value::Bool(true)]).unwrap();
//! assert_eq!(r, Some(Value::str("0x0001.8000")));
//!
//! let r = call_builtin("tonum", &[Value::str("not a number")]).unwrap();
//! assert_eq!(r, None);
//! ```

pub mod bitwise;
pub mod builtins;
pub mod convert;
pub mod expr;
pub mod math;
pub mod split;
pub mod value;

// Re-exports for convenience.
pub use builtins::{call_builtin, lookup, BuiltinError, BuiltinFn, BUILTINS};
pub use expr::{eval_str, ExprError};
pub use value::{Function, Table, Value};
