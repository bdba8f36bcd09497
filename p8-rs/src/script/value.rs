//! Runtime value type seen by the builtins.
//!
//! The host engine is dynamically typed; builtins receive a slice of
//! [`Value`]s where a missing trailing element means "argument not
//! supplied" (distinct from an explicit [`Value::Nil`]), and answer with
//! `Option<Value>`, `None` meaning "no value".
//!
//! Strings are raw bytes.  Nothing here is Unicode-aware.

use std::fmt;
use std::sync::Arc;

use crate::fix32::Fix32;
use crate::lexer;

/// Override installed on a table, the equivalent of a `__tostring`
/// metamethod.
pub type TostringFn = Arc<dyn Fn(&Table) -> Vec<u8> + Send + Sync>;

/// A script runtime value.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Num(Fix32),
    Str(Vec<u8>),
    Table(Arc<Table>),
    Function(Arc<Function>),
    /// Any host type this layer has no model for, by type name.
    Other(&'static str),
}

impl Value {
    /// Build a string value from anything byte-like.
    pub fn str(s: impl AsRef<[u8]>) -> Self {
        Value::Str(s.as_ref().to_vec())
    }

    pub fn num(d: f64) -> Self {
        Value::Num(Fix32::from_f64(d))
    }

    /// Name of the type, as the host reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Num(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::Function(_) => "function",
            Value::Other(name) => *name,
        }
    }

    /// Host truthiness: only `nil` and `false` are falsy.
    pub fn truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Numeric view: numbers, and strings that read as a numeric literal.
    pub fn as_number(&self) -> Option<Fix32> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => lexer::parse_number(s),
            _ => None,
        }
    }

    /// Host to-number coercion; anything non-numeric becomes 0.
    pub fn to_number(&self) -> Fix32 {
        self.as_number().unwrap_or(Fix32::ZERO)
    }

    /// Host to-string coercion: strings as-is, numbers in decimal form.
    pub fn as_bytes(&self) -> Option<std::borrow::Cow<'_, [u8]>> {
        match self {
            Value::Str(s) => Some(std::borrow::Cow::Borrowed(s.as_slice())),
            Value::Num(n) => Some(std::borrow::Cow::Owned(
                crate::numfmt::decimal(*n).as_bytes().to_vec(),
            )),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// `"table: 0x…"` style identity string used for debug output.
    pub fn debug_repr(&self) -> String {
        match self {
            Value::Table(t) => format!("table: {:p}", Arc::as_ptr(t)),
            Value::Function(func) => format!("function: {:p}", Arc::as_ptr(func)),
            other => format!("{other:?}"),
        }
    }
}

/// Argument accessors shared by the builtins.  A missing argument reads as
/// absent; the `*_arg` helpers apply host coercions.
pub(crate) fn arg(args: &[Value], idx: usize) -> Option<&Value> {
    args.get(idx)
}

pub(crate) fn num_arg(args: &[Value], idx: usize) -> Fix32 {
    args.get(idx).map(Value::to_number).unwrap_or(Fix32::ZERO)
}

pub(crate) fn bool_arg(args: &[Value], idx: usize) -> bool {
    args.get(idx).is_some_and(Value::truthy)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => Arc::ptr_eq(a, b) || a.seq == b.seq,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Other(a), Value::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{:?}", String::from_utf8_lossy(s)),
            Value::Table(t) => write!(f, "{t:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Other(name) => write!(f, "<{name}>"),
        }
    }
}

impl From<Fix32> for Value {
    fn from(n: Fix32) -> Self {
        Value::Num(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::num(d)
    }
}

impl From<i16> for Value {
    fn from(n: i16) -> Self {
        Value::Num(Fix32::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(s: Vec<u8>) -> Self {
        Value::Str(s)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(Arc::new(t))
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

/// Table-like value.  Only the sequence part is modelled: positional keys
/// `1..=len`, the host's array convention.
#[derive(Clone, Default)]
pub struct Table {
    seq: Vec<Value>,
    tostring: Option<TostringFn>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seq(seq: Vec<Value>) -> Self {
        Table { seq, tostring: None }
    }

    /// Attach a `__tostring`-style override.
    pub fn with_tostring(
        mut self,
        f: impl Fn(&Table) -> Vec<u8> + Send + Sync + 'static,
    ) -> Self {
        self.tostring = Some(Arc::new(f));
        self
    }

    /// Run the `__tostring` override, if any.
    pub fn call_tostring(&self) -> Option<Vec<u8>> {
        self.tostring.as_ref().map(|f| f(self))
    }

    /// Append at key `len + 1`.
    pub fn push(&mut self, v: Value) {
        self.seq.push(v);
    }

    /// 1-based positional lookup.
    pub fn get(&self, key: usize) -> Option<&Value> {
        key.checked_sub(1).and_then(|i| self.seq.get(i))
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.seq.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.seq
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.seq.iter()).finish()
    }
}

// ── Function ──────────────────────────────────────────────────────────────────

/// Function-like value.  The builtins never call these; they only need the
/// identity for `tostr`.
#[derive(Debug)]
pub struct Function {
    pub name: String,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Function { name: name.into() })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
