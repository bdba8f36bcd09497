//! Call-expression lexer, parser and evaluator.
//!
//! This is the small language the `p8` binary reads: nested builtin calls
//! over literals.
//!
//! ```text
//! expr  := call | table | literal | "-" expr
//! call  := ident "(" [expr ("," expr)*] ")"
//! table := "{" [expr ("," expr)*] "}"
//! literal := number | string | "true" | "false" | "nil"
//! ```
//!
//! Numbers use the shared numeric lexer.  Strings are single- or
//! double-quoted with `\n \t \r \0 \\ \' \" \xHH \ddd` escapes and may hold
//! any byte.  As in the host language, a call that returns no value
//! contributes nothing when it is the last argument and `nil` elsewhere.

use crate::fix32::Fix32;
use crate::lexer;
use crate::numfmt;

use super::builtins::{call_builtin, BuiltinError};
use super::value::{Table, Value};

/// Error from parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected character {0:?} at offset {1}")]
    UnexpectedChar(char, usize),
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("expected {expected}, found {found}")]
    Expected { expected: &'static str, found: String },
    #[error("unknown name `{0}`")]
    UnknownName(String),
    #[error("cannot negate a {0}")]
    BadNegation(&'static str),
}

// ── Token ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(Fix32),
    Str(Vec<u8>),
    Ident(String),
    Minus,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(n) => format!("number {n}"),
            Token::Str(_) => "string".into(),
            Token::Ident(s) => format!("`{s}`"),
            Token::Minus => "`-`".into(),
            Token::Comma => "`,`".into(),
            Token::LParen => "`(`".into(),
            Token::RParen => "`)`".into(),
            Token::LBrace => "`{`".into(),
            Token::RBrace => "`}`".into(),
            Token::Eof => "end of input".into(),
        }
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer {
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ExprError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            let start = self.pos;
            let Some(c) = self.peek() else {
                out.push(Token::Eof);
                return Ok(out);
            };
            let tok = match c {
                b'-' => {
                    self.pos += 1;
                    Token::Minus
                }
                b',' => {
                    self.pos += 1;
                    Token::Comma
                }
                b'(' => {
                    self.pos += 1;
                    Token::LParen
                }
                b')' => {
                    self.pos += 1;
                    Token::RParen
                }
                b'{' => {
                    self.pos += 1;
                    Token::LBrace
                }
                b'}' => {
                    self.pos += 1;
                    Token::RBrace
                }
                b'"' | b'\'' => {
                    self.pos += 1;
                    self.read_string(c, start)?
                }
                b'0'..=b'9' | b'.' => match lexer::scan_number(&self.src[self.pos..]) {
                    Some((n, len)) => {
                        self.pos += len;
                        Token::Num(n)
                    }
                    None => return Err(ExprError::UnexpectedChar(c as char, start)),
                },
                c if c.is_ascii_alphabetic() || c == b'_' => {
                    while self
                        .peek()
                        .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
                    {
                        self.pos += 1;
                    }
                    let ident = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
                    Token::Ident(ident)
                }
                other => return Err(ExprError::UnexpectedChar(other as char, start)),
            };
            out.push(tok);
        }
    }

    fn read_string(&mut self, quote: u8, start: usize) -> Result<Token, ExprError> {
        let mut s = Vec::new();
        loop {
            match self.advance() {
                None => return Err(ExprError::UnterminatedString(start)),
                Some(c) if c == quote => return Ok(Token::Str(s)),
                Some(b'\\') => match self.advance() {
                    None => return Err(ExprError::UnterminatedString(start)),
                    Some(b'n') => s.push(b'\n'),
                    Some(b't') => s.push(b'\t'),
                    Some(b'r') => s.push(b'\r'),
                    Some(b'x') => s.push(self.read_hex_escape()),
                    Some(d @ b'0'..=b'9') => s.push(self.read_decimal_escape(d)),
                    Some(c) => s.push(c),
                },
                Some(c) => s.push(c),
            }
        }
    }

    /// `\xHH`: up to two hex digits.
    fn read_hex_escape(&mut self) -> u8 {
        let mut v: u32 = 0;
        for _ in 0..2 {
            match self.peek().and_then(|c| (c as char).to_digit(16)) {
                Some(d) => {
                    v = v * 16 + d;
                    self.pos += 1;
                }
                None => break,
            }
        }
        v as u8
    }

    /// `\ddd`: up to three decimal digits, wrapped to a byte.
    fn read_decimal_escape(&mut self, first: u8) -> u8 {
        let mut v = u32::from(first - b'0');
        for _ in 0..2 {
            match self.peek() {
                Some(d @ b'0'..=b'9') => {
                    v = v * 10 + u32::from(d - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        v as u8
    }
}

// ── AST ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Lit(Value),
    Neg(Box<Expr>),
    Table(Vec<Expr>),
    Call(String, Vec<Expr>),
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn next(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, want: Token, expected: &'static str) -> Result<(), ExprError> {
        let tok = self.next();
        if tok == want {
            Ok(())
        } else {
            Err(ExprError::Expected {
                expected,
                found: tok.describe(),
            })
        }
    }

    fn expr(&mut self) -> Result<Expr, ExprError> {
        match self.next() {
            Token::Num(n) => Ok(Expr::Lit(Value::Num(n))),
            Token::Str(s) => Ok(Expr::Lit(Value::Str(s))),
            Token::Minus => Ok(Expr::Neg(Box::new(self.expr()?))),
            Token::LBrace => Ok(Expr::Table(self.list(Token::RBrace, "`}`")?)),
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Lit(Value::Bool(true))),
                "false" => Ok(Expr::Lit(Value::Bool(false))),
                "nil" => Ok(Expr::Lit(Value::Nil)),
                _ => {
                    self.expect(Token::LParen, "`(`")?;
                    let args = self.list(Token::RParen, "`)`")?;
                    Ok(Expr::Call(name, args))
                }
            },
            other => Err(ExprError::Expected {
                expected: "expression",
                found: other.describe(),
            }),
        }
    }

    /// Comma-separated expressions up to and including `close`.
    fn list(&mut self, close: Token, close_desc: &'static str) -> Result<Vec<Expr>, ExprError> {
        let mut items = Vec::new();
        if *self.peek() == close {
            self.next();
            return Ok(items);
        }
        loop {
            items.push(self.expr()?);
            match self.next() {
                Token::Comma => continue,
                tok if tok == close => return Ok(items),
                other => {
                    return Err(ExprError::Expected {
                        expected: close_desc,
                        found: other.describe(),
                    })
                }
            }
        }
    }
}

/// Parse a complete expression.
pub fn parse(src: &str) -> Result<Expr, ExprError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut p = Parser { tokens, pos: 0 };
    let e = p.expr()?;
    p.expect(Token::Eof, "end of input")?;
    Ok(e)
}

// ── Evaluation ────────────────────────────────────────────────────────────────

impl Expr {
    /// Evaluate; `Ok(None)` is "no value".
    pub fn eval(&self) -> Result<Option<Value>, ExprError> {
        match self {
            Expr::Lit(v) => Ok(Some(v.clone())),
            Expr::Neg(inner) => match inner.eval()?.unwrap_or_default() {
                Value::Num(n) => Ok(Some(Value::Num(-n))),
                other => Err(ExprError::BadNegation(other.type_name())),
            },
            Expr::Table(items) => Ok(Some(Value::from(Table::from_seq(eval_list(items)?)))),
            Expr::Call(name, args) => {
                let args = eval_list(args)?;
                call_builtin(name, &args).map_err(|e| match e {
                    BuiltinError::Unknown(name) => ExprError::UnknownName(name),
                })
            }
        }
    }
}

/// Evaluate an argument list with the host's multiple-value rules.
fn eval_list(items: &[Expr]) -> Result<Vec<Value>, ExprError> {
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.eval()? {
            Some(v) => out.push(v),
            None if i + 1 < items.len() => out.push(Value::Nil),
            None => {}
        }
    }
    Ok(out)
}

/// Parse and evaluate in one step.
pub fn eval_str(src: &str) -> Result<Option<Value>, ExprError> {
    parse(src)?.eval()
}

/// Render a result for display.  Numbers honour `hex`; strings print raw;
/// sequences print as `{a, b, …}` with string elements quoted; no value
/// prints as `nil`.
pub fn render(result: Option<&Value>, hex: bool) -> String {
    match result {
        None => "nil".to_owned(),
        Some(v) => render_value(v, hex, false),
    }
}

fn render_value(v: &Value, hex: bool, nested: bool) -> String {
    match v {
        Value::Num(n) if hex => numfmt::hex(*n).as_str().to_owned(),
        Value::Num(n) => numfmt::decimal(*n).as_str().to_owned(),
        Value::Str(s) if nested => format!("{:?}", String::from_utf8_lossy(s)),
        Value::Str(s) => String::from_utf8_lossy(s).into_owned(),
        Value::Table(t) if t.call_tostring().is_none() => {
            let items: Vec<String> = t.iter().map(|e| render_value(e, hex, true)).collect();
            format!("{{{}}}", items.join(", "))
        }
        other => {
            let bytes = super::convert::tostr(Some(other), false);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
