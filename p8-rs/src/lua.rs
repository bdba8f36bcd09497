//! Optional Lua 5.4 host via the `mlua` crate.
//!
//! Enabled with the `lua` Cargo feature:
//! ```text
//! cargo build --features lua
//! cargo test  --features lua
//! ```
//!
//! [`register`] installs every builtin from [`BUILTINS`](crate::script::BUILTINS)
//! as a global function.  Lua numbers are converted to [`Fix32`](crate::Fix32)
//! on the way in and back to floats on the way out; strings cross as raw
//! bytes.  A builtin answering "no value" returns zero results, so
//! `select('#', tonum('x'))` is `0`.
//!
//! `tostr` on tables and functions is answered by Lua itself, which is what
//! honours `__tostring` metamethods and produces the `table: 0x…` form.

#[cfg(feature = "lua")]
pub use lua_impl::{register, Pico8Lua};

#[cfg(feature = "lua")]
mod lua_impl {
    use mlua::prelude::*;

    use crate::fix32::Fix32;
    use crate::script::value::{Function, Table, Value};
    use crate::script::BUILTINS;

    /// Register all builtins in the globals table of `lua`.
    pub fn register(lua: &Lua) -> LuaResult<()> {
        let globals = lua.globals();
        for &(name, f) in BUILTINS {
            let func = lua.create_function(move |lua, args: LuaVariadic<LuaValue>| {
                if name == "tostr" {
                    if let Some(s) = tostr_native(lua, &args)? {
                        return Ok(LuaVariadic::from(vec![s]));
                    }
                }
                let args: Vec<Value> = args.iter().map(from_lua).collect();
                match f(&args) {
                    Some(v) => Ok(LuaVariadic::from(vec![into_lua(lua, v)?])),
                    None => Ok(LuaVariadic::new()),
                }
            })?;
            globals.set(name, func)?;
        }
        tracing::debug!(count = BUILTINS.len(), "registered builtins");
        Ok(())
    }

    /// `tostr` cases that need the Lua state: tables with a `__tostring`
    /// metamethod, and tables or functions in hex mode.
    fn tostr_native(lua: &Lua, args: &[LuaValue]) -> LuaResult<Option<LuaValue>> {
        let hex = args.get(1).is_some_and(|v| !matches!(v, LuaValue::Nil | LuaValue::Boolean(false)));
        let use_lua = match args.first() {
            Some(LuaValue::Table(t)) => {
                let has_meta = match t.metatable() {
                    Some(mt) => !mt.raw_get::<LuaValue>("__tostring")?.is_nil(),
                    None => false,
                };
                has_meta || hex
            }
            Some(LuaValue::Function(_)) => hex,
            _ => false,
        };
        if !use_lua {
            return Ok(None);
        }
        let tostring: LuaFunction = lua.globals().get("tostring")?;
        tostring.call::<LuaValue>(args[0].clone()).map(Some)
    }

    fn from_lua(v: &LuaValue) -> Value {
        match v {
            LuaValue::Nil => Value::Nil,
            LuaValue::Boolean(b) => Value::Bool(*b),
            LuaValue::Integer(i) => Value::Num(Fix32::from_f64(*i as f64)),
            LuaValue::Number(d) => Value::Num(Fix32::from_f64(*d)),
            LuaValue::String(s) => Value::Str(s.as_bytes().to_vec()),
            LuaValue::Table(_) => Value::from(Table::new()),
            LuaValue::Function(_) => Value::Function(Function::new("lua")),
            other => Value::Other(other.type_name()),
        }
    }

    fn into_lua(lua: &Lua, v: Value) -> LuaResult<LuaValue> {
        Ok(match v {
            Value::Nil | Value::Function(_) | Value::Other(_) => LuaValue::Nil,
            Value::Bool(b) => LuaValue::Boolean(b),
            Value::Num(n) => LuaValue::Number(n.to_f64()),
            Value::Str(s) => LuaValue::String(lua.create_string(&s)?),
            Value::Table(t) => {
                let tbl = lua.create_table()?;
                for (i, item) in t.iter().enumerate() {
                    tbl.raw_set(i as i64 + 1, into_lua(lua, item.clone())?)?;
                }
                LuaValue::Table(tbl)
            }
        })
    }

    // ── Pico8Lua ──────────────────────────────────────────────────────────

    /// A Lua 5.4 state with the builtins pre-registered.
    pub struct Pico8Lua {
        lua: Lua,
    }

    impl Pico8Lua {
        pub fn new() -> LuaResult<Self> {
            let lua = Lua::new();
            register(&lua)?;
            Ok(Self { lua })
        }

        /// Execute a chunk.
        pub fn exec(&self, chunk: &str) -> LuaResult<()> {
            self.lua.load(chunk).exec()
        }

        /// Evaluate a chunk and convert its results.
        pub fn eval<R: FromLuaMulti>(&self, chunk: &str) -> LuaResult<R> {
            self.lua.load(chunk).eval()
        }

        pub fn lua(&self) -> &Lua {
            &self.lua
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
