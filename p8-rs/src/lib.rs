//! PICO-8 compatible numbers and script builtins.
//!
//! - [`fix32`]: the Q16.16 number type with the console's wrapping,
//!   division and shift rules
//! - [`lexer`] / [`numfmt`]: numeric literal parsing and number formatting
//! - [`script`]: the builtin functions and their registry
//! - [`lua`]: registration into an `mlua` state (feature `lua`)
//! - [`cli`] / [`config`]: support for the `p8` calculator binary

pub mod cli;
pub mod config;
pub mod fix32;
pub mod lexer;
pub mod lua;
pub mod numfmt;
pub mod script;

pub use fix32::Fix32;
