//! skicl: a tiny Tcl dialect.
//!
//! Scripts are read a token at a time and evaluated a line at a time;
//! every value is a string. See [`eval`] for the evaluation rules and
//! [`data::Namespace`] for how names are bound.

pub mod data;
pub mod eval;
pub mod reader;
mod repl;

pub use data::Namespace;
pub use eval::{eval_str, load, Error};
pub use repl::{banner, repl, PROMPT};
