//! Numbers, on demand.
//!
//! Values are strings; arithmetic primitives parse their arguments here
//! and format their results back. Parsing is strict: the whole string must
//! be a decimal number, so `"3x"`, `" 3"` and `""` are all rejected.
//! (`str::parse::<f64>` alone would also accept `inf` and `NaN`.)

use regex::Regex;
use std::sync::OnceLock;

pub type Real = f64;

fn number() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r#"\A[+-]?([0-9]+[.]?[0-9]*|[.][0-9]+)([eE][+-]?[0-9]+)?\z"#)
            .expect("could not compile regex for number")
    })
}

/// Parse the entire string as a number.
pub fn parse(s: &str) -> Option<Real> {
    if !number().is_match(s) {
        return None;
    }
    s.parse().ok()
}

/// Render a number as a value: shortest decimal that reads back the same.
pub fn format(n: Real) -> String {
    n.to_string()
}

/// Render a truth value as a value: `1` or `0`.
pub fn truth(b: bool) -> String {
    let digit = if b { "1" } else { "0" };
    digit.to_owned()
}
