//! Read-eval-print loop.

use std::io::{BufRead, Write};

use crate::data::Namespace;
use crate::eval::eval;
use crate::reader::{Chars, Tokenizer};

pub const PROMPT: &str = ">> ";

/// Printed before the first prompt of an interactive session.
pub fn banner() -> String {
    format!(
        "[skicl, ver {}]\n\na tiny tcl dialect\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Evaluate `input` one line at a time against `nspace`, until it runs out.
///
/// Each value is written to `output`, after a prompt;
/// each evaluation error goes to `errors`, and the loop carries on.
/// The namespace keeps whatever a failed line managed to change.
///
/// Only failures writing to `output`/`errors` end the loop early.
pub fn repl(
    input: impl BufRead,
    nspace: &mut Namespace,
    output: &mut impl Write,
    errors: &mut impl Write,
) -> std::io::Result<()> {
    let mut tokens = Tokenizer::new(Chars::new(input));
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        if tokens.is_exhausted() {
            writeln!(output)?;
            return Ok(());
        }
        match eval(&mut tokens, nspace) {
            Ok(value) => writeln!(output, "{value}")?,
            Err(e) => {
                // Don't evaluate the rest of a line that failed.
                tokens.skip_line();
                writeln!(errors, "error: {e}")?;
            }
        }
    }
}
