//! skicl evaluator.
//!
//! Evaluation is interleaved with tokenizing; there is no parse tree.
//! [`eval`] pulls tokens for one line, building a flat argument list:
//!
//! -   `$name` is replaced by the variable's value.
//! -   `[ ... ]` is re-joined into text and evaluated on the spot, in the same
//!     namespace; its result becomes one argument.
//! -   Anything else is an argument as-is.
//!
//! The first argument names the command, which is then dispatched: to a
//! procedure (against a copy of the namespace) or to a primitive (against the
//! namespace itself).
//!
//! Nested blocks and procedure calls recurse on the native stack.
//! Deep enough nesting will overflow it; there is no guard against that.

use crate::data::{Command, Namespace, Procedure};
use crate::reader::Tokenizer;

mod builtins;
mod load;

pub use builtins::BUILTINS;
pub use load::{load, resolve_script};


/// Evaluation errors.
///
/// Any of these aborts the whole evaluation unit, through every nested block
/// and procedure call; the REPL or the file loader reports it.
#[derive(Debug)]
pub enum Error {
    /// `$name` with no such variable.
    UndeclaredIdentifier(String),
    /// Neither a procedure nor a primitive.
    UndeclaredCommand(String),
    /// Wrong number of arguments to the named command.
    ArityMismatch(String),
    /// An argument that should have been a number, but wasn't.
    InvalidNumericArgument(String),
    /// A block that was never closed. Holds the text collected so far.
    SyntaxError(String),
    /// Failure to write output or read input.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UndeclaredIdentifier(name) => write!(f, "undeclared identifier {name}"),
            Error::UndeclaredCommand(name) => write!(f, "undeclared command {name}"),
            Error::ArityMismatch(cmd) => write!(f, "wrong number of arguments in {cmd}"),
            Error::InvalidNumericArgument(arg) => write!(f, "invalid argument {arg}"),
            Error::SyntaxError(code) => write!(f, "invalid syntax in {code}"),
            Error::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value)
    }
}

/// Evaluate one line from the token stream.
///
/// Stops after a newline token or at the end of the stream.
/// A line with no arguments (blank, or only a comment) evaluates to the empty string.
pub fn eval<I>(tokens: &mut Tokenizer<I>, nspace: &mut Namespace) -> Result<String, Error>
where
    I: Iterator<Item = char>,
{
    Ok(eval_line(tokens, nspace)?.unwrap_or_default())
}

/// Evaluate every line of the token stream, returning the value of the last one.
///
/// A blank or comment-only last line makes the result empty. The newline that
/// ends the final line doesn't start another one.
pub fn eval_body<I>(tokens: &mut Tokenizer<I>, nspace: &mut Namespace) -> Result<String, Error>
where
    I: Iterator<Item = char>,
{
    let mut result = String::new();
    while !tokens.is_exhausted() {
        result = eval(tokens, nspace)?;
    }
    Ok(result)
}

/// Evaluate source text as a body; see [`eval_body`].
pub fn eval_str(code: &str, nspace: &mut Namespace) -> Result<String, Error> {
    eval_body(&mut Tokenizer::new(code.chars()), nspace)
}

/// Evaluate one line; None if there was no command on it.
fn eval_line<I>(tokens: &mut Tokenizer<I>, nspace: &mut Namespace) -> Result<Option<String>, Error>
where
    I: Iterator<Item = char>,
{
    let mut block: Vec<String> = Vec::new();
    while let Some(token) = tokens.next() {
        if token.is_empty() {
            continue;
        }
        if token == "\n" {
            break;
        }
        if let Some(name) = token.strip_prefix('$') {
            let value = nspace
                .variable(name)
                .ok_or_else(|| Error::UndeclaredIdentifier(name.to_owned()))?;
            block.push(value.to_owned());
        } else if token == "[" {
            let code = collect_block(tokens)?;
            let value = eval(&mut Tokenizer::new(code.chars()), nspace)?;
            block.push(value);
        } else {
            block.push(token);
        }
    }

    if block.is_empty() {
        return Ok(None);
    }
    let command = block.remove(0);
    dispatch(&command, &block, nspace).map(Some)
}

/// Collect the tokens of a block, up to its matching `]`, joined by spaces.
/// The opening `[` has already been consumed.
fn collect_block<I>(tokens: &mut Tokenizer<I>) -> Result<String, Error>
where
    I: Iterator<Item = char>,
{
    let mut code = String::new();
    let mut depth = 0usize;
    for token in tokens.by_ref() {
        match token.as_str() {
            "]" if depth == 0 => return Ok(code),
            "]" => depth -= 1,
            "[" => depth += 1,
            _ => (),
        }
        code.push_str(&token);
        code.push(' ');
    }
    Err(Error::SyntaxError(code))
}

/// Run the named command with these arguments.
pub fn dispatch(command: &str, args: &[String], nspace: &mut Namespace) -> Result<String, Error> {
    match nspace.resolve(command) {
        Command::Procedure(procedure) => {
            tracing::trace!(command, args = args.len(), "calling procedure");
            call_procedure(command, &procedure, args, nspace)
        }
        Command::Primitive(builtin) => {
            tracing::trace!(command, args = args.len(), "calling primitive");
            builtin(args, nspace)
        }
        Command::Unbound => Err(Error::UndeclaredCommand(command.to_owned())),
    }
}

/// Call a procedure: bind the arguments in a copy of the caller's namespace,
/// then run the body there.
fn call_procedure(
    command: &str,
    procedure: &Procedure,
    args: &[String],
    nspace: &Namespace,
) -> Result<String, Error> {
    let params: Vec<String> = Tokenizer::new(procedure.params.chars())
        .filter(|p| !p.is_empty() && p != "\n")
        .collect();
    if params.len() != args.len() {
        return Err(Error::ArityMismatch(command.to_owned()));
    }

    let mut scope = nspace.clone();
    for (param, arg) in params.into_iter().zip(args) {
        scope.set_variable(param, arg.as_str());
    }
    eval_body(&mut Tokenizer::new(procedure.body.chars()), &mut scope)
}
