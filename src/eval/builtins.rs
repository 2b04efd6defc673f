use crate::data::number::{self, Real};
use crate::data::{Builtin, Namespace, Procedure};
use crate::eval::{load, Error};

use std::io::Write;

/// The primitives every top-level namespace starts with.
///
/// Anything here can be shadowed by a procedure of the same name;
/// procedures are checked first.
pub const BUILTINS: &[(&str, Builtin)] = &[
    ("puts", builtin_puts),
    ("set", builtin_set),
    ("proc", builtin_proc),
    ("load", builtin_load),
    ("+", builtin_add),
    ("-", builtin_sub),
    ("*", builtin_mul),
    ("/", builtin_div),
    ("<", builtin_lt),
    (">", builtin_gt),
    ("<=", builtin_le),
    (">=", builtin_ge),
    ("==", builtin_eq),
];

/// Check that a primitive got exactly N arguments.
fn get_args<'a, const N: usize>(
    command: &str,
    args: &'a [String],
) -> Result<&'a [String; N], Error> {
    args.try_into()
        .map_err(|_| Error::ArityMismatch(command.to_owned()))
}

/// Write the argument, and a newline, to the namespace's output.
fn builtin_puts(args: &[String], nspace: &mut Namespace) -> Result<String, Error> {
    let [text] = get_args::<1>("puts", args)?;
    writeln!(nspace.output(), "{text}")?;
    Ok(String::new())
}

/// Bind a variable in the current namespace; returns the value.
fn builtin_set(args: &[String], nspace: &mut Namespace) -> Result<String, Error> {
    let [name, value] = get_args::<2>("set", args)?;
    nspace.set_variable(name.as_str(), value.as_str());
    Ok(value.clone())
}

/// Define a procedure in the current namespace; returns its name.
///
/// Neither the parameter list nor the body is checked until the procedure is called.
fn builtin_proc(args: &[String], nspace: &mut Namespace) -> Result<String, Error> {
    let [name, params, body] = get_args::<3>("proc", args)?;
    nspace.define_procedure(
        name.as_str(),
        Procedure {
            params: params.clone(),
            body: body.clone(),
        },
    );
    Ok(name.clone())
}

/// Evaluate a script file into the current namespace.
fn builtin_load(args: &[String], nspace: &mut Namespace) -> Result<String, Error> {
    let [name] = get_args::<1>("load", args)?;
    load(name, nspace)
}

fn to_number(s: &str) -> Result<Real, Error> {
    number::parse(s).ok_or_else(|| Error::InvalidNumericArgument(s.to_owned()))
}

/// Get the two numeric arguments of a binary operator.
fn get_operands(command: &str, args: &[String]) -> Result<(Real, Real), Error> {
    let [a, b] = get_args::<2>(command, args)?;
    Ok((to_number(a)?, to_number(b)?))
}

fn arithmetic(command: &str, args: &[String], op: fn(Real, Real) -> Real) -> Result<String, Error> {
    let (a, b) = get_operands(command, args)?;
    Ok(number::format(op(a, b)))
}

fn comparison(
    command: &str,
    args: &[String],
    op: fn(&Real, &Real) -> bool,
) -> Result<String, Error> {
    let (a, b) = get_operands(command, args)?;
    Ok(number::truth(op(&a, &b)))
}

fn builtin_add(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    arithmetic("+", args, |a, b| a + b)
}

fn builtin_sub(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    arithmetic("-", args, |a, b| a - b)
}

fn builtin_mul(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    arithmetic("*", args, |a, b| a * b)
}

// Division by zero is not an error: it gives inf or NaN.
fn builtin_div(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    arithmetic("/", args, |a, b| a / b)
}

fn builtin_lt(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    comparison("<", args, Real::lt)
}

fn builtin_gt(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    comparison(">", args, Real::gt)
}

fn builtin_le(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    comparison("<=", args, Real::le)
}

fn builtin_ge(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    comparison(">=", args, Real::ge)
}

fn builtin_eq(args: &[String], _: &mut Namespace) -> Result<String, Error> {
    comparison("==", args, Real::eq)
}
