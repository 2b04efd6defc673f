//! skicl data: the namespace, and the values it holds.
//!
//! Every value is a string. A [`Namespace`] maps names to three kinds of things,
//! each in its own table, so one name can be a variable, a procedure, and a
//! primitive all at once:
//! -   variables: name to string value
//! -   procedures: name to (parameter list, body), both unparsed script text
//! -   primitives: name to native [`Builtin`]
//!
//! Namespaces have value semantics. A procedure call runs against a clone of
//! its caller's namespace, so nothing the callee binds is visible afterwards.
//! Only the output sink is shared between clones.

pub mod number;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;

use crate::eval::Error;

/// A native operation.
///
/// Primitives receive the current namespace, not a copy:
/// whatever they change is visible to the caller.
pub type Builtin = fn(args: &[String], nspace: &mut Namespace) -> Result<String, Error>;

/// A user-defined command: unparsed parameter list and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    pub params: String,
    pub body: String,
}

/// What a command name resolves to.
#[derive(Debug)]
pub enum Command {
    Procedure(Procedure),
    Primitive(Builtin),
    Unbound,
}

/// Configuration for loading script files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Searched by `load` when a name isn't found relative to the working directory.
    pub library_dir: Option<PathBuf>,
}

impl Config {
    /// Name of the library directory, under the user's home directory.
    pub const LIBRARY_DIR: &'static str = ".skicl";

    /// Library directory is `$HOME/.skicl`; no fallback if `HOME` is unset.
    pub fn from_env() -> Self {
        Config {
            library_dir: std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(Self::LIBRARY_DIR)),
        }
    }
}

/// Where `puts` writes. Cloning shares the underlying writer.
#[derive(Clone)]
pub struct Output(Rc<RefCell<dyn Write>>);

impl Output {
    pub fn new(writer: impl Write + 'static) -> Self {
        Output(Rc::new(RefCell::new(writer)))
    }

    pub fn stdout() -> Self {
        Output::new(std::io::stdout())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.borrow_mut().flush()
    }
}

impl std::fmt::Debug for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Output")
    }
}

#[derive(Debug, Clone)]
pub struct Namespace {
    variables: HashMap<String, String>,
    procedures: HashMap<String, Procedure>,
    primitives: HashMap<String, Builtin>,

    output: Output,
    config: Config,
}

impl Default for Namespace {
    /// An empty namespace: no primitives, writing to stdout, no library directory.
    fn default() -> Self {
        Namespace {
            variables: Default::default(),
            procedures: Default::default(),
            primitives: Default::default(),
            output: Output::stdout(),
            config: Default::default(),
        }
    }
}

impl Namespace {
    /// A top-level namespace: all builtins registered, configured from the environment.
    pub fn new() -> Self {
        let mut nspace = Namespace::default().with_config(Config::from_env());
        for (name, builtin) in crate::eval::BUILTINS {
            nspace.register(*name, *builtin);
        }
        nspace
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn output(&mut self) -> &mut Output {
        &mut self.output
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register a primitive under the given name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, builtin: Builtin) {
        self.primitives.insert(name.into(), builtin);
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.get(name)
    }

    pub fn define_procedure(&mut self, name: impl Into<String>, procedure: Procedure) {
        self.procedures.insert(name.into(), procedure);
    }

    /// Look up a command name. Procedures shadow primitives.
    pub fn resolve(&self, name: &str) -> Command {
        if let Some(procedure) = self.procedure(name) {
            Command::Procedure(procedure.clone())
        } else if let Some(builtin) = self.primitives.get(name) {
            Command::Primitive(*builtin)
        } else {
            Command::Unbound
        }
    }
}
