//! Loading script files.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::{eval_body, Error};
use crate::data::Namespace;
use crate::reader::{Chars, Tokenizer};

/// Find and open a script: first relative to the working directory,
/// then in the library directory (if configured).
///
/// Returns None if neither exists.
pub fn resolve_script(name: &str, library_dir: Option<&Path>) -> Option<(PathBuf, File)> {
    let candidates = std::iter::once(PathBuf::from(name))
        .chain(library_dir.map(|dir| dir.join(name)));
    for path in candidates {
        match File::open(&path) {
            Ok(file) => {
                tracing::debug!("loading {}", path.display());
                return Some((path, file));
            }
            Err(e) => tracing::debug!("can't open {}: {e}", path.display()),
        }
    }
    None
}

/// Evaluate the named script in this namespace, returning its last value.
///
/// A script that can't be found evaluates to the empty string; that isn't an error.
/// Errors inside the script abort the rest of it.
pub fn load(name: &str, nspace: &mut Namespace) -> Result<String, Error> {
    let library_dir = nspace.config().library_dir.clone();
    let Some((_, file)) = resolve_script(name, library_dir.as_deref()) else {
        tracing::debug!("script {name} not found");
        return Ok(String::new());
    };
    let mut tokens = Tokenizer::new(Chars::new(BufReader::new(file)));
    eval_body(&mut tokens, nspace)
}
