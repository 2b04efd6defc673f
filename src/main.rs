//! skicl interpreter.
//!
//! With no arguments, starts an interactive session on stdin.
//! Otherwise, evaluates each named script in turn, all in one namespace.
//!
//! ```ignore
//! skicl                   # interactive
//! skicl lib.tcl main.tcl  # batch
//! RUST_LOG=skicl=trace skicl script.tcl
//! ```

use std::process::ExitCode;

use skicl::{Error, Namespace};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr, so they never mix with script output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let files: Vec<String> = std::env::args().skip(1).collect();
    let mut nspace = Namespace::new();

    if files.is_empty() {
        println!("{}", skicl::banner());
        let stdin = std::io::stdin().lock();
        if let Err(e) = skicl::repl(
            stdin,
            &mut nspace,
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        ) {
            tracing::error!("REPL failed: {e}");
            eprintln!("fatal error; quitting");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    for file in files {
        tracing::debug!("running {file}");
        match skicl::load(&file, &mut nspace) {
            Ok(_) => (),
            Err(Error::Io(e)) => {
                tracing::error!("{file}: {e}");
                eprintln!("fatal error; quitting");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
