use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Failures of the command line surface itself.
#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error("Could not write {}", path.display())]
    #[diagnostic(code("A-001"))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not print to the terminal")]
    #[diagnostic(code("A-002"))]
    Print(#[source] io::Error),
}
