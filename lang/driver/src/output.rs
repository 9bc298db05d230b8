use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum OutputError {
    #[error("Could not write {destination}")]
    #[diagnostic(code("O-001"))]
    Write {
        destination: Output,
        #[source]
        source: io::Error,
    },
}

/// Where the generated source goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

/// The file written when no output is given, e.g. `counter.funcs.go`.
pub fn default_filename(local: &str) -> String {
    format!("{local}.funcs.go")
}

impl Output {
    /// Interpret the `--output` argument: `-` is stdout, nothing is the default file.
    pub fn from_arg(arg: Option<&str>, local: &str) -> Output {
        match arg {
            Some("-") => Output::Stdout,
            Some(path) if !path.is_empty() => Output::File(PathBuf::from(path)),
            _ => Output::File(PathBuf::from(default_filename(local))),
        }
    }

    /// The file name the formatter is told about. Output to stdout still uses the
    /// default file name.
    pub fn filename(&self, local: &str) -> String {
        match self {
            Output::Stdout => default_filename(local),
            Output::File(path) => path.display().to_string(),
        }
    }

    pub fn write(&self, code: &str) -> Result<(), OutputError> {
        let result = match self {
            Output::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(code.as_bytes()).and_then(|()| stdout.flush())
            }
            Output::File(path) => fs::write(path, code),
        };
        result.map_err(|source| OutputError::Write { destination: self.clone(), source })
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => write!(f, "standard output"),
            Output::File(path) => write!(f, "{}", path.display()),
        }
    }
}
