use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GeneratorError {
    #[error("Can't find local symbol {name:?} in package {package}")]
    #[diagnostic(code("G-001"))]
    SymbolNotFound { name: String, package: String },
    #[error("Can't parse {which} pattern {pattern:?}")]
    #[diagnostic(code("G-002"))]
    InvalidPattern {
        which: PatternKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Which of the two name patterns failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Allow,
    Block,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Allow => write!(f, "allow"),
            PatternKind::Block => write!(f, "block"),
        }
    }
}

pub type GeneratorResult<T = ()> = Result<T, GeneratorError>;
