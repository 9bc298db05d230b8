use std::io;
use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum LoadError {
    #[error("Could not read symbol table {}", path.display())]
    #[diagnostic(code("L-001"), help("Pass the manifest file or its directory with --package"))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed symbol table {}: {message}", path.display())]
    #[diagnostic(code("L-002"))]
    Manifest { path: PathBuf, message: String },
    #[error("Malformed type expression in {context}")]
    #[diagnostic(code("L-003"))]
    TypeSyntax {
        context: String,
        #[source_code]
        src: String,
        #[label("expected {expected}")]
        span: SourceSpan,
        expected: String,
    },
    #[error("Undefined type {name} in {context}")]
    #[diagnostic(code("L-004"))]
    UndefinedType {
        name: String,
        context: String,
        #[source_code]
        src: String,
        #[label]
        span: SourceSpan,
    },
    #[error("Unknown package {qualifier} in {context}")]
    #[diagnostic(code("L-005"), help("Add the package to the `imports` of the declaring package"))]
    UnknownPackage {
        qualifier: String,
        context: String,
        #[source_code]
        src: String,
        #[label]
        span: SourceSpan,
    },
    #[error("Duplicate definition of {name} in package {package}")]
    #[diagnostic(code("L-006"))]
    AlreadyDefined { name: String, package: String },
    #[error("Invalid declaration of {name}: {reason}")]
    #[diagnostic(code("L-007"))]
    InvalidDecl { name: String, reason: String },
}

pub type LoadResult<T = ()> = Result<T, LoadError>;
