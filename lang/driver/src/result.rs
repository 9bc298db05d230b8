use miette::Diagnostic;
use thiserror::Error;

use hoist_generator::GeneratorError;
use hoist_loader::LoadError;

use crate::format::FormatError;
use crate::output::OutputError;

pub type DriverResult<T = ()> = Result<T, DriverError>;

/// Every way a run can fail. None of them leave a partially written file behind.
#[derive(Error, Diagnostic, Debug)]
#[error(transparent)]
#[diagnostic(transparent)]
pub enum DriverError {
    Load(#[from] LoadError),
    Generate(#[from] GeneratorError),
    Format(#[from] FormatError),
    Io(#[from] OutputError),
}
