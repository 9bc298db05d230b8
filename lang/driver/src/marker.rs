//! The header marking a file as generated.

use hoist_generator::quote;

/// The build tag excluding generated files from the next analysis.
pub const DEFAULT_TAG: &str = "hoist";

/// The lines preceding the generated source, including the trailing blank line.
///
/// `args` are the command line arguments of the run, which are recorded so the
/// file can be regenerated.
pub fn header(args: &[String], tag: &str) -> String {
    let args = args.iter().map(|arg| quote(arg)).collect::<Vec<_>>().join(" ");
    format!("// Code generated by hoist [{args}] -- DO NOT EDIT.\n//go:build !{tag}\n\n")
}
