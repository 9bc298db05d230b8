use std::env;

use hoist_driver::marker::DEFAULT_TAG;
use hoist_driver::{Builtin, Driver, External, Job, Output};
use hoist_generator::{DEFAULT_ALLOW, DEFAULT_BLOCK, Request};
use hoist_loader::ManifestProvider;

#[derive(clap::Args)]
pub struct Args {
    /// Package level value whose methods are forwarded
    #[clap(long, value_name = "NAME")]
    local: String,
    /// Symbol table manifest of the package, or a directory containing `symbols.toml`
    #[clap(long, value_name = "PATH", default_value = ".")]
    package: String,
    /// Forward only methods whose name matches this regular expression
    #[clap(long, value_name = "REGEX", default_value = DEFAULT_ALLOW)]
    allow: String,
    /// Skip methods whose name matches this regular expression
    #[clap(long, value_name = "REGEX", default_value = DEFAULT_BLOCK)]
    block: String,
    /// Output file, `-` for stdout [default: <NAME>.funcs.go]
    #[clap(short, long, value_name = "FILE")]
    output: Option<String>,
    /// Program formatting the output. Use `goimports` to add the imports that qualified
    /// types need. Uses the builtin formatter if absent, which adds no imports
    #[clap(long, value_name = "PROGRAM")]
    formatter: Option<String>,
    /// Build tag excluding the generated file when the package is loaded again
    #[clap(long, value_name = "TAG", default_value = DEFAULT_TAG)]
    tag: String,
}

pub fn exec(cmd: Args) -> miette::Result<()> {
    let request = Request::new(&cmd.local).allow(cmd.allow).block(cmd.block);
    let job = Job {
        package: cmd.package,
        output: Output::from_arg(cmd.output.as_deref(), &cmd.local),
        request,
        tag: cmd.tag,
        args: env::args().skip(1).collect(),
    };

    let provider = ManifestProvider::new();
    let driver = match cmd.formatter.as_deref().and_then(External::from_command_line) {
        Some(external) => Driver::new(provider, external),
        None => Driver::new(provider, Builtin),
    };

    driver.run(&job)?;
    Ok(())
}
