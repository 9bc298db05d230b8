use std::io;

use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Elvish, Fish, PowerShell, Zsh},
};

use super::Cli;

const BINARY: &str = "hoist";

#[allow(clippy::enum_variant_names)]
#[derive(clap::ValueEnum, Clone)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    PowerShell,
    Zsh,
}

#[derive(clap::Args)]
pub struct Args {
    /// Target shell
    shell: Shell,
}

pub fn exec(cmd: Args) -> miette::Result<()> {
    let mut out = io::stdout();
    match cmd.shell {
        Shell::Bash => generate(Bash, &mut Cli::command(), BINARY, &mut out),
        Shell::Elvish => generate(Elvish, &mut Cli::command(), BINARY, &mut out),
        Shell::Fish => generate(Fish, &mut Cli::command(), BINARY, &mut out),
        Shell::PowerShell => generate(PowerShell, &mut Cli::command(), BINARY, &mut out),
        Shell::Zsh => generate(Zsh, &mut Cli::command(), BINARY, &mut out),
    }
    Ok(())
}
