use clap::{Parser, Subcommand};

use crate::global_settings::GlobalSettings;

mod gen_completions;
mod generate;
mod ignore_colors;
mod methods;

pub fn exec() -> miette::Result<()> {
    use Command::*;
    let cli = Cli::parse();
    let settings = GlobalSettings::from_env();
    settings.init_logger();
    match cli.command {
        Generate(args) => generate::exec(args),
        Methods(args) => methods::exec(args, &settings),
        Completions(args) => gen_completions::exec(args),
    }
}

#[derive(Parser)]
#[clap(version, author, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate forwarding functions for the methods of a package level value
    Generate(generate::Args),
    /// List the method set of a package level value and which methods are forwarded
    Methods(methods::Args),
    /// Print a shell completion script
    Completions(gen_completions::Args),
}
