mod cli;
mod global_settings;
mod result;

fn main() -> miette::Result<()> {
    cli::exec()
}
