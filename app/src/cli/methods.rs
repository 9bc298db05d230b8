use std::fs::File;
use std::path::PathBuf;

use hoist_driver::{Builtin, Driver};
use hoist_generator::{DEFAULT_ALLOW, DEFAULT_BLOCK, Request};
use hoist_loader::ManifestProvider;
use hoist_printer::{Print, PrintCfg, StandardStream, WriteColor};

use super::ignore_colors::IgnoreColors;
use crate::global_settings::GlobalSettings;
use crate::result::AppError;

#[derive(clap::Args)]
pub struct Args {
    /// Package level value whose method set is listed
    #[clap(long, value_name = "NAME")]
    local: String,
    /// Symbol table manifest of the package, or a directory containing `symbols.toml`
    #[clap(long, value_name = "PATH", default_value = ".")]
    package: String,
    /// Mark only methods whose name matches this regular expression as kept
    #[clap(long, value_name = "REGEX", default_value = DEFAULT_ALLOW)]
    allow: String,
    /// Mark methods whose name matches this regular expression as blocked
    #[clap(long, value_name = "REGEX", default_value = DEFAULT_BLOCK)]
    block: String,
    /// Width of the listing [default: terminal width]
    #[clap(long, value_name = "COLUMNS")]
    width: Option<usize>,
    /// Write the listing to a file instead of stdout
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn exec(cmd: Args, settings: &GlobalSettings) -> miette::Result<()> {
    let request = Request::new(&cmd.local).allow(cmd.allow).block(cmd.block);
    let driver = Driver::new(ManifestProvider::new(), Builtin);
    let listing = driver.list(&cmd.package, &request)?;

    let mut stream: Box<dyn WriteColor> = match &cmd.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|source| AppError::Write { path: path.clone(), source })?;
            Box::new(IgnoreColors::new(file))
        }
        None => Box::new(StandardStream::stdout(settings.colorize)),
    };

    let cfg = PrintCfg { width: cmd.width.unwrap_or_else(terminal_width), ..PrintCfg::default() };
    listing.print_colored(&cfg, &mut stream).map_err(AppError::Print)?;
    Ok(())
}

fn terminal_width() -> usize {
    termsize::get().map(|size| size.cols as usize).unwrap_or(hoist_printer::DEFAULT_WIDTH)
}
