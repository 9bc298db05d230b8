use std::{env, str::FromStr};

use hoist_printer::ColorChoice;

#[derive(Debug, Clone)]
pub struct GlobalSettings {
    pub colorize: ColorChoice,
    pub log_level: log::LevelFilter,
}

impl GlobalSettings {
    pub fn from_env() -> Self {
        let colorize = env::var("HOIST_COLORIZE")
            .ok()
            .and_then(|var| ColorChoice::from_str(&var).ok())
            .unwrap_or(ColorChoice::Auto);

        let log_level = env::var("HOIST_LOG_LEVEL")
            .ok()
            .and_then(|var| log::LevelFilter::from_str(&var.to_uppercase()).ok())
            .unwrap_or(log::LevelFilter::Info);

        Self { colorize, log_level }
    }

    /// Log to stderr at the configured level.
    pub fn init_logger(&self) {
        let write_style = match self.colorize {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => env_logger::WriteStyle::Always,
            ColorChoice::Never => env_logger::WriteStyle::Never,
            ColorChoice::Auto => env_logger::WriteStyle::Auto,
        };
        env_logger::Builder::new()
            .filter_level(self.log_level)
            .write_style(write_style)
            .format_timestamp(None)
            .format_target(false)
            .init();
    }
}
