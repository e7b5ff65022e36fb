use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::logging::log_blank;
use crate::settings::{Settings, settings_path};

/// Show the settings file location and the resolved values.
pub(crate) fn run_config_show(explicit: Option<&Path>, settings: &Settings) -> Result<(), CliError> {
    let path = explicit.map(Path::to_path_buf).unwrap_or_else(settings_path);

    log::info!("{}", "Configuration".if_supports_color(Stdout, |t| t.bold()));
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log_blank();

    for line in settings.to_toml()?.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}
