//! Command handlers for the `stackfleet` binary

pub mod deploy;
pub mod package;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use stackfleet::config::{self, ConfigSources, ConfigWarning};
use stackfleet::DeployConfig;

use crate::cli::FleetArgs;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub use deploy::cmd_deploy;
pub use package::cmd_package;

/// Resolve the run configuration from flags, environment and config files
pub fn load_deploy_config(
    config_path: Option<&Path>,
    fleet: &FleetArgs,
    ui: &UiContext,
) -> Result<DeployConfig> {
    let cwd = std::env::current_dir().context("cannot read the working directory")?;
    let sources = ConfigSources::discover(&cwd, config_path);

    let mut stderr = io::stderr();
    let (config, warnings) = config::load(
        &sources,
        &fleet.overrides(),
        |key| std::env::var(key).ok(),
        &mut stderr,
    )?;
    print_config_warnings(&warnings, ui);

    Ok(config.resolve()?)
}

fn print_config_warnings(warnings: &[ConfigWarning], ui: &UiContext) {
    for warning in warnings {
        if ui.json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "event": "config_warning",
                    "key": warning.key,
                    "file": warning.file.display().to_string(),
                    "line": warning.line,
                    "suggestion": warning.suggestion,
                })
            );
        } else {
            eprintln!("{} {}", Icon::Warning.colored(ui.color, ui.unicode), warning);
        }
    }
}
