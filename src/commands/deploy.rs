//! Deploy command handler
//!
//! Packages the template, then converges the stack set and its instances.

use std::sync::Arc;

use anyhow::{Context, Result};
use stackfleet::domain::ports::DeployEventSink;
use stackfleet::infrastructure::JsonEventSink;
use stackfleet::presentation::factory::create_deploy_use_case;
use stackfleet::DeployConfig;

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::views::deploy::render_deploy_summary;

/// Execute the deploy command
pub fn cmd_deploy(config: &DeployConfig, ui: &UiContext) -> Result<()> {
    let events: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout("deploy"))
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    let use_case = create_deploy_use_case(config);
    let report = use_case
        .execute_with_events(&config.deploy_options(), events)
        .with_context(|| format!("deploying {} failed", config.stack_set_name))?;

    // JSON mode already emitted the `complete` event
    if !ui.json {
        println!();
        print!("{}", render_deploy_summary(&report, ui.color, ui.unicode));
    }
    Ok(())
}
