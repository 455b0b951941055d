//! Package command handler
//!
//! Packages and uploads the template without touching the stack set.

use std::sync::Arc;

use anyhow::{Context, Result};
use stackfleet::domain::ports::{DeployEventSink, PublishedTemplate};
use stackfleet::infrastructure::JsonEventSink;
use stackfleet::presentation::factory::create_package_use_case;
use stackfleet::DeployConfig;

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::views::package::render_package_summary;

/// Execute the package command
pub fn cmd_package(config: &DeployConfig, ui: &UiContext) -> Result<()> {
    let events: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout("package"))
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };

    let use_case = create_package_use_case(config);
    let published = use_case
        .execute_with_events(&config.package_options(), events)
        .with_context(|| format!("packaging {} failed", config.stack_set_name))?;

    if ui.json {
        println!("{}", package_complete_json(&published));
    } else {
        println!();
        print!(
            "{}",
            render_package_summary(&config.stack_set_name, &published, ui.color, ui.unicode)
        );
    }
    Ok(())
}

fn package_complete_json(published: &PublishedTemplate) -> serde_json::Value {
    serde_json::json!({
        "event": "complete",
        "command": "package",
        "status": "success",
        "url": published.url,
        "digest": published.digest.hex(),
        "targets": published.packaged_targets.len(),
        "uploads": published.uploads,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackfleet::domain::value_objects::ContentHash;
    use stackfleet::Target;

    #[test]
    fn package_complete_json_names_url_and_counts() {
        let published = PublishedTemplate {
            url: "https://s3.amazonaws.com/stackfleet-stack-sets/image-resizer.yml".to_string(),
            digest: ContentHash::from_content("Resources: {}\n"),
            packaged_targets: vec![
                Target::new("111", "us-east-1"),
                Target::new("222", "us-east-1"),
            ],
            uploads: 1,
        };

        let json = package_complete_json(&published);
        assert_eq!(json["event"], "complete");
        assert_eq!(json["command"], "package");
        assert_eq!(json["targets"], 2);
        assert_eq!(json["uploads"], 1);
        assert_eq!(json["digest"].as_str().unwrap().len(), 64);
    }
}
