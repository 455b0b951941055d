//! Human-readable progress for package and deploy runs

use std::io::{self, Write};
use std::sync::Mutex;

use stackfleet::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    color: bool,
    unicode: bool,
    verbose: u8,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, writer: W) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            verbose: ui.verbose,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.color, self.unicode)
    }

    fn dim(&self, text: impl Into<String>) -> String {
        ColoredText::dim(text).render(self.color)
    }

    fn line(&self, event: &DeployEvent) -> Option<String> {
        let line = match event {
            DeployEvent::Authenticating {
                role_arn,
                session_name,
            } => format!(
                "{} Assuming {} {}",
                self.icon(Icon::Progress),
                role_arn,
                self.dim(format!("({})", session_name))
            ),
            DeployEvent::PackageStarted {
                unit_name,
                target_count,
            } => format!(
                "{} Packaging {} for {} target(s)",
                self.icon(Icon::Package),
                ColoredText::info(unit_name.as_str()).bold().render(self.color),
                target_count
            ),
            DeployEvent::TargetPackaged { target } => {
                format!("  {} packaged {}", self.icon(Icon::Success), target)
            }
            DeployEvent::TemplateUploaded { url, .. } => {
                format!("  {} uploaded {}", self.icon(Icon::Success), url)
            }
            DeployEvent::TemplateUnchanged { target } => format!(
                "  {} {}",
                self.icon(Icon::Pending),
                self.dim(format!("template for {} unchanged, upload skipped", target))
            ),
            DeployEvent::PhaseEntered { phase } if self.verbose > 0 => {
                self.dim(format!("  phase {}", phase))
            }
            DeployEvent::PhaseEntered { .. } => return None,
            DeployEvent::UnitProbed { name, exists } => format!(
                "{} Stack set {} {}",
                self.icon(Icon::Deploy),
                ColoredText::info(name.as_str()).bold().render(self.color),
                if *exists { "exists" } else { "not found, creating" }
            ),
            DeployEvent::InstanceProbed { target, exists } if self.verbose > 0 => format!(
                "  {} {} {}",
                self.icon(Icon::Pending),
                target,
                self.dim(if *exists { "existing" } else { "new" })
            ),
            DeployEvent::InstanceProbed { .. } => return None,
            DeployEvent::Partitioned {
                new_targets,
                existing_targets,
            } => format!(
                "{} {} new target(s), {} existing",
                self.icon(Icon::Arrow),
                new_targets,
                existing_targets
            ),
            DeployEvent::OperationStarted {
                action,
                operation_id,
            } => format!(
                "{} {} {}",
                self.icon(Icon::Progress),
                action,
                self.dim(operation_id.as_str())
            ),
            DeployEvent::ActionApplied { action } => {
                format!("  {} {}", self.icon(Icon::Success), action)
            }
            DeployEvent::OperationPolled {
                operation_id,
                status,
                poll,
            } if self.verbose > 0 => self.dim(format!(
                "  poll {} of {}: {}",
                poll, operation_id, status
            )),
            DeployEvent::OperationPolled { .. } => return None,
            DeployEvent::OperationSucceeded { operation_id } => format!(
                "  {} {}",
                self.icon(Icon::Success),
                self.dim(format!("{} succeeded", operation_id))
            ),
            DeployEvent::ConflictRetry {
                action,
                attempt,
                max_attempts,
                wait,
            } => format!(
                "  {} {} blocked by another operation, retrying in {}s ({}/{})",
                self.icon(Icon::Retry),
                action,
                wait.as_secs(),
                attempt,
                max_attempts
            ),
            DeployEvent::RaceTolerated { action, detail } => format!(
                "  {} {} raced with another run: {}",
                self.icon(Icon::Warning),
                action,
                detail
            ),
            DeployEvent::BenignConflict { summary, .. } => format!(
                "  {} already existed: {}",
                self.icon(Icon::Warning),
                summary
            ),
            DeployEvent::TargetFailed { summary, .. } => {
                format!("  {} {}", self.icon(Icon::Error), summary)
            }
            // The closing summary panel covers completion
            DeployEvent::Completed { .. } => return None,
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.line(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}
