use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// Closing panel of a successful command
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    clean: bool,
    stats: Vec<(String, usize)>,
    infos: Vec<String>,
    warnings: Vec<String>,
}

impl ResultSummary {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            clean: true,
            stats: Vec::new(),
            infos: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    /// Tolerated problems; the title turns to a warning
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.clean = false;
        self.warnings.push(message.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, title) = if self.clean {
            (
                PanelStyle::Success,
                Icon::Success,
                ColoredText::success(self.title.as_str()),
            )
        } else {
            (
                PanelStyle::Warning,
                Icon::Warning,
                ColoredText::warning(self.title.as_str()),
            )
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );
        let mut panel = Panel::with_title(header).style(style);

        if !self.stats.is_empty() {
            panel.add_empty();
            for (label, count) in &self.stats {
                panel.add_line(format!("{} {}", count, label));
            }
        }

        if !self.infos.is_empty() {
            panel.add_empty();
            for info in &self.infos {
                panel.add_line(format!(
                    "{} {}",
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    info
                ));
            }
        }

        if !self.warnings.is_empty() {
            panel.add_empty();
            for warning in &self.warnings {
                panel.add_line(format!(
                    "{} {}",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    warning
                ));
            }
        }

        panel.render(supports_color, supports_unicode)
    }
}
