use stackfleet::domain::ports::PublishedTemplate;

use crate::ui::blocks::summary::ResultSummary;

pub fn render_package_summary(
    unit_name: &str,
    template: &PublishedTemplate,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = ResultSummary::success(format!("Packaged {}", unit_name));
    summary.add_stat("targets packaged", template.packaged_targets.len());
    summary.add_stat("uploads", template.uploads);
    summary.add_info(template.url.clone());
    summary.add_info(template.digest.to_string());
    summary.render(supports_color, supports_unicode)
}
