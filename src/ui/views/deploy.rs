use stackfleet::DeployReport;

use crate::ui::blocks::summary::ResultSummary;

pub fn render_deploy_summary(
    report: &DeployReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = format!("Deployed {}", report.unit_name);
    let mut summary = ResultSummary::success(title);

    if let Some(action) = report.unit_action {
        summary.add_info(format!("stack set {}", action.as_str()));
    }
    summary.add_stat("instances created", report.created_targets.len());
    summary.add_stat("instances updated", report.updated_targets.len());
    summary.add_stat("operations", report.operations.len());
    if let Some(template) = &report.template {
        summary.add_info(format!("template {} ({})", template.url, template.digest.short()));
    }
    for conflict in &report.conflicts {
        summary.add_warning(format!("already existed: {}", conflict));
    }

    summary.render(supports_color, supports_unicode)
}
