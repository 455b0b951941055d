use stackfleet::{ErrorKind, StackfleetError};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn hint(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Precondition => {
            Some("Set the missing variables in the environment, as flags, or in stackfleet.toml.")
        }
        ErrorKind::Authorization => {
            Some("Check that the caller may assume the administration role and that its session is valid.")
        }
        ErrorKind::ConflictRetriesExhausted => {
            Some("Another operation still holds the stack set. Wait for it to finish and run deploy again.")
        }
        ErrorKind::PollTimeout => {
            Some("The operation may still finish. Check it in the console before running deploy again.")
        }
        ErrorKind::Transient => Some("The provider throttled or was unavailable. Running deploy again is safe."),
        _ => None,
    }
}

/// Diagnostics block printed before a non-zero exit
pub fn render_failure(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(err.to_string()).bold().render(supports_color)
    ));

    for cause in err.chain().skip(1) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            cause
        ));
    }

    let Some(fleet_err) = err.downcast_ref::<StackfleetError>() else {
        return out;
    };

    let failures = fleet_err.failures();
    if !failures.is_empty() {
        out.push_str(&format!(
            "\n{}\n",
            ColoredText::dim(format!("{} target(s) failed:", failures.len()))
                .render(supports_color)
        ));
        for failure in failures {
            out.push_str(&format!(
                "  {} {}\n",
                Icon::Error.colored(supports_color, supports_unicode),
                failure
            ));
        }
    }

    if let Some(hint) = hint(fleet_err.kind()) {
        out.push_str(&format!(
            "\n{} {}\n",
            ColoredText::dim("Hint:").render(supports_color),
            hint
        ));
    }
    out
}

fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let fleet_err = err.downcast_ref::<StackfleetError>();
    let failures: Vec<serde_json::Value> = fleet_err
        .map(|e| e.failures())
        .unwrap_or_default()
        .iter()
        .map(|f| {
            serde_json::json!({
                "account": f.account.as_str(),
                "region": f.region.as_str(),
                "status": f.status,
                "reason": f.status_reason,
            })
        })
        .collect();

    serde_json::json!({
        "event": "error",
        "kind": fleet_err.map(|e| e.kind().as_str()).unwrap_or("internal"),
        "message": format!("{:#}", err),
        "failures": failures,
    })
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        println!("{}", error_json(err));
        return;
    }
    eprint!("{}", render_failure(err, ui.color, ui.unicode));
}
