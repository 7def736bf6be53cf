use resumo_core::{AppViewModel, ResumoActions, SubmissionStage};

/// Text rendering of the upload page.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("== {} ==", view.location));

    if let Some(hint) = &view.drag_hint {
        let affordance = if view.dragover { " (dragover)" } else { "" };
        lines.push(format!("[ {hint} ]{affordance}"));
    }

    let mut status = String::new();
    if view.success_icon_visible {
        status.push_str("[ok] ");
    }
    if view.error_icon_visible {
        status.push_str("[x] ");
    }
    status.push_str(if view.filename.is_empty() {
        "-"
    } else {
        view.filename.as_str()
    });
    lines.push(format!("File: {status}"));

    if let Some(message) = &view.error_message {
        lines.push(format!("Error: {message}"));
    }

    let stage = match &view.stage {
        SubmissionStage::Idle => "idle".to_string(),
        SubmissionStage::Rejected => "rejected".to_string(),
        SubmissionStage::Uploading { submission } => format!("uploading #{submission}"),
        SubmissionStage::Succeeded { redirect } => format!("done, redirecting to {redirect}"),
        SubmissionStage::Failed { .. } => "failed".to_string(),
    };
    if view.uploads_in_flight > 1 {
        lines.push(format!(
            "Status: {stage} ({} uploads in flight)",
            view.uploads_in_flight
        ));
    } else {
        lines.push(format!("Status: {stage}"));
    }
    lines
}

/// Text rendering of the summary page.
pub fn render_summary(location: &str, actions: &ResumoActions) -> Vec<String> {
    let mut lines = vec![format!("== {location} ==")];
    if actions.selection().is_some() {
        lines.push("Summary (selected):".to_string());
    } else {
        lines.push("Summary:".to_string());
    }
    lines.extend(actions.text().lines().map(|line| format!("  {line}")));
    lines.push("Actions: copy | save | edit <text> | back".to_string());
    lines
}
