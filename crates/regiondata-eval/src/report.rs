use crate::model::EvaluationReport;

/// Render a deterministic markdown summary of one evaluation.
pub fn render_report(report: &EvaluationReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Regiondata Evaluation Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- dataset: {}", report.dataset));
    lines.push(format!("- schema_version: {}", report.schema_version));
    lines.push(format!("- path: {}", report.path.display()));
    lines.push(format!("- rows_checked: {}", report.rows_checked));
    lines.push(format!("- violations: {}", report.violations_total));
    lines.push(String::new());

    if !report.violations.is_empty() {
        lines.push("## Top violations".to_string());
        for violation in &report.violations {
            let row = violation
                .row_index
                .map(|row| format!(" row {row}"))
                .unwrap_or_default();
            let column = violation
                .column
                .as_ref()
                .map(|column| format!(" [{column}]"))
                .unwrap_or_default();
            lines.push(format!(
                "- {}{}{}: {}",
                violation.code, row, column, violation.message
            ));
        }
        let hidden = report
            .violations_total
            .saturating_sub(report.violations.len() as u64);
        if hidden > 0 {
            lines.push(format!("- ... {hidden} more"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
