use std::fmt::Write;

use crate::analyzer::RiskReport;

/// Format styles supported in default reporter implementations.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Produce a report string from a `RiskReport` using the desired format.
pub fn render_report(report: &RiskReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Human => render_human(report),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_human(report: &RiskReport) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "Risk Grade: {} (score: {})",
        report.grade, report.total_score
    )?;
    writeln!(out, "Issues: {}", report.issue_count)?;
    writeln!(out)?;

    if report.issues.is_empty() {
        writeln!(out, "No issues detected.")?;
        return Ok(out);
    }

    for (idx, issue) in report.issues.iter().enumerate() {
        writeln!(
            out,
            "{n}. [{severity:?}] {category}: {message} ({kind})",
            n = idx + 1,
            severity = issue.severity,
            category = issue.category,
            message = issue.message,
            kind = issue.kind,
        )?;
        writeln!(out, "   > {}", sanitize_source(&issue.source))?;
    }

    writeln!(out)?;
    writeln!(out, "Category Stats:")?;
    for (category, count) in &report.stats {
        writeln!(out, "  - {category}: {count}")?;
    }

    writeln!(out)?;
    writeln!(out, "Flagged Sentences:")?;
    for sentence in &report.unsafe_sentences {
        writeln!(out, "  - {}", sanitize_source(sentence))?;
    }

    Ok(out)
}

fn sanitize_source(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\n' | '\r' => ' ',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Category, Finding, RiskReport, Severity};

    fn sample_report() -> RiskReport {
        RiskReport::from_findings(vec![
            Finding {
                category: Category::Termination,
                message: "Immediate termination without a notice period may breach the contract."
                    .into(),
                severity: Severity::Critical,
                kind: "no notice period".into(),
                source: "We will terminate immediately.".into(),
            },
            Finding {
                category: Category::Privacy,
                message: "Email address detected (john@example.com); redact or anonymise if needed."
                    .into(),
                severity: Severity::Major,
                kind: "email exposure".into(),
                source: "Contact john@example.com.".into(),
            },
        ])
    }

    #[test]
    fn human_report_contains_grade_issues_and_stats() {
        let output = render_report(&sample_report(), OutputFormat::Human).unwrap();
        assert!(output.contains("Risk Grade: Medium (score: 5)"));
        assert!(output.contains("[Critical] Termination"));
        assert!(output.contains("Category Stats:"));
        assert!(output.contains("Flagged Sentences:"));
        assert!(output.contains("john@example.com"));
    }

    #[test]
    fn human_report_for_clean_letter_is_terse() {
        let report = RiskReport::from_findings(Vec::new());
        let output = render_report(&report, OutputFormat::Human).unwrap();
        assert!(output.contains("Risk Grade: Low (score: 0)"));
        assert!(output.contains("No issues detected."));
    }

    #[test]
    fn json_report_serializes_interface_shape() {
        let output = render_report(&sample_report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["grade"], "Medium");
        assert_eq!(value["total_score"], 5);
        assert_eq!(value["issue_count"], 2);
        assert_eq!(value["stats"]["Termination"], 1);
        assert_eq!(value["stats"]["Privacy"], 1);
        assert!(value["unsafe_sentences"].is_array());
        assert_eq!(value["issues"][0]["type"], "no notice period");
    }

    #[test]
    fn sources_with_newlines_render_on_one_line() {
        let mut report = sample_report();
        report.issues[0].source = "line one\nline two".into();
        report.unsafe_sentences[0] = "line one\nline two".into();
        let output = render_report(&report, OutputFormat::Human).unwrap();
        assert!(output.contains("line one line two"));
    }
}
