//! Evaluation report table.

use std::fmt::Write;

use capcheck_core::EvaluationReport;

use super::tables::{Palette, pad, separator};

const HEADERS: [&str; 3] = ["Criterion", "Required", "Actual"];

/// Render a report as a name / required / actual / result table.
pub fn render_report(report: &EvaluationReport, palette: Palette) -> String {
    let mut out = String::new();

    if report.criteria.is_empty() {
        let _ = writeln!(out, "No requirements to check.");
    } else {
        let width = |header: &str, cell: fn(&capcheck_core::CriterionResult) -> &str| {
            report
                .criteria
                .iter()
                .map(|c| cell(c).chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or_default()
        };
        let widths = [
            width(HEADERS[0], |c| c.name.as_str()),
            width(HEADERS[1], |c| c.required_description.as_str()),
            width(HEADERS[2], |c| c.actual_description.as_str()),
        ];
        let total = widths.iter().sum::<usize>() + 3 * 2 + "Result".len();

        let _ = writeln!(
            out,
            "{}",
            palette.bold(&format!(
                "{}  {}  {}  Result",
                pad(HEADERS[0], widths[0]),
                pad(HEADERS[1], widths[1]),
                pad(HEADERS[2], widths[2]),
            ))
        );
        let _ = writeln!(out, "{}", separator(total));

        for criterion in &report.criteria {
            let result = if criterion.passed {
                palette.green("✓ PASS")
            } else {
                palette.red("✗ FAIL")
            };
            let _ = writeln!(
                out,
                "{}  {}  {}  {result}",
                pad(&criterion.name, widths[0]),
                pad(&criterion.required_description, widths[1]),
                pad(&criterion.actual_description, widths[2]),
            );
        }
        let _ = writeln!(out, "{}", separator(total));
    }

    let passed = report.criteria.iter().filter(|c| c.passed).count();
    let verdict = if report.overall_passed {
        palette.green("PASSED")
    } else {
        palette.red("NOT MET")
    };
    let _ = writeln!(
        out,
        "Overall: {verdict} ({passed}/{} criteria passed)",
        report.criteria.len()
    );

    if !report.undetermined.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            palette.yellow(&format!(
                "Undetermined (no data): {}",
                report.undetermined.join(", ")
            ))
        );
    }

    out
}
