//! Text report rendering
//!
//! This layout is the externally observed contract for run results:
//! header, one tagged line per outcome in submission order, divider,
//! totals. Rendering is a pure projection of the summary and must be
//! byte-identical for identical input.

use super::types::RunSummary;

const BANNER: &str = "==================================================";
const DIVIDER: &str = "--------------------------------------------------";

/// Render a run summary as the fixed-format text report
pub fn render(summary: &RunSummary) -> String {
    let mut out = String::new();

    out.push_str(BANNER);
    out.push('\n');
    out.push_str("                TEST EXECUTION SUMMARY\n");
    out.push_str(BANNER);
    out.push('\n');

    for outcome in &summary.outcomes {
        out.push_str(&format!(
            "{} {}: {}\n",
            outcome.kind.tag(),
            outcome.scenario,
            outcome.message
        ));
    }

    out.push_str(DIVIDER);
    out.push('\n');
    out.push_str(&format!("Total Passed: {}\n", summary.passed));
    out.push_str(&format!("Total Failed: {}\n", summary.failed));
    out.push_str(&format!("Total Errors: {}\n", summary.errored));
    out.push_str(&format!("Total Tests: {}\n", summary.total));
    out.push_str(DIVIDER);
    out.push('\n');

    out
}
