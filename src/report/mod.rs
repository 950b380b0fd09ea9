pub mod json;
pub mod text;
pub mod types;

pub use json::RunReport;
pub use types::{summarize, Outcome, OutcomeKind, RunSummary};

use anyhow::Result;
use std::path::Path;

/// Re-render a saved run report in the requested format
pub async fn generate_report(results_path: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let results = std::fs::read_to_string(results_path)?;
    let report: RunReport = serde_json::from_str(&results)?;

    match format {
        "json" => json::generate(&report, output).await,
        "text" => {
            let rendered = text::render(&report.summary);
            if let Some(path) = output {
                std::fs::write(path, &rendered)?;
                println!("Text report saved to: {}", path.display());
            } else {
                print!("{}", rendered);
            }
            Ok(())
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
