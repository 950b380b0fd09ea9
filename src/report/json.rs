use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::RunSummary;

/// A persisted run: summary plus identifying metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub run_id: String,
    pub generated_at: String,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(summary: RunSummary) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
        }
    }
}

/// Generate JSON report
pub async fn generate(report: &RunReport, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(path) = output {
        std::fs::write(path, json)?;
        println!("JSON report saved to: {}", path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}
