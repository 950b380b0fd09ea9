use super::types::ScenarioSuite;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a YAML suite file into a ScenarioSuite
pub fn parse_suite_file(path: &Path) -> Result<ScenarioSuite> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_suite_content(&content)
        .with_context(|| format!("Failed to parse suite: {}", path.display()))
}

/// Parse YAML content into a ScenarioSuite
pub fn parse_suite_content(content: &str) -> Result<ScenarioSuite> {
    let suite: ScenarioSuite =
        serde_yaml::from_str(content).context("Invalid suite definition")?;

    for scenario in &suite.scenarios {
        if scenario.id.trim().is_empty() {
            anyhow::bail!("Scenario with empty id");
        }
    }

    Ok(suite)
}
