pub mod scenario;
pub mod sequencer;
pub mod wait;

#[cfg(test)]
pub mod testing;

pub use scenario::run_scenario;
pub use sequencer::Sequencer;
pub use wait::{await_condition, WaitOutcome};

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::driver::session::SessionManager;
use crate::driver::web::WebDriverConfig;
use crate::parser::parse_suite_file;
use crate::report::{self, text, RunReport, RunSummary};
use crate::utils::config::Config;

/// Options for a suite run
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Override the browser headless setting
    pub headless: Option<bool>,
    /// Override the default wait window (ms)
    pub timeout_ms: Option<u64>,
    /// Write a JSON run report to this path
    pub report: Option<PathBuf>,
}

/// Run scenario suites from a file or directory.
///
/// Each suite file gets its own Sequencer and session; outcomes from
/// all suites land in one combined summary, printed as the text report
/// and optionally persisted as JSON.
pub async fn run_suite(path: &Path, options: &RunOptions) -> Result<RunSummary> {
    let files = collect_suite_files(path)?;
    if files.is_empty() {
        anyhow::bail!("No suite files found in {}", path.display());
    }

    let defaults = Config::default();
    let mut outcomes = Vec::new();

    for file in &files {
        let suite = parse_suite_file(file)?;
        let name = suite
            .name
            .clone()
            .unwrap_or_else(|| file.display().to_string());
        println!("{} Suite: {}", "■".blue().bold(), name.cyan());

        let timeout_ms = options
            .timeout_ms
            .or(suite.default_timeout_ms)
            .unwrap_or(defaults.default_timeout_ms);

        let base = WebDriverConfig::default();
        let config = WebDriverConfig {
            headless: options.headless.or(suite.headless).unwrap_or(base.headless),
            ..base
        };

        let mut sequencer = Sequencer::new(
            SessionManager::for_web(config),
            suite.base_url.clone(),
            Duration::from_millis(timeout_ms),
        );
        let summary = sequencer.run_all(&suite.scenarios).await;
        outcomes.extend(summary.outcomes);
    }

    let summary = report::summarize(outcomes);
    print!("{}", text::render(&summary));

    if let Some(ref report_path) = options.report {
        let run_report = RunReport::new(summary.clone());
        report::json::generate(&run_report, Some(report_path)).await?;
    }

    Ok(summary)
}

/// Collect suite files from a path: the file itself, or every
/// .yaml/.yml under a directory, sorted for a stable run order.
fn collect_suite_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .map_or(false, |ext| ext == "yaml" || ext == "yml")
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::Step;

    fn flows_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("flows")
    }

    #[test]
    fn test_collect_finds_shipped_login_suite() {
        let files = collect_suite_files(&flows_dir()).expect("flows dir exists");

        assert!(files
            .iter()
            .any(|f| f.file_name().map_or(false, |n| n == "login.yaml")));
    }

    #[test]
    fn test_shipped_login_suite_parses() {
        let suite =
            parse_suite_file(&flows_dir().join("login.yaml")).expect("login suite should parse");

        assert_eq!(suite.scenarios.len(), 3);
        assert_eq!(suite.scenarios[0].id, "valid_login");

        // blank-credential runs still clear both fields before submit
        let blank = &suite.scenarios[2];
        let fills = blank
            .steps
            .iter()
            .filter(|s| matches!(s, Step::Fill(_)))
            .count();
        assert_eq!(fills, 2);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        assert!(collect_suite_files(Path::new("/nonexistent/suites")).is_err());
    }
}
