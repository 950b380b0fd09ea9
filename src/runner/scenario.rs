//! Single-scenario execution
//!
//! Runs one scenario's steps in order against a borrowed session and
//! classifies the result. Every fault is converted to an Outcome at
//! this boundary; nothing propagates past it.

use anyhow::Result;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::wait::{await_condition, WaitOutcome};
use crate::driver::traits::{BrowserDriver, Selector};
use crate::parser::types::{Condition, Scenario, Step, TimeoutDisposition};
use crate::report::types::Outcome;

/// Faults a scenario can raise while executing
#[derive(Debug, Error)]
pub enum ScenarioFault {
    /// An interaction step raised; the scenario could not complete
    #[error("step {step} ({action}) failed: {source:#}")]
    Step {
        step: usize,
        action: String,
        #[source]
        source: anyhow::Error,
    },

    /// A page signal the scenario requires never appeared
    #[error("required signal did not appear within {timeout_ms} ms: {condition}")]
    SignalTimeout { condition: String, timeout_ms: u64 },

    /// Observed page state differs from the expectation
    #[error("expected {expected}, observed {observed}")]
    Mismatch { expected: String, observed: String },
}

impl ScenarioFault {
    fn step(step: usize, action: impl Into<String>, source: anyhow::Error) -> Self {
        ScenarioFault::Step {
            step,
            action: action.into(),
            source,
        }
    }
}

/// Run one scenario against the session and classify the result
pub async fn run_scenario(
    driver: &dyn BrowserDriver,
    scenario: &Scenario,
    base_url: Option<&str>,
    default_timeout: Duration,
) -> Outcome {
    let started = Instant::now();

    let outcome = match drive(driver, scenario, base_url, default_timeout).await {
        Ok(()) => {
            let message = scenario
                .description
                .clone()
                .unwrap_or_else(|| format!("{} satisfied", scenario.expect.condition));
            Outcome::pass(&scenario.id, message)
        }
        Err(fault @ ScenarioFault::Mismatch { .. }) => {
            Outcome::fail(&scenario.id, fault.to_string())
        }
        Err(fault) => Outcome::error(&scenario.id, fault.to_string()),
    };

    outcome.with_duration(started.elapsed().as_millis() as u64)
}

/// Execute all steps plus the final expectation, failing fast
async fn drive(
    driver: &dyn BrowserDriver,
    scenario: &Scenario,
    base_url: Option<&str>,
    default_timeout: Duration,
) -> Result<(), ScenarioFault> {
    for (index, step) in scenario.steps.iter().enumerate() {
        match step {
            Step::Navigate(url) => {
                let target = resolve_url(base_url, url);
                driver
                    .goto(&target)
                    .await
                    .map_err(|err| ScenarioFault::step(index, step.display_name(), err))?;
            }
            Step::Fill(params) => {
                let selector = Selector::parse(&params.field);
                // a prior scenario on this session may have left state
                driver
                    .clear_field(&selector)
                    .await
                    .map_err(|err| ScenarioFault::step(index, step.display_name(), err))?;
                driver
                    .fill_field(&selector, &params.value)
                    .await
                    .map_err(|err| ScenarioFault::step(index, step.display_name(), err))?;
            }
            Step::Click(target) => {
                driver
                    .click(&Selector::parse(target))
                    .await
                    .map_err(|err| ScenarioFault::step(index, step.display_name(), err))?;
            }
            Step::WaitFor(params) => {
                let timeout = params
                    .timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(default_timeout);
                let outcome =
                    await_condition(|| probe_condition(driver, &params.condition), timeout)
                        .await
                        .map_err(|err| ScenarioFault::step(index, step.display_name(), err))?;

                if outcome == WaitOutcome::TimedOut {
                    return Err(timed_out(
                        driver,
                        &params.condition,
                        timeout,
                        params.on_timeout,
                    )
                    .await);
                }
            }
        }
    }

    let expect = &scenario.expect;
    let timeout = expect
        .timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(default_timeout);
    let outcome = await_condition(|| probe_condition(driver, &expect.condition), timeout)
        .await
        .map_err(|err| {
            ScenarioFault::step(
                scenario.steps.len(),
                format!("check {}", expect.condition),
                err,
            )
        })?;

    match outcome {
        WaitOutcome::Satisfied => Ok(()),
        WaitOutcome::TimedOut => {
            Err(timed_out(driver, &expect.condition, timeout, expect.on_timeout).await)
        }
    }
}

/// Evaluate a page condition once
pub(crate) async fn probe_condition(
    driver: &dyn BrowserDriver,
    condition: &Condition,
) -> Result<bool> {
    match condition {
        Condition::Visible(selector) => driver.is_visible(&Selector::parse(selector)).await,
        Condition::NotVisible(selector) => {
            Ok(!driver.is_visible(&Selector::parse(selector)).await?)
        }
        Condition::UrlContains(fragment) => Ok(driver.current_url().await?.contains(fragment)),
    }
}

async fn timed_out(
    driver: &dyn BrowserDriver,
    condition: &Condition,
    timeout: Duration,
    disposition: TimeoutDisposition,
) -> ScenarioFault {
    match disposition {
        TimeoutDisposition::Error => ScenarioFault::SignalTimeout {
            condition: condition.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        },
        TimeoutDisposition::Fail => ScenarioFault::Mismatch {
            expected: condition.to_string(),
            observed: observed_state(driver).await,
        },
    }
}

async fn observed_state(driver: &dyn BrowserDriver) -> String {
    driver
        .current_url()
        .await
        .map(|url| format!("url {url}"))
        .unwrap_or_else(|_| "page state unavailable".to_string())
}

fn resolve_url(base_url: Option<&str>, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if let Some(base) = base_url {
        format!("{}{}", base.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_suite_content;
    use crate::report::types::OutcomeKind;
    use crate::runner::testing::ScriptedFactory;

    fn scenario_from(yaml: &str) -> Scenario {
        let suite = parse_suite_content(yaml).expect("suite should parse");
        suite.scenarios.into_iter().next().expect("one scenario")
    }

    #[tokio::test]
    async fn test_satisfied_expectation_passes() {
        let factory = ScriptedFactory::new().url_on_click("https://site.test/logged-in");
        let driver = factory.build();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: valid_login
    steps:
      - navigate: https://site.test/login
      - fill:
          field: "#username"
          value: student
      - click: "#submit"
    expect:
      urlContains: logged-in
      timeoutMs: 200
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(200)).await;
        assert_eq!(outcome.kind, OutcomeKind::Pass);
        assert!(outcome.duration_ms.is_some());
    }

    #[tokio::test]
    async fn test_unsatisfied_expectation_fails_with_observed_state() {
        let factory = ScriptedFactory::new();
        let driver = factory.build();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: valid_login
    steps:
      - navigate: https://site.test/login
    expect:
      urlContains: logged-in
      timeoutMs: 1
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(1)).await;
        assert_eq!(outcome.kind, OutcomeKind::Fail);
        assert!(outcome.message.contains("expected"));
        assert!(outcome.message.contains("https://site.test/login"));
    }

    #[tokio::test]
    async fn test_step_failure_is_error_and_skips_remaining_steps() {
        let factory = ScriptedFactory::new().fail_action("goto");
        let driver = factory.build();
        let log = factory.log.clone();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: broken_navigation
    steps:
      - navigate: https://site.test/login
      - fill:
          field: "#username"
          value: student
    expect:
      urlContains: login
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(1)).await;
        assert_eq!(outcome.kind, OutcomeKind::Error);

        let calls = log.lock().expect("log lock").clone();
        assert!(calls.iter().any(|c| c.starts_with("goto")));
        assert!(!calls.iter().any(|c| c.starts_with("fill")));
    }

    #[tokio::test]
    async fn test_required_wait_timeout_is_error() {
        let factory = ScriptedFactory::new();
        let driver = factory.build();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: missing_anchor
    steps:
      - navigate: https://site.test/login
      - waitFor:
          visible: "#username"
          timeoutMs: 1
    expect:
      urlContains: login
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(1)).await;
        assert_eq!(outcome.kind, OutcomeKind::Error);
        assert!(outcome.message.contains("required signal"));
    }

    #[tokio::test]
    async fn test_asserted_wait_timeout_is_fail() {
        let factory = ScriptedFactory::new();
        let driver = factory.build();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: banner_should_show
    steps:
      - navigate: https://site.test/login
      - waitFor:
          visible: "#flash"
          timeoutMs: 1
          onTimeout: fail
    expect:
      urlContains: login
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(1)).await;
        assert_eq!(outcome.kind, OutcomeKind::Fail);
    }

    #[tokio::test]
    async fn test_fill_clears_before_typing() {
        let factory = ScriptedFactory::new().url_on_click("https://site.test/after");
        let driver = factory.build();
        let log = factory.log.clone();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: blank_fields
    steps:
      - navigate: https://site.test/login
      - fill:
          field: "#username"
          value: ""
      - fill:
          field: "#password"
          value: ""
      - click: "#submit"
    expect:
      urlContains: after
      timeoutMs: 200
"##,
        );

        let outcome = run_scenario(&driver, &scenario, None, Duration::from_millis(200)).await;
        assert_eq!(outcome.kind, OutcomeKind::Pass);

        let calls = log.lock().expect("log lock").clone();
        let clear_user = calls.iter().position(|c| c == "clear #username");
        let fill_user = calls.iter().position(|c| c == "fill #username=");
        let clear_pass = calls.iter().position(|c| c == "clear #password");
        let fill_pass = calls.iter().position(|c| c == "fill #password=");
        assert!(clear_user.expect("clear logged") < fill_user.expect("fill logged"));
        assert!(clear_pass.expect("clear logged") < fill_pass.expect("fill logged"));
    }

    #[tokio::test]
    async fn test_relative_navigation_uses_base_url() {
        let factory = ScriptedFactory::new();
        let driver = factory.build();
        let log = factory.log.clone();

        let scenario = scenario_from(
            r##"
scenarios:
  - id: relative_nav
    steps:
      - navigate: /practice-test-login/
    expect:
      urlContains: practice-test-login
      timeoutMs: 200
"##,
        );

        let outcome = run_scenario(
            &driver,
            &scenario,
            Some("https://practicetestautomation.com"),
            Duration::from_millis(200),
        )
        .await;
        assert_eq!(outcome.kind, OutcomeKind::Pass);

        let calls = log.lock().expect("log lock").clone();
        assert!(calls
            .iter()
            .any(|c| c == "goto https://practicetestautomation.com/practice-test-login/"));
    }
}
