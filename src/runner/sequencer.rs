//! Ordered scenario execution over one shared session
//!
//! The Sequencer, not any individual scenario, owns session
//! acquisition and release. Scenarios only ever operate on a session
//! handed to them.

use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use super::scenario::run_scenario;
use crate::driver::session::SessionManager;
use crate::parser::types::Scenario;
use crate::report::types::{summarize, Outcome, OutcomeKind, RunSummary};

pub struct Sequencer {
    session: SessionManager,
    base_url: Option<String>,
    default_timeout: Duration,
}

impl Sequencer {
    pub fn new(
        session: SessionManager,
        base_url: Option<String>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            session,
            base_url,
            default_timeout,
        }
    }

    /// Run every scenario in submission order against one shared
    /// session, appending an outcome per scenario regardless of its
    /// classification. The session is released exactly once after the
    /// loop, whatever happened inside it.
    pub async fn run_all(&mut self, scenarios: &[Scenario]) -> RunSummary {
        let mut outcomes = Vec::with_capacity(scenarios.len());

        if let Err(err) = self.drive_all(scenarios, &mut outcomes).await {
            // nothing per-scenario is expected to escape the loop;
            // record rather than propagate so the report still renders
            outcomes.push(Outcome::error("run", format!("{err:#}")));
        }

        self.session.release().await;
        summarize(outcomes)
    }

    async fn drive_all(
        &mut self,
        scenarios: &[Scenario],
        outcomes: &mut Vec<Outcome>,
    ) -> Result<()> {
        for (index, scenario) in scenarios.iter().enumerate() {
            // lazy: the first scenario creates the session, later ones
            // reuse it while it stays alive
            let driver = match self.session.acquire().await {
                Ok(driver) => driver,
                Err(err) => {
                    log::error!("{err}");
                    outcomes.push(Outcome::error(&scenario.id, err.to_string()));
                    for skipped in &scenarios[index + 1..] {
                        outcomes.push(Outcome::error(&skipped.id, "skipped: session unavailable"));
                    }
                    return Ok(());
                }
            };

            println!("{} {}", "▶".green().bold(), scenario.id);
            let outcome =
                run_scenario(driver, scenario, self.base_url.as_deref(), self.default_timeout)
                    .await;
            print_outcome(&outcome);
            outcomes.push(outcome);
        }

        Ok(())
    }
}

fn print_outcome(outcome: &Outcome) {
    let tag = match outcome.kind {
        OutcomeKind::Pass => outcome.kind.tag().green(),
        OutcomeKind::Fail => outcome.kind.tag().red(),
        OutcomeKind::Error => outcome.kind.tag().yellow(),
    };
    match outcome.duration_ms {
        Some(ms) => println!("  {} {} ({}ms)", tag, outcome.message, ms),
        None => println!("  {} {}", tag, outcome.message),
    }
}
