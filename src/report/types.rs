use serde::{Deserialize, Serialize};

/// Classification of one scenario's result.
///
/// `Fail` means the assertion ran and the observed state did not match
/// expectation. `Error` means the scenario could not complete due to an
/// infrastructure fault. The two are never merged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Pass,
    Fail,
    Error,
}

impl OutcomeKind {
    /// Report-line tag for this classification
    pub fn tag(&self) -> &'static str {
        match self {
            OutcomeKind::Pass => "[PASS]",
            OutcomeKind::Fail => "[FAIL]",
            OutcomeKind::Error => "[ERROR]",
        }
    }
}

/// The classified result of running one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub scenario: String,
    pub kind: OutcomeKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Outcome {
    pub fn pass(scenario: &str, message: impl Into<String>) -> Self {
        Self::new(scenario, OutcomeKind::Pass, message)
    }

    pub fn fail(scenario: &str, message: impl Into<String>) -> Self {
        Self::new(scenario, OutcomeKind::Fail, message)
    }

    pub fn error(scenario: &str, message: impl Into<String>) -> Self {
        Self::new(scenario, OutcomeKind::Error, message)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    fn new(scenario: &str, kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            scenario: scenario.to_string(),
            kind,
            message: message.into(),
            duration_ms: None,
        }
    }
}

/// All outcomes of one full run, in submission order, plus derived counts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub outcomes: Vec<Outcome>,
    pub passed: u32,
    pub failed: u32,
    pub errored: u32,
    pub total: u32,
}

/// Fold outcomes into a summary. Pure and order-preserving: the
/// outcomes come back exactly as submitted.
pub fn summarize(outcomes: Vec<Outcome>) -> RunSummary {
    let (passed, failed, errored) =
        outcomes
            .iter()
            .fold((0, 0, 0), |(p, f, e), outcome| match outcome.kind {
                OutcomeKind::Pass => (p + 1, f, e),
                OutcomeKind::Fail => (p, f + 1, e),
                OutcomeKind::Error => (p, f, e + 1),
            });

    RunSummary {
        total: outcomes.len() as u32,
        outcomes,
        passed,
        failed,
        errored,
    }
}
