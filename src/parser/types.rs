use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed scenario suite from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSuite {
    #[serde(default)]
    pub name: Option<String>,

    /// Base URL prepended to relative navigation targets
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default, alias = "defaultTimeout")]
    pub default_timeout_ms: Option<u64>,

    #[serde(default)]
    pub headless: Option<bool>,

    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// One scripted sequence of navigation/interaction steps with a
/// declared expected outcome. Immutable once parsed; the `id` is the
/// stable name used in reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,

    pub expect: Expectation,
}

/// A single scenario step, executed strictly in order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Load a URL (absolute, or relative to the suite's base URL)
    #[serde(alias = "open")]
    Navigate(String),

    /// Clear a field, then type a value into it
    #[serde(alias = "input")]
    Fill(FillParams),

    /// Click an element
    #[serde(alias = "tap")]
    Click(String),

    /// Block until a page condition holds or the timeout elapses
    #[serde(alias = "waitUntil")]
    WaitFor(WaitForParams),
}

impl Step {
    pub fn display_name(&self) -> String {
        match self {
            Step::Navigate(url) => format!("navigate {url}"),
            Step::Fill(params) => format!("fill {}", params.field),
            Step::Click(target) => format!("click {target}"),
            Step::WaitFor(params) => format!("wait for {}", params.condition),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillParams {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitForParams {
    #[serde(flatten)]
    pub condition: Condition,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Mid-scenario waits are prerequisites unless declared otherwise
    #[serde(default = "TimeoutDisposition::error")]
    pub on_timeout: TimeoutDisposition,
}

/// The scenario's final assertion: a condition that must hold within
/// the window for the scenario to pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectation {
    #[serde(flatten)]
    pub condition: Condition,

    #[serde(default)]
    pub timeout_ms: Option<u64>,

    #[serde(default = "TimeoutDisposition::fail")]
    pub on_timeout: TimeoutDisposition,
}

/// A predicate over live page state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Element matching the selector is present and visible
    Visible(String),
    /// No visible element matches the selector
    NotVisible(String),
    /// Current URL contains the fragment
    UrlContains(String),
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Visible(selector) => write!(f, "element {selector} visible"),
            Condition::NotVisible(selector) => write!(f, "element {selector} not visible"),
            Condition::UrlContains(fragment) => write!(f, "url contains \"{fragment}\""),
        }
    }
}

/// Whether a timed-out wait is the behavior under test or a missing
/// prerequisite. Declared per wait by the scenario author, never
/// inferred from control flow.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutDisposition {
    /// Absence of the signal is itself the tested outcome
    Fail,
    /// The signal is required for the scenario to be meaningful
    Error,
}

impl TimeoutDisposition {
    fn fail() -> Self {
        TimeoutDisposition::Fail
    }

    fn error() -> Self {
        TimeoutDisposition::Error
    }
}
