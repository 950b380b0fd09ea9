pub mod types;
pub mod yaml;

pub use types::{Condition, Expectation, Scenario, ScenarioSuite, Step, TimeoutDisposition};
pub use yaml::{parse_suite_content, parse_suite_file};
