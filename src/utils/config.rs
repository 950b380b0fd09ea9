/// Application defaults
pub struct Config {
    /// Default window for page-state waits (ms)
    pub default_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timeout_ms: 10_000,
        }
    }
}
