//! Bounded predicate polling
//!
//! Replaces fixed post-action sleeps with an explicit wait: block
//! until a predicate on live page state holds or a timeout elapses.

use anyhow::Result;
use std::future::Future;
use std::time::{Duration, Instant};

/// Minimum interval between predicate probes
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of a bounded wait. A timeout is data, not an error; the
/// caller decides what an absent signal means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, WaitOutcome::Satisfied)
    }
}

/// Poll `probe` until it reports true or `timeout` elapses.
///
/// The probe runs at least once, even with a zero timeout. Probe
/// failures propagate; they are an infrastructure fault at the call
/// site, not a timeout.
pub async fn await_condition<P, F>(mut probe: P, timeout: Duration) -> Result<WaitOutcome>
where
    P: FnMut() -> F,
    F: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if probe().await? {
            return Ok(WaitOutcome::Satisfied);
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(WaitOutcome::TimedOut);
        }

        let remaining = deadline.saturating_duration_since(now);
        tokio::time::sleep(MIN_POLL_INTERVAL.min(remaining)).await;
    }
}
