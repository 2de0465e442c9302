// SPDX-License-Identifier: MIT OR Apache-2.0
//! Autoplay scheduling.
//!
//! The host reports elapsed time and the scheduler turns it into whole
//! ticks at a fixed period. Stopping discards any partially accumulated
//! period, so a tick that was due "soon" never fires after a stop.

use std::time::Duration;

/// Autoplay state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayState {
    /// Not scheduling ticks
    #[default]
    Stopped,
    /// Emitting a tick every period
    Running,
}

/// Fixed-period tick scheduler
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    /// Current state
    state: AutoplayState,
    /// Time between ticks
    period: Duration,
    /// Time accumulated toward the next tick
    accumulated: Duration,
}

impl AutoplayScheduler {
    /// Create a stopped scheduler with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            state: AutoplayState::Stopped,
            period,
            accumulated: Duration::ZERO,
        }
    }

    /// Create a scheduler from a period in milliseconds
    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Start scheduling. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = AutoplayState::Running;
        self.accumulated = Duration::ZERO;
        true
    }

    /// Stop scheduling and drop the pending period. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = AutoplayState::Stopped;
        self.accumulated = Duration::ZERO;
        true
    }

    /// Advance the clock and return how many ticks are due.
    ///
    /// At most `u32::MAX` ticks are reported per call; ticks beyond that are
    /// dropped along with the rest of the accumulated time.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() || self.period.is_zero() {
            return 0;
        }

        self.accumulated = self.accumulated.saturating_add(elapsed);
        let period = self.period.as_nanos();
        let accumulated = self.accumulated.as_nanos();

        let due = match u32::try_from(accumulated / period) {
            Ok(due) => {
                self.accumulated = duration_from_nanos(accumulated % period);
                due
            }
            Err(_) => {
                tracing::warn!("Autoplay fell behind by {:?}, dropping excess ticks", self.accumulated);
                self.accumulated = Duration::ZERO;
                u32::MAX
            }
        };
        due
    }

    /// Check if currently running
    pub fn is_running(&self) -> bool {
        self.state == AutoplayState::Running
    }

    /// Get the current state
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Get the tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next tick, if running
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.is_running()
            .then(|| self.period.saturating_sub(self.accumulated))
    }
}

fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).unwrap_or_default();
    Duration::new(secs, subsec)
}
