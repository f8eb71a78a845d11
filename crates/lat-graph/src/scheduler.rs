//! Latency refresh schedule
//!
//! A running/stopped state machine around a tokio interval. The schedule
//! only decides *when* a refresh happens; the refresh itself is
//! [`crate::LatencyExplorer::refresh_latencies`].

use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Whether periodic refresh is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No ticks are produced
    #[default]
    Stopped,
    /// A tick is produced every period
    Running,
}

/// Recurring refresh timer with explicit start and stop
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct RefreshSchedule {
    period: Duration,
    timer: Interval,
    state: SchedulerState,
}

impl RefreshSchedule {
    /// Create a stopped schedule with the given period
    pub fn new(period: Duration) -> Self {
        // A zero period would make the interval panic
        let period = period.max(Duration::from_millis(1));
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            period,
            timer,
            state: SchedulerState::Stopped,
        }
    }

    /// Create a stopped schedule from a period in milliseconds
    pub fn from_millis(period_ms: u64) -> Self {
        Self::new(Duration::from_millis(period_ms))
    }

    /// Tick period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Current state
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// True while ticks are being produced
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Start ticking; the first tick comes one full period from now
    ///
    /// Returns false if already running (the phase is left alone).
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.timer.reset();
        self.state = SchedulerState::Running;
        true
    }

    /// Stop ticking; returns false if already stopped
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = SchedulerState::Stopped;
        true
    }

    /// Wait for the next tick
    ///
    /// Only poll this while running; a stopped schedule still has a live
    /// timer underneath.
    pub async fn tick(&mut self) -> Instant {
        self.timer.tick().await
    }
}
