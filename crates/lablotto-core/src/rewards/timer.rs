//! Earning timer.
//!
//! A wall-clock countdown with no internal thread. The owner calls
//! [`EarningTimer::tick`] whenever it wants the remaining time refreshed;
//! the call that first observes zero reports expiry, later calls do nothing.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed -> Running -> ...
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarningTimer {
    is_active: bool,
    start_timestamp: Option<DateTime<Utc>>,
    duration_secs: u64,
    time_remaining: u64,
    has_awarded_points: bool,
}

impl EarningTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        match (self.is_active, self.has_awarded_points) {
            (true, _) => TimerPhase::Running,
            (false, true) => TimerPhase::Completed,
            (false, false) => TimerPhase::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn has_awarded_points(&self) -> bool {
        self.has_awarded_points
    }

    pub fn start_timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_timestamp
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Seconds left as of the last `start` or `tick`.
    pub fn time_remaining(&self) -> u64 {
        self.time_remaining
    }

    /// Seconds left at `now`, without mutating.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> u64 {
        if !self.is_active {
            return self.time_remaining;
        }
        let Some(start) = self.start_timestamp else {
            return 0;
        };
        let elapsed = u64::try_from((now - start).num_seconds()).unwrap_or(0);
        self.duration_secs.saturating_sub(elapsed)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Bring a decoded timer back in line with its invariants. A running
    /// timer without a start instant, or one already marked as awarded,
    /// is reset to `Idle`. Returns `true` when anything changed.
    pub fn repair(&mut self) -> bool {
        if self.is_active && (self.start_timestamp.is_none() || self.has_awarded_points) {
            *self = Self::new();
            return true;
        }
        false
    }

    /// Begin a countdown. Returns `false` and leaves the timer untouched
    /// while one is already running.
    pub fn start(&mut self, duration_secs: u64, now: DateTime<Utc>) -> bool {
        if self.is_active {
            return false;
        }
        self.is_active = true;
        self.start_timestamp = Some(now);
        self.duration_secs = duration_secs;
        self.time_remaining = duration_secs;
        self.has_awarded_points = false;
        true
    }

    /// Refresh the remaining time. Returns `true` exactly once per run, on
    /// the call that finds the countdown at zero; the caller grants the
    /// reward on that signal.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        self.time_remaining = self.remaining_at(now);
        if self.time_remaining > 0 || self.has_awarded_points {
            return false;
        }
        self.has_awarded_points = true;
        self.is_active = false;
        true
    }
}

/// Format seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn starts_idle() {
        let timer = EarningTimer::new();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.time_remaining(), 0);
        assert!(timer.start_timestamp().is_none());
    }

    #[test]
    fn start_then_tick_counts_down() {
        let mut timer = EarningTimer::new();
        assert!(timer.start(60, t0()));
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.start_timestamp(), Some(t0()));

        assert!(!timer.tick(t0() + Duration::seconds(20)));
        assert_eq!(timer.time_remaining(), 40);
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn second_start_while_running_is_rejected() {
        let mut timer = EarningTimer::new();
        assert!(timer.start(60, t0()));
        assert!(!timer.start(10, t0() + Duration::seconds(5)));
        assert_eq!(timer.duration_secs(), 60);
        assert_eq!(timer.start_timestamp(), Some(t0()));
    }

    #[test]
    fn expiry_reported_once() {
        let mut timer = EarningTimer::new();
        timer.start(60, t0());
        assert!(timer.tick(t0() + Duration::seconds(61)));
        assert_eq!(timer.phase(), TimerPhase::Completed);
        assert_eq!(timer.time_remaining(), 0);
        assert!(!timer.tick(t0() + Duration::seconds(62)));
        assert!(!timer.tick(t0() + Duration::seconds(6000)));
    }

    #[test]
    fn restart_after_completion_clears_award_flag() {
        let mut timer = EarningTimer::new();
        timer.start(1, t0());
        assert!(timer.tick(t0() + Duration::seconds(1)));
        assert!(timer.start(30, t0() + Duration::seconds(2)));
        assert!(!timer.has_awarded_points());
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn clock_going_backwards_does_not_underflow() {
        let mut timer = EarningTimer::new();
        timer.start(60, t0());
        assert!(!timer.tick(t0() - Duration::seconds(30)));
        assert_eq!(timer.time_remaining(), 60);
    }

    #[test]
    fn partial_object_decodes_with_defaults() {
        let timer: EarningTimer = serde_json::from_str(r#"{"has_awarded_points": true}"#).unwrap();
        assert_eq!(timer.phase(), TimerPhase::Completed);
        assert!(!timer.is_active());
    }

    #[test]
    fn repair_resets_running_timer_without_start() {
        let mut timer: EarningTimer =
            serde_json::from_str(r#"{"is_active": true, "duration_secs": 28800}"#).unwrap();
        assert!(timer.repair());
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert!(!timer.tick(t0()));

        let mut healthy = EarningTimer::new();
        healthy.start(60, t0());
        assert!(!healthy.repair());
        assert_eq!(healthy.phase(), TimerPhase::Running);
    }

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(3661), "01:01:01");
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(59), "00:00:59");
        assert_eq!(format_time(8 * 3600), "08:00:00");
        assert_eq!(format_time(100 * 3600), "100:00:00");
    }
}
