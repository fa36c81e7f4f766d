//! Debounced propagation of free-text tag input.
//!
//! [`Debouncer`] keeps the text the user is typing separate from the
//! committed value held by the gallery filters. Each keystroke restarts a
//! quiet period; only once it elapses without further input is the local
//! value released for commit.
//!
//! The caller owns the clock. It passes the current [`Instant`] to
//! [`input`](Debouncer::input) and [`poll`](Debouncer::poll) and sleeps
//! until [`deadline`](Debouncer::deadline) in between, which keeps this
//! type free of timers and testable without waiting.

use std::time::Duration;

use web_time::Instant;

/// Quiet period for the tag filter input.
pub const TAG_DEBOUNCE: Duration = Duration::from_millis(500);

/// What the caller should do after [`Debouncer::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settle {
    /// Commit this value.
    Release(String),
    /// The quiet period is still running; sleep this long and step again.
    Wait(Duration),
    /// Nothing is pending.
    Idle,
}

/// Holds uncommitted text and the pending quiet-period deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    quiet: Duration,
    local: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Start with `committed` as both the local and committed value.
    #[must_use]
    pub fn new(committed: impl Into<String>, quiet: Duration) -> Self {
        let committed = committed.into();
        Self {
            quiet,
            local: committed.clone(),
            committed,
            deadline: None,
        }
    }

    /// The text currently in the input.
    #[must_use]
    pub fn local(&self) -> &str {
        &self.local
    }

    /// The last value released or synchronised from outside.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// When the caller should next [`poll`](Self::poll), if anything is
    /// pending.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// `true` while the input differs from the committed value.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.local != self.committed
    }

    /// Record a keystroke and restart the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.local = text.into();
        self.deadline = Some(now + self.quiet);
    }

    /// Release the local value if the quiet period has elapsed.
    ///
    /// Returns `Some(value)` exactly once per settled change. Returns
    /// `None` before the deadline, when nothing is pending, or when the
    /// text settled back on the committed value.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        if !self.is_pending() {
            return None;
        }
        self.committed.clone_from(&self.local);
        Some(self.local.clone())
    }

    /// Poll, and if the deadline has not been reached yet, report how long
    /// to sleep before trying again.
    ///
    /// Timers may fire early relative to a coarse clock, so a waiter must
    /// keep stepping until it sees [`Settle::Release`] or [`Settle::Idle`].
    /// Waits are at least one millisecond.
    pub fn step(&mut self, now: Instant) -> Settle {
        if let Some(value) = self.poll(now) {
            return Settle::Release(value);
        }
        match self.deadline {
            Some(deadline) => Settle::Wait(
                deadline
                    .saturating_duration_since(now)
                    .max(Duration::from_millis(1)),
            ),
            None => Settle::Idle,
        }
    }

    /// Adopt a committed value changed elsewhere (e.g. a filter reset).
    ///
    /// Overwrites the local text and cancels any pending release.
    pub fn sync_committed(&mut self, value: &str) {
        if self.committed == value {
            return;
        }
        value.clone_into(&mut self.committed);
        value.clone_into(&mut self.local);
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn nothing_pending_initially() {
        let mut d = Debouncer::new("", TAG_DEBOUNCE);
        assert_eq!(d.deadline(), None);
        assert!(!d.is_pending());
        assert_eq!(d.poll(Instant::now()), None);
    }

    #[test]
    fn rapid_keystrokes_release_once_with_last_value() {
        let start = Instant::now();
        let mut d = Debouncer::new("", TAG_DEBOUNCE);

        let mut t = start;
        for text in ["r", "re", "rep", "repo", "report"] {
            d.input(text, t);
            // Polling between keystrokes never releases.
            assert_eq!(d.poll(t + ms(100)), None);
            t += ms(100);
        }
        let last_keystroke = t - ms(100);

        let mut released = Vec::new();
        let mut now = last_keystroke;
        while now <= last_keystroke + ms(2000) {
            if let Some(value) = d.poll(now) {
                released.push((value, now));
            }
            now += ms(10);
        }

        assert_eq!(released.len(), 1, "expected exactly one release");
        let (value, at) = &released[0];
        assert_eq!(value, "report");
        assert!(*at >= last_keystroke + TAG_DEBOUNCE);
        assert_eq!(d.committed(), "report");
        assert!(!d.is_pending());
    }

    #[test]
    fn early_wakeup_is_told_to_wait_again() {
        let start = Instant::now();
        let mut d = Debouncer::new("", TAG_DEBOUNCE);
        d.input("report", start);

        // A timer that fires a millisecond early must not lose the value.
        assert_eq!(d.step(start + ms(499)), Settle::Wait(ms(1)));
        assert!(d.is_pending());
        assert_eq!(d.step(start + ms(500)), Settle::Release("report".to_owned()));
        assert_eq!(d.step(start + ms(501)), Settle::Idle);
        assert!(!d.is_pending());
    }

    #[test]
    fn step_waits_out_the_remaining_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new("", TAG_DEBOUNCE);
        d.input("a", start);
        d.input("ab", start + ms(300));
        assert_eq!(d.step(start + ms(500)), Settle::Wait(ms(300)));
        assert_eq!(d.step(start + ms(800)), Settle::Release("ab".to_owned()));
    }

    #[test]
    fn step_without_input_is_idle() {
        let mut d = Debouncer::new("x", TAG_DEBOUNCE);
        assert_eq!(d.step(Instant::now()), Settle::Idle);
    }

    #[test]
    fn not_released_before_quiet_period() {
        let start = Instant::now();
        let mut d = Debouncer::new("", TAG_DEBOUNCE);
        d.input("a", start);
        assert_eq!(d.poll(start + ms(499)), None);
        assert_eq!(d.poll(start + ms(500)), Some("a".to_owned()));
    }

    #[test]
    fn returning_to_committed_value_skips_release() {
        let start = Instant::now();
        let mut d = Debouncer::new("finance", TAG_DEBOUNCE);
        d.input("financ", start);
        assert!(d.is_pending());
        d.input("finance", start + ms(50));
        assert!(!d.is_pending());
        assert_eq!(d.poll(start + ms(1000)), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn external_change_resyncs_immediately() {
        let start = Instant::now();
        let mut d = Debouncer::new("old", TAG_DEBOUNCE);
        d.input("typing", start);
        d.sync_committed("");
        assert_eq!(d.local(), "");
        assert_eq!(d.committed(), "");
        assert_eq!(d.deadline(), None);
        assert_eq!(d.poll(start + ms(1000)), None);
    }

    #[test]
    fn sync_with_same_value_keeps_pending_input() {
        let start = Instant::now();
        let mut d = Debouncer::new("a", TAG_DEBOUNCE);
        d.input("ab", start);
        // The committed value is unchanged, so typing continues.
        d.sync_committed("a");
        assert_eq!(d.local(), "ab");
        assert_eq!(d.poll(start + ms(500)), Some("ab".to_owned()));
    }

    #[test]
    fn second_burst_releases_again() {
        let start = Instant::now();
        let mut d = Debouncer::new("", TAG_DEBOUNCE);
        d.input("a", start);
        assert_eq!(d.poll(start + ms(600)), Some("a".to_owned()));
        d.input("ab", start + ms(700));
        assert_eq!(d.poll(start + ms(1300)), Some("ab".to_owned()));
    }
}
