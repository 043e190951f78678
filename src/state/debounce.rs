//! Debounced query emission.
//!
//! Turns raw text changes into a trimmed query after a quiet period. Time is
//! passed in explicitly, so the debouncer is a pure state machine that the event
//! loop drives and tests drive with synthetic instants.

use std::time::{Duration, Instant};
use tracing::warn;

/// Default quiet period before the query is emitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Debouncer for search box text.
///
/// Holds at most one pending emission. Each input replaces it and restarts the
/// timer; the replaced value is never emitted.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl Debouncer {
    /// Create a debouncer and schedule the initial value.
    ///
    /// The initial value is emitted once the window elapses even when it is
    /// empty, so consumers can tell "not yet evaluated" from "evaluated, empty".
    pub fn new(initial: impl Into<String>, delay: Duration, now: Instant) -> Self {
        Self {
            delay,
            pending: Some(Pending {
                text: initial.into(),
                deadline: now + delay,
            }),
        }
    }

    /// Configured quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a text change, cancelling any pending emission.
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            text: text.into(),
            deadline: now + self.delay,
        });
    }

    /// Emit the trimmed pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self
                .pending
                .take()
                .map(|pending| pending.text.trim().to_string()),
            _ => None,
        }
    }

    /// Like [`poll`](Self::poll), but hands the value to `callback`.
    ///
    /// A callback failure is logged and swallowed; the pending slot is already
    /// cleared, so the debouncer keeps accepting input. Returns whether a value
    /// was emitted.
    pub fn poll_with<F, E>(&mut self, now: Instant, callback: F) -> bool
    where
        F: FnOnce(&str) -> Result<(), E>,
        E: std::fmt::Display,
    {
        let Some(value) = self.poll(now) else {
            return false;
        };
        if let Err(err) = callback(&value) {
            warn!(query = %value, error = %err, "Query change handler failed");
        }
        true
    }

    /// Drop any pending emission. Nothing is emitted afterwards until new input.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending emission, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// True while an emission is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn initial_value_is_emitted_after_window() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("react", DEFAULT_DEBOUNCE, t0);

        assert_eq!(debouncer.poll(t0 + ms(499)), None);
        assert_eq!(debouncer.poll(t0 + ms(500)), Some("react".to_string()));
        assert_eq!(debouncer.poll(t0 + ms(1000)), None, "Emits only once");
    }

    #[test]
    fn empty_initial_value_is_still_emitted() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", DEFAULT_DEBOUNCE, t0);
        assert_eq!(debouncer.poll(t0 + ms(500)), Some(String::new()));
    }

    #[test]
    fn burst_of_inputs_emits_last_value_once() {
        // Inputs at t, t+20ms, t+40ms with a 500ms window.
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", DEFAULT_DEBOUNCE, t0);
        debouncer.cancel();

        debouncer.on_input("r", t0);
        debouncer.on_input("re", t0 + ms(20));
        debouncer.on_input("rea", t0 + ms(40));

        let mut emissions = Vec::new();
        for step in 0..=120 {
            if let Some(value) = debouncer.poll(t0 + ms(step * 5)) {
                emissions.push((step * 5, value));
            }
        }

        assert_eq!(emissions, vec![(540, "rea".to_string())]);
    }

    #[test]
    fn new_input_restarts_timer() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", ms(150), t0);
        debouncer.on_input("first", t0);
        debouncer.on_input("final", t0 + ms(50));

        assert_eq!(debouncer.poll(t0 + ms(150)), None, "Restarted at t0+50");
        assert_eq!(debouncer.poll(t0 + ms(200)), Some("final".to_string()));
    }

    #[test]
    fn emission_is_trimmed() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", ms(50), t0);
        debouncer.on_input("  vue  ", t0);
        assert_eq!(debouncer.poll(t0 + ms(50)), Some("vue".to_string()));
    }

    #[test]
    fn whitespace_only_emits_empty() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", ms(50), t0);
        debouncer.on_input(" ", t0);
        assert_eq!(debouncer.poll(t0 + ms(50)), Some(String::new()));
    }

    #[test]
    fn cancel_prevents_emission() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("react", ms(50), t0);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(1000)), None);
        assert_eq!(debouncer.next_deadline(), None);
    }

    #[test]
    fn next_deadline_tracks_latest_input() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("", ms(100), t0);
        assert_eq!(debouncer.next_deadline(), Some(t0 + ms(100)));
        debouncer.on_input("x", t0 + ms(30));
        assert_eq!(debouncer.next_deadline(), Some(t0 + ms(130)));
    }

    #[test]
    fn failing_callback_does_not_break_debouncer() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("boom", ms(10), t0);

        let emitted = debouncer.poll_with(t0 + ms(10), |_| Err::<(), _>("handler exploded"));
        assert!(emitted);
        assert!(!debouncer.is_pending());

        // Still accepts typing afterwards.
        debouncer.on_input("next", t0 + ms(20));
        let mut seen = None;
        debouncer.poll_with(t0 + ms(30), |value| {
            seen = Some(value.to_string());
            Ok::<(), String>(())
        });
        assert_eq!(seen.as_deref(), Some("next"));
    }

    #[test]
    fn poll_with_reports_nothing_before_deadline() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new("x", ms(10), t0);
        let emitted = debouncer.poll_with(t0, |_| Ok::<(), String>(()));
        assert!(!emitted);
        assert!(debouncer.is_pending());
    }
}
