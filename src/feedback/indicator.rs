//! Transient success/error indicator and the message area beside it

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::constants::{ERROR_HOLD_MS, FADE_MS, SUCCESS_HOLD_MS, UPLOAD_HOLD_MS};
use crate::feedback::scheduler::{Scheduler, TimerHandle};

/// Visual state of the indicator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndicatorState {
    #[default]
    Hidden,
    SuccessShown,
    SuccessFading,
    ErrorShown,
    ErrorFading,
}

impl IndicatorState {
    pub fn is_fading(&self) -> bool {
        matches!(
            self,
            IndicatorState::SuccessFading | IndicatorState::ErrorFading
        )
    }
}

/// Colour of a notice in the message area
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
}

/// Text shown in the message area
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

impl Notice {
    pub fn good(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            tone: Tone::Good,
        }
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Notice {
            text: text.into(),
            tone: Tone::Bad,
        }
    }
}

/// Everything the UI needs to draw feedback
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feedback {
    pub state: IndicatorState,
    pub label: String,
    pub notice: Option<Notice>,
    /// Bumped on every reset or outcome
    pub cycle: u64,
}

/// Hold and fade durations, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub success_hold_ms: u64,
    pub upload_hold_ms: u64,
    pub error_hold_ms: u64,
    pub fade_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            success_hold_ms: SUCCESS_HOLD_MS,
            upload_hold_ms: UPLOAD_HOLD_MS,
            error_hold_ms: ERROR_HOLD_MS,
            fade_ms: FADE_MS,
        }
    }
}

impl Timings {
    pub fn success_hold(&self) -> Duration {
        Duration::from_millis(self.success_hold_ms)
    }

    pub fn upload_hold(&self) -> Duration {
        Duration::from_millis(self.upload_hold_ms)
    }

    pub fn error_hold(&self) -> Duration {
        Duration::from_millis(self.error_hold_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Outcome to display
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    Success { label: String, hold: Duration },
    Error { label: String, hold: Duration },
}

struct Shared {
    tx: watch::Sender<Feedback>,
    scheduler: Arc<dyn Scheduler>,
    timings: Timings,
    /// Cancel pending timers when a new cycle starts
    strict: bool,
    pending: Mutex<Vec<TimerHandle>>,
}

/// The single indicator. Clones share state.
#[derive(Clone)]
pub struct FeedbackIndicator {
    shared: Arc<Shared>,
}

impl FeedbackIndicator {
    pub fn new(scheduler: Arc<dyn Scheduler>, timings: Timings, strict: bool) -> Self {
        let (tx, _) = watch::channel(Feedback::default());
        FeedbackIndicator {
            shared: Arc::new(Shared {
                tx,
                scheduler,
                timings,
                strict,
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn timings(&self) -> Timings {
        self.shared.timings
    }

    pub fn state(&self) -> IndicatorState {
        self.shared.tx.borrow().state
    }

    pub fn snapshot(&self) -> Feedback {
        self.shared.tx.borrow().clone()
    }

    /// Receiver notified on every visible change, including timer transitions
    pub fn subscribe(&self) -> watch::Receiver<Feedback> {
        self.shared.tx.subscribe()
    }

    /// Hide the indicator before a new request starts
    pub fn reset(&self) {
        let mut pending = self.lock_pending();
        self.cancel_superseded(&mut pending);
        self.shared.tx.send_if_modified(|fb| {
            let changed = fb.state != IndicatorState::Hidden || !fb.label.is_empty();
            fb.state = IndicatorState::Hidden;
            fb.label.clear();
            fb.cycle += 1;
            changed
        });
    }

    /// Write to the message area
    pub fn post_notice(&self, notice: Notice) {
        self.shared.tx.send_modify(|fb| fb.notice = Some(notice));
    }

    /// Show an outcome and schedule its fade and hide
    pub fn set_outcome(&self, signal: Signal) {
        let (shown, fading, label, hold) = match signal {
            Signal::Success { label, hold } => (
                IndicatorState::SuccessShown,
                IndicatorState::SuccessFading,
                label,
                hold,
            ),
            Signal::Error { label, hold } => (
                IndicatorState::ErrorShown,
                IndicatorState::ErrorFading,
                label,
                hold,
            ),
        };

        // Held until the fade timer is tracked so concurrent outcomes serialize
        let mut pending = self.lock_pending();
        self.cancel_superseded(&mut pending);

        let mut cycle = 0;
        self.shared.tx.send_modify(|fb| {
            fb.cycle += 1;
            cycle = fb.cycle;
            fb.state = shown;
            fb.label = label;
        });

        let this = self.clone();
        let handle = self.shared.scheduler.schedule(
            hold,
            Box::new(move || this.begin_fade(cycle, shown, fading)),
        );
        self.track(&mut pending, handle);
    }

    fn begin_fade(&self, cycle: u64, shown: IndicatorState, fading: IndicatorState) {
        let mut pending = self.lock_pending();
        if !self.transition(cycle, shown, fading) {
            return;
        }
        let next = self.clone();
        let hide = self.shared.scheduler.schedule(
            self.shared.timings.fade(),
            Box::new(move || {
                next.transition(cycle, fading, IndicatorState::Hidden);
            }),
        );
        self.track(&mut pending, hide);
    }

    fn cancel_superseded(&self, pending: &mut Vec<TimerHandle>) {
        if self.shared.strict {
            for handle in pending.drain(..) {
                handle.cancel();
            }
        }
    }

    /// Apply `from -> to` unless the indicator has moved on. Returns whether it applied.
    fn transition(&self, cycle: u64, from: IndicatorState, to: IndicatorState) -> bool {
        let strict = self.shared.strict;
        let mut applied = false;
        self.shared.tx.send_if_modified(|fb| {
            if fb.state != from || (strict && fb.cycle != cycle) {
                return false;
            }
            fb.state = to;
            if to == IndicatorState::Hidden {
                fb.label.clear();
            }
            applied = true;
            true
        });
        if !applied {
            tracing::debug!(cycle, ?from, ?to, "Stale indicator timer ignored");
        }
        applied
    }

    fn track(&self, pending: &mut Vec<TimerHandle>, handle: TimerHandle) {
        if self.shared.strict {
            pending.push(handle);
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Vec<TimerHandle>> {
        self.shared
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::scheduler::ManualScheduler;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn indicator(strict: bool) -> (FeedbackIndicator, ManualScheduler) {
        let clock = ManualScheduler::new();
        let indicator = FeedbackIndicator::new(Arc::new(clock.clone()), Timings::default(), strict);
        (indicator, clock)
    }

    fn success(hold: u64) -> Signal {
        Signal::Success {
            label: "✓".into(),
            hold: ms(hold),
        }
    }

    fn error(hold: u64) -> Signal {
        Signal::Error {
            label: "✗".into(),
            hold: ms(hold),
        }
    }

    #[test]
    fn test_success_cycle_timing() {
        let (ind, clock) = indicator(true);
        assert_eq!(ind.state(), IndicatorState::Hidden);

        ind.set_outcome(success(2000));
        assert_eq!(ind.state(), IndicatorState::SuccessShown);
        assert_eq!(ind.snapshot().label, "✓");

        clock.advance(ms(1999));
        assert_eq!(ind.state(), IndicatorState::SuccessShown);
        clock.advance(ms(1));
        assert_eq!(ind.state(), IndicatorState::SuccessFading);
        clock.advance(ms(499));
        assert_eq!(ind.state(), IndicatorState::SuccessFading);
        clock.advance(ms(1));
        assert_eq!(ind.state(), IndicatorState::Hidden);
        assert!(ind.snapshot().label.is_empty());
    }

    #[test]
    fn test_error_cycle_timing() {
        let (ind, clock) = indicator(true);
        ind.set_outcome(error(3000));
        assert_eq!(ind.state(), IndicatorState::ErrorShown);

        clock.advance(ms(2999));
        assert_eq!(ind.state(), IndicatorState::ErrorShown);
        clock.advance(ms(1));
        assert_eq!(ind.state(), IndicatorState::ErrorFading);
        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::Hidden);
    }

    #[test]
    fn test_strict_mode_cancels_superseded_timers() {
        let (ind, clock) = indicator(true);
        ind.set_outcome(success(2000));
        clock.advance(ms(1500));
        ind.set_outcome(error(3000));

        // the success fade at t=2000 was cancelled
        clock.advance(ms(600));
        assert_eq!(ind.state(), IndicatorState::ErrorShown);
        assert_eq!(clock.pending(), 1);

        clock.advance(ms(2400));
        assert_eq!(ind.state(), IndicatorState::ErrorFading);
        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::Hidden);
    }

    #[test]
    fn test_strict_mode_restarts_hold_on_repeat_success() {
        let (ind, clock) = indicator(true);
        ind.set_outcome(success(2000));
        clock.advance(ms(1500));
        ind.set_outcome(success(2000));

        clock.advance(ms(1000));
        assert_eq!(ind.state(), IndicatorState::SuccessShown);
        clock.advance(ms(1000));
        assert_eq!(ind.state(), IndicatorState::SuccessFading);
    }

    #[test]
    fn test_loose_mode_stale_timer_is_noop_after_state_moves_on() {
        let (ind, clock) = indicator(false);
        ind.set_outcome(success(2000));
        clock.advance(ms(1500));
        ind.set_outcome(error(3000));

        // stale success fade fires at t=2000 but the state is ErrorShown
        clock.advance(ms(600));
        assert_eq!(ind.state(), IndicatorState::ErrorShown);
        clock.advance(ms(2400));
        assert_eq!(ind.state(), IndicatorState::ErrorFading);
        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::Hidden);
    }

    #[test]
    fn test_loose_mode_stale_timer_may_fade_newer_success() {
        let (ind, clock) = indicator(false);
        ind.set_outcome(success(2000));
        clock.advance(ms(1500));
        ind.set_outcome(success(2000));

        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::SuccessFading);
        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::Hidden);

        // the second cycle's own timers find nothing to do
        clock.advance(ms(5000));
        assert_eq!(ind.state(), IndicatorState::Hidden);
    }

    #[test]
    fn test_reset_hides_and_stale_timers_stay_quiet() {
        for strict in [true, false] {
            let (ind, clock) = indicator(strict);
            ind.set_outcome(error(3000));
            ind.reset();
            assert_eq!(ind.state(), IndicatorState::Hidden);

            clock.advance(ms(10_000));
            assert_eq!(ind.state(), IndicatorState::Hidden);
        }
    }

    #[test]
    fn test_notice_survives_reset() {
        let (ind, _clock) = indicator(true);
        ind.post_notice(Notice::bad("duplicate row"));
        ind.reset();
        assert_eq!(ind.snapshot().notice, Some(Notice::bad("duplicate row")));
    }

    #[test]
    fn test_concurrent_outcomes_get_distinct_cycles() {
        let (ind, clock) = indicator(true);
        std::thread::scope(|s| {
            for _ in 0..8 {
                let ind = ind.clone();
                s.spawn(move || {
                    for _ in 0..500 {
                        ind.set_outcome(success(2000));
                    }
                });
            }
        });

        assert_eq!(ind.snapshot().cycle, 4000);
        // every superseded fade was cancelled
        assert_eq!(clock.pending(), 1);
        clock.advance(ms(2000));
        assert_eq!(ind.state(), IndicatorState::SuccessFading);
        clock.advance(ms(500));
        assert_eq!(ind.state(), IndicatorState::Hidden);
    }

    #[tokio::test]
    async fn test_subscribers_see_timer_transitions() {
        let (ind, clock) = indicator(true);
        let mut rx = ind.subscribe();

        ind.set_outcome(success(2000));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().state, IndicatorState::SuccessShown);

        clock.advance(ms(2000));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().state, IndicatorState::SuccessFading);
    }
}
