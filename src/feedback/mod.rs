//! Feedback layer - the transient indicator and its timers
//!
//! The indicator is the only shared mutable state between the Network and
//! App layers. Timers drive it through an injected [`Scheduler`] so tests can
//! run on a virtual clock.

pub mod indicator;
pub mod scheduler;

pub use indicator::{Feedback, FeedbackIndicator, IndicatorState, Notice, Signal, Timings, Tone};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
