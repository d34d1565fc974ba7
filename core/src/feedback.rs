use web_time::{Duration, Instant};

use crate::*;

/// Transient success/failure notice with a fixed auto-dismiss delay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    shown_at: Instant,
    dismiss_after: Duration,
}

impl Feedback {
    pub fn new(kind: FeedbackKind, shown_at: Instant, dismiss_after: Duration) -> Self {
        Self {
            kind,
            shown_at,
            dismiss_after,
        }
    }

    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.dismiss_after
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// Holds at most one feedback notice and decides what happens to gestures
/// that arrive while it is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackGate {
    config: GameConfig,
    current: Option<Feedback>,
}

impl FeedbackGate {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// Opens a notice for `puzzle`, replacing any that is still showing.
    pub fn show(&mut self, puzzle: PuzzleKind, kind: FeedbackKind, now: Instant) {
        let dismiss_after = self.config.feedback_delay(puzzle, kind);
        self.current = Some(Feedback::new(kind, now, dismiss_after));
    }

    /// Dismisses the notice once its delay has run out. Returns whether it was dismissed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.current {
            Some(feedback) if feedback.is_expired(now) => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Whether a gesture arriving at `now` may be handled.
    pub fn admit(&mut self, now: Instant) -> bool {
        self.tick(now);
        if self.current.is_none() {
            return true;
        }
        match self.config.gesture_policy {
            GesturePolicy::Ignore => {
                log::trace!("gesture dropped while feedback is showing");
                false
            }
            GesturePolicy::Interrupt => {
                self.current = None;
                true
            }
        }
    }
}
