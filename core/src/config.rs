use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::{FeedbackKind, PuzzleKind};

/// Shortest auto-dismiss delay for feedback, in milliseconds.
pub const MIN_FEEDBACK_DELAY_MS: u32 = 2000;
/// Longest auto-dismiss delay for feedback, in milliseconds.
pub const MAX_FEEDBACK_DELAY_MS: u32 = 2500;

/// What happens to a gesture that arrives while feedback is still on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePolicy {
    /// Drop the gesture, the feedback keeps running until it expires.
    #[default]
    Ignore,
    /// Dismiss the feedback early and handle the gesture.
    Interrupt,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub success_delay_ms: u32,
    pub failure_delay_ms: u32,
    pub gesture_policy: GesturePolicy,
}

impl GameConfig {
    pub const fn new_unchecked(
        success_delay_ms: u32,
        failure_delay_ms: u32,
        gesture_policy: GesturePolicy,
    ) -> Self {
        Self {
            success_delay_ms,
            failure_delay_ms,
            gesture_policy,
        }
    }

    pub fn new(
        success_delay_ms: u32,
        failure_delay_ms: u32,
        gesture_policy: GesturePolicy,
    ) -> Self {
        let success_delay_ms =
            success_delay_ms.clamp(MIN_FEEDBACK_DELAY_MS, MAX_FEEDBACK_DELAY_MS);
        let failure_delay_ms =
            failure_delay_ms.clamp(MIN_FEEDBACK_DELAY_MS, MAX_FEEDBACK_DELAY_MS);
        Self::new_unchecked(success_delay_ms, failure_delay_ms, gesture_policy)
    }

    pub fn with_gesture_policy(self, gesture_policy: GesturePolicy) -> Self {
        Self {
            gesture_policy,
            ..self
        }
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms.into())
    }

    pub fn failure_delay(&self) -> Duration {
        Duration::from_millis(self.failure_delay_ms.into())
    }

    /// Auto-dismiss delay for a notice on the given puzzle. Stage-one puzzles
    /// answer both outcomes with the short delay.
    pub fn feedback_delay(&self, puzzle: PuzzleKind, feedback: FeedbackKind) -> Duration {
        match (puzzle, feedback) {
            (PuzzleKind::Potion | PuzzleKind::Spirits, FeedbackKind::Success) => {
                self.success_delay()
            }
            _ => self.failure_delay(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            MAX_FEEDBACK_DELAY_MS,
            MIN_FEEDBACK_DELAY_MS,
            GesturePolicy::Ignore,
        )
    }
}
