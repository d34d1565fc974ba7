use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Progress report for one stage, ready to hand to the progress API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    /// JSON array of completed puzzle ids, as strings.
    pub completed_puzzles: String,
    /// JSON snapshot of the stage state.
    pub current_stage_progress: String,
    pub is_completed: bool,
}

/// Title card of the loaded puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleInfo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl From<&PuzzleRecord> for PuzzleInfo {
    fn from(record: &PuzzleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StageGame {
    WordSearch(WordSearchState),
    Scramble(ScrambleState),
    Potion(PotionState),
    Spirits(SpiritState),
}

impl StageGame {
    /// Empty, still-loading state for `kind`.
    pub fn loading(kind: PuzzleKind) -> Self {
        match kind {
            PuzzleKind::WordSearch => Self::WordSearch(Default::default()),
            PuzzleKind::Scramble => Self::Scramble(Default::default()),
            PuzzleKind::Potion => Self::Potion(Default::default()),
            PuzzleKind::Spirits => Self::Spirits(Default::default()),
        }
    }

    pub fn load<R: Rng + ?Sized>(
        kind: PuzzleKind,
        record: &PuzzleRecord,
        rng: &mut R,
    ) -> Result<Self> {
        kind.check_stage(record.stage()?)?;
        Ok(match kind {
            PuzzleKind::WordSearch => Self::WordSearch(WordSearchState::from_record(record)?),
            PuzzleKind::Scramble => Self::Scramble(ScrambleState::from_record(record)?),
            PuzzleKind::Potion => Self::Potion(PotionState::from_record(record, rng)?),
            PuzzleKind::Spirits => Self::Spirits(SpiritState::from_record(record, rng)?),
        })
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::WordSearch(_) => PuzzleKind::WordSearch,
            Self::Scramble(_) => PuzzleKind::Scramble,
            Self::Potion(_) => PuzzleKind::Potion,
            Self::Spirits(_) => PuzzleKind::Spirits,
        }
    }

    pub fn status(&self) -> PuzzleStatus {
        match self {
            Self::WordSearch(state) => state.status(),
            Self::Scramble(state) => state.status(),
            Self::Potion(state) => state.status(),
            Self::Spirits(state) => state.status(),
        }
    }

    pub fn progress(&self) -> Progress {
        match self {
            Self::WordSearch(state) => state.progress(),
            Self::Scramble(state) => state.progress(),
            Self::Potion(state) => state.progress(),
            Self::Spirits(state) => state.progress(),
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::WordSearch(state) => state.reset(),
            Self::Scramble(state) => state.reset(),
            Self::Potion(state) => state.reset(),
            Self::Spirits(state) => state.reset(),
        }
    }

    fn apply(&mut self, event: GameEvent) -> GameOutcome {
        match (self, event) {
            (Self::WordSearch(state), GameEvent::WordSearch(event)) => {
                GameOutcome::WordSearch(state.apply(event))
            }
            (Self::Scramble(state), GameEvent::Scramble(event)) => {
                GameOutcome::Scramble(state.apply(event))
            }
            (Self::Potion(state), GameEvent::Potion(event)) => {
                GameOutcome::Potion(state.apply(event))
            }
            (Self::Spirits(state), GameEvent::Spirits(event)) => {
                GameOutcome::Spirits(state.apply(event))
            }
            (game, event) => {
                log::warn!("{event:?} does not apply to a {:?} puzzle", game.kind());
                GameOutcome::Ignored
            }
        }
    }

    fn snapshot(&self) -> Result<String> {
        match self {
            Self::WordSearch(state) => snapshot(state),
            Self::Scramble(state) => snapshot(state),
            Self::Potion(state) => snapshot(state),
            Self::Spirits(state) => snapshot(state),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StageSnapshot<'a, T> {
    #[serde(flatten)]
    state: &'a T,
    is_completed: bool,
}

fn snapshot<T: Serialize + PuzzleMachine>(state: &T) -> Result<String> {
    let snapshot = StageSnapshot {
        state,
        is_completed: state.is_completed(),
    };
    serde_json::to_string(&snapshot).map_err(|err| PuzzleError::Serialize(err.to_string()))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WordSearch(WordSearchEvent),
    Scramble(ScrambleEvent),
    Potion(PotionEvent),
    Spirits(SpiritEvent),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    /// Dropped because feedback is still showing.
    Blocked,
    /// The event belongs to another kind of puzzle.
    Ignored,
    WordSearch(WordSearchOutcome),
    Scramble(ScrambleOutcome),
    Potion(PotionOutcome),
    Spirits(SpiritOutcome),
}

impl MoveOutcome for GameOutcome {
    fn has_update(&self) -> bool {
        match self {
            Self::Blocked | Self::Ignored => false,
            Self::WordSearch(outcome) => outcome.has_update(),
            Self::Scramble(outcome) => outcome.has_update(),
            Self::Potion(outcome) => outcome.has_update(),
            Self::Spirits(outcome) => outcome.has_update(),
        }
    }

    fn feedback(&self) -> Option<FeedbackKind> {
        match self {
            Self::Blocked | Self::Ignored => None,
            Self::WordSearch(outcome) => outcome.feedback(),
            Self::Scramble(outcome) => outcome.feedback(),
            Self::Potion(outcome) => outcome.feedback(),
            Self::Spirits(outcome) => outcome.feedback(),
        }
    }
}

/// Result of one handled event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStep {
    pub outcome: GameOutcome,
    /// Set exactly once, on the event that completes the stage.
    pub completion: Option<ProgressEvent>,
}

/// One active stage: the puzzle being played plus its feedback window.
///
/// Holds no user identity; completion events are attributed by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct ManorGame {
    stage: Stage,
    puzzle: Option<PuzzleInfo>,
    game: StageGame,
    gate: FeedbackGate,
}

impl ManorGame {
    pub fn new(stage: Stage, config: GameConfig) -> Self {
        Self::with_kind(stage.default_kind(), config)
    }

    pub fn with_kind(kind: PuzzleKind, config: GameConfig) -> Self {
        Self {
            stage: kind.stage(),
            puzzle: None,
            game: StageGame::loading(kind),
            gate: FeedbackGate::new(config),
        }
    }

    /// Loads a puzzle record. A malformed record is logged and leaves the
    /// current state untouched.
    pub fn load<R: Rng + ?Sized>(&mut self, record: &PuzzleRecord, rng: &mut R) -> bool {
        match StageGame::load(self.game.kind(), record, rng) {
            Ok(game) => {
                log::debug!("loaded puzzle {} for stage {}", record.id, self.stage);
                self.game = game;
                self.puzzle = Some(record.into());
                self.gate.dismiss();
                true
            }
            Err(err) => {
                log::error!("Could not load puzzle {}: {}", record.id, err);
                false
            }
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn kind(&self) -> PuzzleKind {
        self.game.kind()
    }

    pub fn puzzle(&self) -> Option<&PuzzleInfo> {
        self.puzzle.as_ref()
    }

    pub fn game(&self) -> &StageGame {
        &self.game
    }

    pub fn status(&self) -> PuzzleStatus {
        self.game.status()
    }

    pub fn progress(&self) -> Progress {
        self.game.progress()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.gate.current()
    }

    /// Handles one player event at `now`.
    pub fn handle(&mut self, event: GameEvent, now: Instant) -> GameStep {
        if !self.gate.admit(now) {
            return GameStep {
                outcome: GameOutcome::Blocked,
                completion: None,
            };
        }

        let was_completed = self.status().is_completed();
        let outcome = self.game.apply(event);
        if let Some(kind) = outcome.feedback() {
            let puzzle = self.kind();
            self.gate.show(puzzle, kind, now);
        }

        let completion = if !was_completed && self.status().is_completed() {
            log::info!("stage {} completed", self.stage);
            match self.progress_event() {
                Ok(event) => Some(event),
                Err(err) => {
                    log::error!("Could not build progress for stage {}: {}", self.stage, err);
                    None
                }
            }
        } else {
            None
        };

        GameStep {
            outcome,
            completion,
        }
    }

    /// Dismisses expired feedback. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.gate.tick(now)
    }

    /// Starts the stage over with the same puzzle.
    pub fn reset(&mut self) {
        self.game.reset();
        self.gate.dismiss();
    }

    /// Current progress for a save, whether or not the stage is done.
    pub fn progress_event(&self) -> Result<ProgressEvent> {
        let is_completed = self.status().is_completed();
        let completed: Vec<String> = match (&self.puzzle, is_completed) {
            (Some(puzzle), true) => vec![puzzle.id.to_string()],
            _ => Vec::new(),
        };

        Ok(ProgressEvent {
            stage: self.stage,
            completed_puzzles: serde_json::to_string(&completed)
                .map_err(|err| PuzzleError::Serialize(err.to_string()))?,
            current_stage_progress: self.game.snapshot()?,
            is_completed,
        })
    }
}
