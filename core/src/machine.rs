use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleStatus {
    #[default]
    Loading,
    Ready,
    Completed,
}

impl PuzzleStatus {
    /// Status implied by the load flag and solved-set size. Never stored.
    pub const fn derive(loaded: bool, progress: Progress) -> Self {
        if !loaded {
            Self::Loading
        } else if progress.is_complete() {
            Self::Completed
        } else {
            Self::Ready
        }
    }

    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub solved: usize,
    pub total: usize,
}

impl Progress {
    pub const fn new(solved: usize, total: usize) -> Self {
        Self { solved, total }
    }

    pub const fn is_complete(self) -> bool {
        self.total > 0 && self.solved == self.total
    }

    /// Completion percentage rounded to the nearest integer.
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let solved = self.solved.min(self.total);
        ((solved * 200 + self.total) / (self.total * 2)) as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Success,
    Failure,
}

pub trait MoveOutcome {
    /// Whether this outcome could have changed the puzzle state.
    fn has_update(&self) -> bool;

    /// Transient feedback the player should see for this outcome, if any.
    fn feedback(&self) -> Option<FeedbackKind> {
        None
    }
}

/// Shape shared by every stage: a reducer over discrete player events with a
/// monotonic solved-set and a derived completion flag.
pub trait PuzzleMachine {
    type Event;
    type Outcome: MoveOutcome;

    fn is_loaded(&self) -> bool;

    fn progress(&self) -> Progress;

    /// Applies one player event. Events that do not fit the current state are
    /// reported through the outcome, never as errors.
    fn apply(&mut self, event: Self::Event) -> Self::Outcome;

    /// Clears solved-state while keeping the loaded puzzle, including any
    /// randomization done at load time.
    fn reset(&mut self);

    fn status(&self) -> PuzzleStatus {
        PuzzleStatus::derive(self.is_loaded(), self.progress())
    }

    fn is_completed(&self) -> bool {
        self.status().is_completed()
    }

    /// Pure form of [`apply`](Self::apply): `(state, event) -> (state, outcome)`.
    fn reduce(mut self, event: Self::Event) -> (Self, Self::Outcome)
    where
        Self: Sized,
    {
        let outcome = self.apply(event);
        (self, outcome)
    }
}

/// Insertion-ordered set that only grows until cleared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolvedSet<T> {
    items: Vec<T>,
}

impl<T> Default for SolvedSet<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> SolvedSet<T> {
    /// Adds `item` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }
}

impl<T> SolvedSet<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }
}
