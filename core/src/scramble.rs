use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrambleEvent {
    /// Make the word at this index the active one.
    Select(usize),
    /// Guess the unscrambled form of the active word.
    Submit(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrambleOutcome {
    NoChange,
    Selected(usize),
    Solved { word: String, next: Option<usize> },
    Incorrect,
    AlreadySolved,
}

impl MoveOutcome for ScrambleOutcome {
    fn has_update(&self) -> bool {
        use ScrambleOutcome::*;
        match self {
            NoChange | Incorrect | AlreadySolved => false,
            Selected(_) | Solved { .. } => true,
        }
    }

    fn feedback(&self) -> Option<FeedbackKind> {
        match self {
            Self::Solved { .. } => Some(FeedbackKind::Success),
            Self::Incorrect => Some(FeedbackKind::Failure),
            _ => None,
        }
    }
}

/// Unscramble-the-word stage. `scrambled_words[i]` is a jumbled `correct_words[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrambleState {
    scrambled_words: Vec<String>,
    correct_words: Vec<String>,
    solved_words: SolvedSet<String>,
    current_index: usize,
    #[serde(skip)]
    loaded: bool,
}

impl ScrambleState {
    /// Words are trimmed and uppercased. Answers must be unique, scrambled
    /// words may repeat.
    pub fn new(scrambled_words: Vec<String>, correct_words: Vec<String>) -> Result<Self> {
        if scrambled_words.len() != correct_words.len() {
            return Err(PuzzleError::MismatchedWordLists {
                scrambled: scrambled_words.len(),
                correct: correct_words.len(),
            });
        }
        let correct_words = normalize_words(correct_words)?;
        let scrambled_words = scrambled_words
            .iter()
            .map(|word| normalize_word(word))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            scrambled_words,
            correct_words,
            solved_words: SolvedSet::default(),
            current_index: 0,
            loaded: true,
        })
    }

    /// Loads scrambled words from `grid_data` and answers from `words_to_find`.
    pub fn from_record(record: &PuzzleRecord) -> Result<Self> {
        Self::new(
            parse_scrambled_words(&record.grid_data)?,
            parse_word_list(&record.words_to_find)?,
        )
    }

    pub fn scrambled_words(&self) -> &[String] {
        &self.scrambled_words
    }

    pub fn correct_words(&self) -> &[String] {
        &self.correct_words
    }

    pub fn solved_words(&self) -> &[String] {
        self.solved_words.as_slice()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_scrambled(&self) -> Option<&str> {
        self.scrambled_words.get(self.current_index).map(String::as_str)
    }

    pub fn is_solved(&self, index: usize) -> bool {
        self.correct_words
            .get(index)
            .is_some_and(|word| self.solved_words.contains(word))
    }

    /// First unsolved index in list order.
    pub fn next_unsolved(&self) -> Option<usize> {
        (0..self.correct_words.len()).find(|&index| !self.is_solved(index))
    }

    fn select(&mut self, index: usize) -> ScrambleOutcome {
        if index >= self.correct_words.len()
            || self.is_solved(index)
            || index == self.current_index
        {
            return ScrambleOutcome::NoChange;
        }
        self.current_index = index;
        ScrambleOutcome::Selected(index)
    }

    fn submit(&mut self, input: &str) -> ScrambleOutcome {
        if input.is_empty() {
            return ScrambleOutcome::NoChange;
        }
        let Some(correct) = self.correct_words.get(self.current_index) else {
            return ScrambleOutcome::NoChange;
        };
        if self.solved_words.contains(correct) {
            return ScrambleOutcome::AlreadySolved;
        }
        if input.to_uppercase() != *correct {
            log::trace!("scramble guess {input:?} rejected for index {}", self.current_index);
            return ScrambleOutcome::Incorrect;
        }

        let word = correct.clone();
        self.solved_words.insert(word.clone());
        let next = self.next_unsolved();
        if let Some(next) = next {
            self.current_index = next;
        }
        log::debug!("scramble solved {word}, next: {next:?}");

        ScrambleOutcome::Solved { word, next }
    }
}

impl PuzzleMachine for ScrambleState {
    type Event = ScrambleEvent;
    type Outcome = ScrambleOutcome;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn progress(&self) -> Progress {
        Progress::new(self.solved_words.len(), self.correct_words.len())
    }

    fn apply(&mut self, event: ScrambleEvent) -> ScrambleOutcome {
        if !self.status().is_ready() {
            return ScrambleOutcome::NoChange;
        }
        match event {
            ScrambleEvent::Select(index) => self.select(index),
            ScrambleEvent::Submit(input) => self.submit(&input),
        }
    }

    fn reset(&mut self) {
        self.solved_words.clear();
        self.current_index = 0;
    }
}
