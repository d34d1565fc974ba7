use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Pointer gestures over the letter grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordSearchEvent {
    PointerDown(Coord2),
    PointerEnter(Coord2),
    PointerUp,
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordSearchOutcome {
    NoChange,
    SelectionChanged,
    /// Gesture ended on a path that spells no new target.
    Missed,
    WordFound(String),
}

impl MoveOutcome for WordSearchOutcome {
    fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Word-search stage: drag straight lines over the grid to spell target words.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordSearchState {
    grid: LetterGrid,
    words_to_find: Vec<String>,
    found_words: SolvedSet<String>,
    #[serde(skip)]
    selection: Selection,
    #[serde(skip)]
    loaded: bool,
}

impl WordSearchState {
    /// Targets are trimmed and uppercased and must be unique.
    pub fn new(grid: LetterGrid, words_to_find: Vec<String>) -> Result<Self> {
        if grid.is_empty() {
            return Err(PuzzleError::EmptyPuzzle);
        }
        let words_to_find = normalize_words(words_to_find)?;
        Ok(Self {
            grid,
            words_to_find,
            found_words: SolvedSet::default(),
            selection: Selection::default(),
            loaded: true,
        })
    }

    /// Loads row strings from `grid_data` and targets from `words_to_find`.
    pub fn from_record(record: &PuzzleRecord) -> Result<Self> {
        Self::new(
            parse_grid_rows(&record.grid_data)?,
            parse_word_list(&record.words_to_find)?,
        )
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    pub fn words_to_find(&self) -> &[String] {
        &self.words_to_find
    }

    pub fn found_words(&self) -> &[String] {
        self.found_words.as_slice()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn finish_gesture(&mut self) -> WordSearchOutcome {
        let path = self.selection.finish();
        if path.len() <= 1 {
            return if path.is_empty() {
                WordSearchOutcome::NoChange
            } else {
                WordSearchOutcome::SelectionChanged
            };
        }

        match resolve_match(&path, &self.words_to_find, self.found_words.as_slice()) {
            Some(word) => {
                let word = word.to_string();
                log::debug!("word found: {word}");
                self.found_words.insert(word.clone());
                WordSearchOutcome::WordFound(word)
            }
            None => {
                log::trace!("no target spelled by {:?}", line_word(&path));
                WordSearchOutcome::Missed
            }
        }
    }
}

impl PuzzleMachine for WordSearchState {
    type Event = WordSearchEvent;
    type Outcome = WordSearchOutcome;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn progress(&self) -> Progress {
        Progress::new(self.found_words.len(), self.words_to_find.len())
    }

    fn apply(&mut self, event: WordSearchEvent) -> WordSearchOutcome {
        use WordSearchOutcome::*;

        if !self.status().is_ready() {
            self.selection.cancel();
            return NoChange;
        }

        match event {
            WordSearchEvent::PointerDown(coords) => {
                log::trace!("{coords:?} pointer down");
                if self.selection.begin(&self.grid, coords) {
                    SelectionChanged
                } else {
                    NoChange
                }
            }
            WordSearchEvent::PointerEnter(coords) => {
                if self.selection.extend(&self.grid, coords) {
                    SelectionChanged
                } else {
                    NoChange
                }
            }
            WordSearchEvent::PointerUp => self.finish_gesture(),
            WordSearchEvent::Cancel => {
                if self.selection.is_idle() {
                    NoChange
                } else {
                    self.selection.cancel();
                    SelectionChanged
                }
            }
        }
    }

    fn reset(&mut self) {
        self.found_words.clear();
        self.selection.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn state() -> WordSearchState {
        let grid = LetterGrid::from_rows(&["CATX", "XOXX", "XXWX", "OWLX"]).unwrap();
        let words = vec!["CAT".to_string(), "COW".to_string(), "OWL".to_string()];
        WordSearchState::new(grid, words).unwrap()
    }

    fn found(word: &str) -> WordSearchOutcome {
        WordSearchOutcome::WordFound(word.to_string())
    }

    fn drag(state: &mut WordSearchState, from: Coord2, to: Coord2) -> WordSearchOutcome {
        state.apply(WordSearchEvent::PointerDown(from));
        state.apply(WordSearchEvent::PointerEnter(to));
        state.apply(WordSearchEvent::PointerUp)
    }

    #[test]
    fn dragging_over_a_word_finds_it() {
        let mut state = state();

        assert_eq!(drag(&mut state, (0, 0), (0, 2)), found("CAT"));
        assert_eq!(state.found_words(), ["CAT"]);
        assert!(state.selection().is_idle());
    }

    #[test]
    fn reverse_and_diagonal_drags_find_words() {
        let mut state = state();

        assert_eq!(drag(&mut state, (2, 2), (0, 0)), found("COW"));
        assert_eq!(drag(&mut state, (3, 2), (3, 0)), found("OWL"));
    }

    #[test]
    fn retracing_a_found_word_reports_nothing_new() {
        let mut state = state();
        drag(&mut state, (0, 0), (0, 2));

        assert_eq!(drag(&mut state, (0, 0), (0, 2)), WordSearchOutcome::Missed);
        assert_eq!(state.found_words().len(), 1);
    }

    #[test]
    fn bent_drag_keeps_the_last_straight_path() {
        let mut state = state();

        state.apply(WordSearchEvent::PointerDown((0, 0)));
        state.apply(WordSearchEvent::PointerEnter((0, 2)));
        assert_eq!(
            state.apply(WordSearchEvent::PointerEnter((1, 3))),
            WordSearchOutcome::NoChange
        );

        assert_eq!(state.apply(WordSearchEvent::PointerUp), found("CAT"));
    }

    #[test]
    fn single_click_is_not_a_match_attempt() {
        let mut state = state();

        state.apply(WordSearchEvent::PointerDown((0, 0)));

        assert_eq!(
            state.apply(WordSearchEvent::PointerUp),
            WordSearchOutcome::SelectionChanged
        );
        assert!(state.found_words().is_empty());
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut state = state();
        state.apply(WordSearchEvent::PointerDown((0, 0)));
        state.apply(WordSearchEvent::PointerEnter((0, 2)));

        state.apply(WordSearchEvent::Cancel);

        assert_eq!(state.apply(WordSearchEvent::PointerUp), WordSearchOutcome::NoChange);
    }

    #[test]
    fn completes_once_every_word_is_found() {
        let mut state = state();

        drag(&mut state, (0, 0), (0, 2));
        drag(&mut state, (0, 0), (2, 2));
        assert_eq!(state.status(), PuzzleStatus::Ready);
        drag(&mut state, (3, 0), (3, 2));

        assert_eq!(state.status(), PuzzleStatus::Completed);
        assert_eq!(state.progress().percent(), 100);
        assert_eq!(drag(&mut state, (0, 0), (0, 2)), WordSearchOutcome::NoChange);
    }

    #[test]
    fn lowercase_targets_are_normalized() {
        let grid = LetterGrid::from_rows(&["cat", "owl"]).unwrap();
        let words = vec!["cat".to_string(), " Owl".to_string()];
        let mut state = WordSearchState::new(grid, words).unwrap();

        assert_eq!(state.words_to_find(), ["CAT", "OWL"]);
        assert_eq!(drag(&mut state, (0, 2), (0, 0)), found("CAT"));
        assert_eq!(drag(&mut state, (1, 0), (1, 2)), found("OWL"));
        assert!(state.is_completed());
    }

    #[test]
    fn duplicate_or_empty_targets_are_rejected() {
        let grid = || LetterGrid::from_rows(&["CAT"]).unwrap();

        assert_eq!(
            WordSearchState::new(grid(), vec!["CAT".to_string(), "cat".to_string()]),
            Err(PuzzleError::DuplicateWord("CAT".to_string()))
        );
        assert_eq!(
            WordSearchState::new(grid(), vec!["".to_string()]),
            Err(PuzzleError::EmptyWord)
        );
        assert_eq!(WordSearchState::new(grid(), vec![]), Err(PuzzleError::EmptyPuzzle));
    }

    #[test]
    fn reset_returns_to_ready_with_same_grid() {
        let mut state = state();
        drag(&mut state, (0, 0), (0, 2));

        state.reset();

        assert_eq!(state.status(), PuzzleStatus::Ready);
        assert!(state.found_words().is_empty());
        assert_eq!(state.grid()[(3, 1)], 'W');
    }
}
