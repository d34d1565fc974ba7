use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid stage {0}, expected 1 to 3")]
    InvalidStage(u8),
    #[error("Could not parse grid data: {0}")]
    MalformedGrid(String),
    #[error("Could not parse word list: {0}")]
    MalformedWords(String),
    #[error("Grid rows have different lengths")]
    RaggedGrid,
    #[error("Grid does not fit in {max}x{max} cells", max = crate::Coord::MAX)]
    GridTooLarge,
    #[error("Puzzle has nothing to solve")]
    EmptyPuzzle,
    #[error("Puzzle contains an empty word")]
    EmptyWord,
    #[error("Word {0} appears more than once")]
    DuplicateWord(String),
    #[error("Missing letter slots for {0} are out of range or repeated")]
    InvalidIngredient(String),
    #[error("Got {scrambled} scrambled words for {correct} answers")]
    MismatchedWordLists { scrambled: usize, correct: usize },
    #[error("Puzzle kind is not playable on this stage")]
    KindMismatch,
    #[error("Could not serialize progress: {0}")]
    Serialize(String),
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
