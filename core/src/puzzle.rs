use alloc::string::{String, ToString};
use alloc::vec::Vec;
use hashbrown::HashSet;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::*;

/// Puzzle row as served by the puzzle API. Payload columns are JSON text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub id: i64,
    pub stage: u8,
    pub grid_data: String,
    pub words_to_find: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl PuzzleRecord {
    pub fn stage(&self) -> Result<Stage> {
        Stage::try_from(self.stage)
    }
}

/// One of the three manor chapters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::One, Stage::Two, Stage::Three];

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn previous(self) -> Option<Stage> {
        match self {
            Self::One => None,
            Self::Two => Some(Self::One),
            Self::Three => Some(Self::Two),
        }
    }

    pub const fn default_kind(self) -> PuzzleKind {
        match self {
            Self::One => PuzzleKind::Scramble,
            Self::Two => PuzzleKind::Potion,
            Self::Three => PuzzleKind::Spirits,
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = PuzzleError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(PuzzleError::InvalidStage(other)),
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Mini-game played on a stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleKind {
    WordSearch,
    Scramble,
    Potion,
    Spirits,
}

impl PuzzleKind {
    pub const fn stage(self) -> Stage {
        match self {
            Self::WordSearch | Self::Scramble => Stage::One,
            Self::Potion => Stage::Two,
            Self::Spirits => Stage::Three,
        }
    }

    pub fn check_stage(self, stage: Stage) -> Result<()> {
        if self.stage() == stage {
            Ok(())
        } else {
            Err(PuzzleError::KindMismatch)
        }
    }
}

/// Correct shadow/spirit pairing for the spirits stage.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpiritPair {
    pub shadow: String,
    pub spirit: String,
}

impl SpiritPair {
    pub fn new(shadow: impl Into<String>, spirit: impl Into<String>) -> Self {
        Self {
            shadow: shadow.into(),
            spirit: spirit.into(),
        }
    }
}

fn parse_json<T: DeserializeOwned>(json: &str, wrap: fn(String) -> PuzzleError) -> Result<T> {
    serde_json::from_str(json).map_err(|err| wrap(err.to_string()))
}

pub(crate) fn normalize_word(word: &str) -> Result<String> {
    let word = word.trim().to_uppercase();
    if word.is_empty() {
        Err(PuzzleError::EmptyWord)
    } else {
        Ok(word)
    }
}

pub(crate) fn check_unique<'a>(words: impl IntoIterator<Item = &'a String>) -> Result<()> {
    let mut seen = HashSet::new();
    for word in words {
        if !seen.insert(word) {
            return Err(PuzzleError::DuplicateWord(word.clone()));
        }
    }
    Ok(())
}

/// Trims and uppercases `words`, rejecting empty lists, empty words and repeats.
pub(crate) fn normalize_words(words: Vec<String>) -> Result<Vec<String>> {
    if words.is_empty() {
        return Err(PuzzleError::EmptyPuzzle);
    }
    let words = words
        .iter()
        .map(|word| normalize_word(word))
        .collect::<Result<Vec<_>>>()?;
    check_unique(&words)?;
    Ok(words)
}

/// Target words from `words_to_find`, uppercased.
pub fn parse_word_list(words_to_find: &str) -> Result<Vec<String>> {
    normalize_words(parse_json(words_to_find, PuzzleError::MalformedWords)?)
}

/// Letter grid from a `grid_data` array of row strings.
pub fn parse_grid_rows(grid_data: &str) -> Result<LetterGrid> {
    let rows: Vec<String> = parse_json(grid_data, PuzzleError::MalformedGrid)?;
    let grid = LetterGrid::from_rows(&rows)?;
    if grid.is_empty() {
        return Err(PuzzleError::EmptyPuzzle);
    }
    Ok(grid)
}

/// Scrambled words from a `grid_data` array, uppercased. Anagrams may repeat.
pub fn parse_scrambled_words(grid_data: &str) -> Result<Vec<String>> {
    let words: Vec<String> = parse_json(grid_data, PuzzleError::MalformedGrid)?;
    words.iter().map(|word| normalize_word(word)).collect()
}

/// Shadow/spirit pairs from `words_to_find`, uppercased.
pub fn parse_spirit_pairs(words_to_find: &str) -> Result<Vec<SpiritPair>> {
    let pairs: Vec<SpiritPair> = parse_json(words_to_find, PuzzleError::MalformedWords)?;
    normalize_pairs(pairs)
}

/// Trims and uppercases both sides of every pair. Shadows and spirits must each be unique.
pub(crate) fn normalize_pairs(pairs: Vec<SpiritPair>) -> Result<Vec<SpiritPair>> {
    if pairs.is_empty() {
        return Err(PuzzleError::EmptyPuzzle);
    }
    let pairs = pairs
        .iter()
        .map(|pair| {
            Ok(SpiritPair::new(
                normalize_word(&pair.shadow)?,
                normalize_word(&pair.spirit)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    check_unique(pairs.iter().map(|pair| &pair.shadow))?;
    check_unique(pairs.iter().map(|pair| &pair.spirit))?;
    Ok(pairs)
}
