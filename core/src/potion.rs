use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use rand::Rng;
use rand::seq::{SliceRandom, index};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub const MIN_MISSING_LETTERS: usize = 2;
pub const MAX_MISSING_LETTERS: usize = 3;

pub type SlotIndices = SmallVec<[usize; MAX_MISSING_LETTERS]>;

/// Number of blanked letters for a word of `len` characters.
///
/// Half the word, clamped to 2..=3, and never more than the word itself has.
pub fn missing_count(len: usize) -> usize {
    (len / 2)
        .clamp(MIN_MISSING_LETTERS, MAX_MISSING_LETTERS)
        .min(len)
}

/// A recipe word with some of its letters blanked out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    word: String,
    missing_letters: SlotIndices,
}

impl Ingredient {
    /// Builds an ingredient from fixed slot positions, sorted ascending.
    /// The word is trimmed and uppercased.
    pub fn new(word: String, mut missing_letters: SlotIndices) -> Result<Self> {
        let word = normalize_word(&word)?;
        let len = word.chars().count();
        missing_letters.sort_unstable();
        let in_range = missing_letters.iter().all(|&pos| pos < len);
        let unique = missing_letters.windows(2).all(|pair| pair[0] != pair[1]);
        if !in_range || !unique || missing_letters.len() != missing_count(len) {
            return Err(PuzzleError::InvalidIngredient(word));
        }
        Ok(Self {
            word,
            missing_letters,
        })
    }

    /// Picks `missing_count` distinct positions uniformly at random.
    pub fn random<R: Rng + ?Sized>(word: String, rng: &mut R) -> Result<Self> {
        let word = normalize_word(&word)?;
        let len = word.chars().count();
        let mut missing_letters: SlotIndices = index::sample(rng, len, missing_count(len))
            .into_iter()
            .collect();
        missing_letters.sort_unstable();
        Ok(Self {
            word,
            missing_letters,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn missing_letters(&self) -> &[usize] {
        &self.missing_letters
    }

    pub fn is_missing(&self, position: usize) -> bool {
        self.missing_letters.contains(&position)
    }

    pub fn letter_at(&self, position: usize) -> Option<char> {
        self.word.chars().nth(position)
    }

    fn slot_of(&self, position: usize) -> Option<usize> {
        self.missing_letters.iter().position(|&pos| pos == position)
    }

    /// Ground-truth letters for the blanked slots, in slot order.
    pub fn missing_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.missing_letters
            .iter()
            .filter_map(|&pos| self.letter_at(pos))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionEvent {
    /// Pick up (or put back, if already held) the pool letter at this index.
    SelectLetter(usize),
    /// Drop the held letter into a blank of an ingredient, by word position.
    Place { ingredient: usize, position: usize },
    /// Empty a filled blank.
    ClearSlot { ingredient: usize, position: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PotionOutcome {
    NoChange,
    LetterSelected(usize),
    LetterDeselected,
    Placed,
    Cleared,
    IngredientCompleted(String),
}

impl MoveOutcome for PotionOutcome {
    fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    fn feedback(&self) -> Option<FeedbackKind> {
        match self {
            Self::IngredientCompleted(_) => Some(FeedbackKind::Success),
            _ => None,
        }
    }
}

type Placements = SmallVec<[Option<char>; MAX_MISSING_LETTERS]>;

/// Potion stage: refill each ingredient's blanks from a shared, shuffled letter pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotionState {
    ingredients: Vec<Ingredient>,
    available_letters: Vec<char>,
    placed_letters: Vec<Placements>,
    selected_letter: Option<usize>,
    completed_ingredients: SolvedSet<String>,
    #[serde(skip)]
    loaded: bool,
}

impl PotionState {
    /// Builds the state around prepared ingredients. The pool holds every
    /// blanked letter once per blank and is shuffled with `rng`.
    pub fn new<R: Rng + ?Sized>(ingredients: Vec<Ingredient>, rng: &mut R) -> Result<Self> {
        if ingredients.is_empty() {
            return Err(PuzzleError::EmptyPuzzle);
        }
        check_unique(ingredients.iter().map(|ingredient| &ingredient.word))?;

        let mut available_letters: Vec<char> = ingredients
            .iter()
            .flat_map(Ingredient::missing_chars)
            .collect();
        available_letters.shuffle(rng);

        let placed_letters = ingredients
            .iter()
            .map(|ingredient| {
                core::iter::repeat_n(None, ingredient.missing_letters.len()).collect()
            })
            .collect();

        Ok(Self {
            ingredients,
            available_letters,
            placed_letters,
            selected_letter: None,
            completed_ingredients: SolvedSet::default(),
            loaded: true,
        })
    }

    /// Blanks random letters of every word, then builds the pool.
    pub fn from_words<R: Rng + ?Sized>(words: Vec<String>, rng: &mut R) -> Result<Self> {
        let ingredients = normalize_words(words)?
            .into_iter()
            .map(|word| Ingredient::random(word, &mut *rng))
            .collect::<Result<Vec<_>>>()?;
        Self::new(ingredients, rng)
    }

    /// Loads ingredient words from `words_to_find`.
    pub fn from_record<R: Rng + ?Sized>(record: &PuzzleRecord, rng: &mut R) -> Result<Self> {
        Self::from_words(parse_word_list(&record.words_to_find)?, rng)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn available_letters(&self) -> &[char] {
        &self.available_letters
    }

    pub fn selected_letter(&self) -> Option<usize> {
        self.selected_letter
    }

    pub fn completed_ingredients(&self) -> &[String] {
        self.completed_ingredients.as_slice()
    }

    pub fn placed_letter(&self, ingredient: usize, position: usize) -> Option<char> {
        let slot = self.ingredients.get(ingredient)?.slot_of(position)?;
        *self.placed_letters.get(ingredient)?.get(slot)?
    }

    pub fn is_ingredient_completed(&self, ingredient: usize) -> bool {
        self.ingredients
            .get(ingredient)
            .is_some_and(|ingredient| self.completed_ingredients.contains(&ingredient.word))
    }

    fn pool_counts(&self) -> HashMap<char, usize> {
        let mut counts = HashMap::new();
        for &letter in &self.available_letters {
            *counts.entry(letter).or_insert(0) += 1;
        }
        counts
    }

    fn placed_count(&self, letter: char) -> usize {
        self.placed_letters
            .iter()
            .flatten()
            .filter(|&&placed| placed == Some(letter))
            .count()
    }

    /// Whether another copy of `letter` can be taken from the pool.
    ///
    /// A letter stays usable while fewer copies are placed than the pool holds.
    pub fn is_letter_available(&self, letter: char) -> bool {
        let in_pool = self.pool_counts().get(&letter).copied().unwrap_or(0);
        self.placed_count(letter) < in_pool
    }

    fn select_letter(&mut self, index: usize) -> PotionOutcome {
        let Some(&letter) = self.available_letters.get(index) else {
            return PotionOutcome::NoChange;
        };
        if self.selected_letter == Some(index) {
            self.selected_letter = None;
            return PotionOutcome::LetterDeselected;
        }
        if !self.is_letter_available(letter) {
            return PotionOutcome::NoChange;
        }
        self.selected_letter = Some(index);
        PotionOutcome::LetterSelected(index)
    }

    fn open_slot(&self, ingredient: usize, position: usize) -> Option<usize> {
        if self.is_ingredient_completed(ingredient) {
            return None;
        }
        self.ingredients.get(ingredient)?.slot_of(position)
    }

    fn slot_mut(&mut self, ingredient: usize, slot: usize) -> Option<&mut Option<char>> {
        self.placed_letters.get_mut(ingredient)?.get_mut(slot)
    }

    fn place(&mut self, ingredient: usize, position: usize) -> PotionOutcome {
        let Some(letter) = self
            .selected_letter
            .and_then(|index| self.available_letters.get(index).copied())
        else {
            return PotionOutcome::NoChange;
        };
        let Some(slot) = self.open_slot(ingredient, position) else {
            return PotionOutcome::NoChange;
        };

        let Some(&previous) = self
            .placed_letters
            .get(ingredient)
            .and_then(|placements| placements.get(slot))
        else {
            return PotionOutcome::NoChange;
        };
        let in_pool = self.pool_counts().get(&letter).copied().unwrap_or(0);
        let in_use = self.placed_count(letter) - usize::from(previous == Some(letter));
        if in_use >= in_pool {
            return PotionOutcome::NoChange;
        }

        let Some(placed) = self.slot_mut(ingredient, slot) else {
            return PotionOutcome::NoChange;
        };
        *placed = Some(letter);
        self.selected_letter = None;

        match self.check_ingredient(ingredient) {
            Some(word) => PotionOutcome::IngredientCompleted(word),
            None => PotionOutcome::Placed,
        }
    }

    fn clear_slot(&mut self, ingredient: usize, position: usize) -> PotionOutcome {
        let Some(slot) = self.open_slot(ingredient, position) else {
            return PotionOutcome::NoChange;
        };
        match self.slot_mut(ingredient, slot).and_then(Option::take) {
            Some(_) => PotionOutcome::Cleared,
            None => PotionOutcome::NoChange,
        }
    }

    /// Marks the ingredient completed when every blank holds its own letter.
    fn check_ingredient(&mut self, index: usize) -> Option<String> {
        let ingredient = self.ingredients.get(index)?;
        let placements = self.placed_letters.get(index)?;
        let correct = placements.len() == ingredient.missing_letters.len()
            && ingredient
                .missing_chars()
                .zip(placements)
                .all(|(expected, &placed)| placed == Some(expected));
        if !correct {
            return None;
        }

        let word = ingredient.word.clone();
        if !self.completed_ingredients.insert(word.clone()) {
            return None;
        }
        log::debug!("potion ingredient completed: {word}");
        Some(word)
    }
}

impl PuzzleMachine for PotionState {
    type Event = PotionEvent;
    type Outcome = PotionOutcome;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn progress(&self) -> Progress {
        Progress::new(self.completed_ingredients.len(), self.ingredients.len())
    }

    fn apply(&mut self, event: PotionEvent) -> PotionOutcome {
        if !self.status().is_ready() {
            return PotionOutcome::NoChange;
        }
        match event {
            PotionEvent::SelectLetter(index) => self.select_letter(index),
            PotionEvent::Place {
                ingredient,
                position,
            } => self.place(ingredient, position),
            PotionEvent::ClearSlot {
                ingredient,
                position,
            } => self.clear_slot(ingredient, position),
        }
    }

    fn reset(&mut self) {
        self.placed_letters.iter_mut().flatten().for_each(|slot| *slot = None);
        self.selected_letter = None;
        self.completed_ingredients.clear();
    }
}
