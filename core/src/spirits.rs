use alloc::string::String;
use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpiritEvent {
    /// Click on a shadow word. Toggles it and drops any held spirit.
    SelectShadow(String),
    /// Click on a spirit word. With a shadow held this is a match attempt.
    SelectSpirit(String),
    AttemptMatch { shadow: String, spirit: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpiritOutcome {
    NoChange,
    ShadowSelected,
    SpiritSelected,
    Deselected,
    Matched(SpiritPair),
    Mismatched(SpiritPair),
}

impl MoveOutcome for SpiritOutcome {
    fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    fn feedback(&self) -> Option<FeedbackKind> {
        match self {
            Self::Matched(_) => Some(FeedbackKind::Success),
            Self::Mismatched(_) => Some(FeedbackKind::Failure),
            _ => None,
        }
    }
}

/// Spirits stage: pair each shadow word with its spirit word.
///
/// Both columns are shuffled independently at load time, the pairing lives
/// only in `correct_pairs`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiritState {
    shadow_words: Vec<String>,
    spirit_words: Vec<String>,
    correct_pairs: Vec<SpiritPair>,
    matched_pairs: SolvedSet<SpiritPair>,
    selected_shadow: Option<String>,
    selected_spirit: Option<String>,
    #[serde(skip)]
    loaded: bool,
}

impl SpiritState {
    /// Words are trimmed and uppercased; shadows and spirits must each be unique.
    pub fn new<R: Rng + ?Sized>(correct_pairs: Vec<SpiritPair>, rng: &mut R) -> Result<Self> {
        let correct_pairs = normalize_pairs(correct_pairs)?;

        let mut shadow_words: Vec<String> =
            correct_pairs.iter().map(|pair| pair.shadow.clone()).collect();
        let mut spirit_words: Vec<String> =
            correct_pairs.iter().map(|pair| pair.spirit.clone()).collect();
        shadow_words.shuffle(rng);
        spirit_words.shuffle(rng);

        Ok(Self {
            shadow_words,
            spirit_words,
            correct_pairs,
            matched_pairs: SolvedSet::default(),
            selected_shadow: None,
            selected_spirit: None,
            loaded: true,
        })
    }

    /// Loads `{shadow, spirit}` pairs from `words_to_find`.
    pub fn from_record<R: Rng + ?Sized>(record: &PuzzleRecord, rng: &mut R) -> Result<Self> {
        Self::new(parse_spirit_pairs(&record.words_to_find)?, rng)
    }

    pub fn shadow_words(&self) -> &[String] {
        &self.shadow_words
    }

    pub fn spirit_words(&self) -> &[String] {
        &self.spirit_words
    }

    pub fn correct_pairs(&self) -> &[SpiritPair] {
        &self.correct_pairs
    }

    pub fn matched_pairs(&self) -> &[SpiritPair] {
        self.matched_pairs.as_slice()
    }

    pub fn selected_shadow(&self) -> Option<&str> {
        self.selected_shadow.as_deref()
    }

    pub fn selected_spirit(&self) -> Option<&str> {
        self.selected_spirit.as_deref()
    }

    pub fn is_shadow_matched(&self, shadow: &str) -> bool {
        self.matched_pairs.iter().any(|pair| pair.shadow == shadow)
    }

    pub fn is_spirit_matched(&self, spirit: &str) -> bool {
        self.matched_pairs.iter().any(|pair| pair.spirit == spirit)
    }

    fn select_shadow(&mut self, shadow: String) -> SpiritOutcome {
        let shadow = shadow.to_uppercase();
        if !self.shadow_words.contains(&shadow) || self.is_shadow_matched(&shadow) {
            return SpiritOutcome::NoChange;
        }
        if self.selected_shadow.as_ref() == Some(&shadow) {
            self.selected_shadow = None;
            return SpiritOutcome::Deselected;
        }
        self.selected_shadow = Some(shadow);
        self.selected_spirit = None;
        SpiritOutcome::ShadowSelected
    }

    fn select_spirit(&mut self, spirit: String) -> SpiritOutcome {
        let spirit = spirit.to_uppercase();
        if !self.spirit_words.contains(&spirit) || self.is_spirit_matched(&spirit) {
            return SpiritOutcome::NoChange;
        }
        if self.selected_spirit.as_ref() == Some(&spirit) {
            self.selected_spirit = None;
            return SpiritOutcome::Deselected;
        }
        match self.selected_shadow.clone() {
            Some(shadow) => self.attempt_match(shadow, spirit),
            None => {
                self.selected_spirit = Some(spirit);
                SpiritOutcome::SpiritSelected
            }
        }
    }

    /// Checks a pairing against the answer table. Either way the selection is dropped.
    fn attempt_match(&mut self, shadow: String, spirit: String) -> SpiritOutcome {
        let pair = SpiritPair::new(shadow.to_uppercase(), spirit.to_uppercase());
        if !self.shadow_words.contains(&pair.shadow)
            || !self.spirit_words.contains(&pair.spirit)
            || self.is_shadow_matched(&pair.shadow)
            || self.is_spirit_matched(&pair.spirit)
        {
            return SpiritOutcome::NoChange;
        }

        self.selected_shadow = None;
        self.selected_spirit = None;

        if self.correct_pairs.contains(&pair) {
            log::debug!("spirit pair matched: {} / {}", pair.shadow, pair.spirit);
            self.matched_pairs.insert(pair.clone());
            SpiritOutcome::Matched(pair)
        } else {
            log::trace!("spirit pair rejected: {} / {}", pair.shadow, pair.spirit);
            SpiritOutcome::Mismatched(pair)
        }
    }
}

impl PuzzleMachine for SpiritState {
    type Event = SpiritEvent;
    type Outcome = SpiritOutcome;

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn progress(&self) -> Progress {
        Progress::new(self.matched_pairs.len(), self.correct_pairs.len())
    }

    fn apply(&mut self, event: SpiritEvent) -> SpiritOutcome {
        if !self.status().is_ready() {
            return SpiritOutcome::NoChange;
        }
        match event {
            SpiritEvent::SelectShadow(shadow) => self.select_shadow(shadow),
            SpiritEvent::SelectSpirit(spirit) => self.select_spirit(spirit),
            SpiritEvent::AttemptMatch { shadow, spirit } => self.attempt_match(shadow, spirit),
        }
    }

    fn reset(&mut self) {
        self.matched_pairs.clear();
        self.selected_shadow = None;
        self.selected_spirit = None;
    }
}
