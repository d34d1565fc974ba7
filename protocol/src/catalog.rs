use manor_core::{PuzzleRecord, Stage};

use crate::*;

/// Read-only puzzle table. Each stage serves its lowest-id puzzle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PuzzleCatalog {
    puzzles: Vec<PuzzleRecord>,
}

impl PuzzleCatalog {
    pub fn new(mut puzzles: Vec<PuzzleRecord>) -> Self {
        puzzles.sort_by_key(|puzzle| puzzle.id);
        Self { puzzles }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let puzzles: Vec<PuzzleRecord> =
            serde_json::from_str(json).map_err(|err| ProtocolError::Store(err.to_string()))?;
        Ok(Self::new(puzzles))
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn first_for_stage(&self, stage: Stage) -> Option<&PuzzleRecord> {
        self.puzzles.iter().find(|puzzle| puzzle.stage == stage.number())
    }

    /// Answers `GET /api/puzzles/:stage`.
    pub fn lookup(&self, param: &str) -> Result<Option<&PuzzleRecord>> {
        let stage = parse_stage_param(param)?;
        let puzzle = self.first_for_stage(stage);
        if puzzle.is_none() {
            log::warn!("no puzzle stored for stage {stage}");
        }
        Ok(puzzle)
    }
}
