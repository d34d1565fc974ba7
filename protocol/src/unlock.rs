use manor_core::Stage;

use crate::*;

/// Stages whose progress row is marked completed.
pub fn completed_stages(rows: &[UserProgress]) -> Vec<Stage> {
    let mut stages: Vec<Stage> = rows
        .iter()
        .filter(|row| row.is_completed)
        .map(|row| row.stage)
        .collect();
    stages.sort();
    stages.dedup();
    stages
}

/// Stage one is always open; every later stage opens once the one before it is completed.
pub fn is_stage_unlocked(stage: Stage, rows: &[UserProgress]) -> bool {
    match stage.previous() {
        None => true,
        Some(previous) => rows.iter().any(|row| row.stage == previous && row.is_completed),
    }
}

pub fn unlocked_stages(rows: &[UserProgress]) -> Vec<Stage> {
    Stage::ALL.into_iter().filter(|&stage| is_stage_unlocked(stage, rows)).collect()
}

/// Share of stages completed, rounded to a whole percent.
pub fn completion_percent(rows: &[UserProgress]) -> u8 {
    let done = completed_stages(rows).len();
    let total = Stage::ALL.len();
    ((done * 200 + total) / (total * 2)) as u8
}
