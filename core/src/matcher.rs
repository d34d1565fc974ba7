use alloc::string::String;

use crate::*;

/// Checks a spelled `word` against `targets`, forwards and reversed, ignoring case.
///
/// The first target that matches is reported unless it is already in
/// `already_found`, in which case nothing is reported.
pub fn match_word<'a, T, F>(word: &str, targets: &'a [T], already_found: &[F]) -> Option<&'a str>
where
    T: AsRef<str>,
    F: AsRef<str>,
{
    let forward = word.to_uppercase();
    let reverse: String = forward.chars().rev().collect();

    let target = targets.iter().map(|target| target.as_ref()).find(|target| {
        let target = target.to_uppercase();
        target == forward || target == reverse
    })?;

    if already_found.iter().any(|found| found.as_ref() == target) {
        None
    } else {
        Some(target)
    }
}

/// Resolves a finished drag path into a newly found target word.
///
/// A single cell is never a match attempt.
pub fn resolve_match<'a, T, F>(
    candidate: &[Cell],
    targets: &'a [T],
    already_found: &[F],
) -> Option<&'a str>
where
    T: AsRef<str>,
    F: AsRef<str>,
{
    if candidate.len() <= 1 {
        return None;
    }
    match_word(&line_word(candidate), targets, already_found)
}
