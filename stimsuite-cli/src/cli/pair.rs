//! Cross-file trial matching for preference experiments.
//!
//! A trial file records, per trial, an audio stimulus and a set of candidate
//! animation choices of which at most one is marked correct. Two trial files
//! built over the same suites present the same correct animations in
//! different orders; `find_matching_trials` aligns them by comparing the
//! correct choice's start and end states exactly.

use serde::{Deserialize, Serialize};
use stimsuite_core::ShapeState;

/// One candidate choice inside a trial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialChoice {
    /// Whether this choice is the trial's correct answer. Absent in the wire
    /// format for incorrect choices.
    #[serde(default)]
    pub correct_answer: bool,
    /// State the choice's animation starts from.
    pub start_state: ShapeState,
    /// State the choice's animation ends at.
    pub end_state: ShapeState,
}

/// One trial as persisted in a trial file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Audio stimulus played during the trial.
    pub audio: String,
    /// Candidate animation choices.
    pub choices: Vec<TrialChoice>,
}

impl TrialRecord {
    /// Returns the choice marked correct, if any.
    #[must_use]
    pub fn correct_choice(&self) -> Option<&TrialChoice> {
        self.choices.iter().find(|choice| choice.correct_answer)
    }
}

/// A pair of trials whose correct choices show the same animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchedTrial {
    /// Index of the trial in the first file.
    pub file1_trial_index: usize,
    /// Index of the matching trial in the second file.
    pub file2_trial_index: usize,
    /// Audio stimulus of the first trial.
    pub audio1: String,
    /// Audio stimulus of the second trial.
    pub audio2: String,
    /// Shared start state of the correct animation.
    pub start_state: ShapeState,
    /// Shared end state of the correct animation.
    pub end_state: ShapeState,
}

/// Pairs trials across two files by the exact start and end states of their
/// correct choices.
///
/// Trials without a correct choice are skipped. Each trial in the first file
/// takes the first matching trial in the second file; no trial pairs twice
/// against the same first-file trial.
#[must_use]
pub fn find_matching_trials(first: &[TrialRecord], second: &[TrialRecord]) -> Vec<MatchedTrial> {
    let mut matches = Vec::new();
    for (i, trial1) in first.iter().enumerate() {
        let Some(correct1) = trial1.correct_choice() else {
            continue;
        };
        for (j, trial2) in second.iter().enumerate() {
            let Some(correct2) = trial2.correct_choice() else {
                continue;
            };
            if correct1.start_state == correct2.start_state
                && correct1.end_state == correct2.end_state
            {
                matches.push(MatchedTrial {
                    file1_trial_index: i,
                    file2_trial_index: j,
                    audio1: trial1.audio.clone(),
                    audio2: trial2.audio.clone(),
                    start_state: correct1.start_state.clone(),
                    end_state: correct1.end_state.clone(),
                });
                break;
            }
        }
    }
    matches
}
