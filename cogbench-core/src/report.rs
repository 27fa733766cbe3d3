//! Persistence-ready shapes handed to the scoring backend.

use crate::stats;
use crate::summary::SessionSummary;
use crate::trial::TrialRecord;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One trial as the backend stores it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRound {
    pub trial_number: u32,
    pub stimulus: String,
    pub response: String,
    pub reaction_time: f64,
    pub is_correct: bool,
}

impl From<&TrialRecord> for TestRound {
    fn from(trial: &TrialRecord) -> Self {
        let response = match &trial.metadata.actual_key {
            Some(key) => key.clone(),
            None if trial.correct => "CORRECT".to_string(),
            None => "INCORRECT".to_string(),
        };
        Self {
            trial_number: trial.trial_number,
            stimulus: trial
                .metadata
                .expected_key
                .clone()
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            response,
            reaction_time: trial.reaction_time_ms.unwrap_or(0.0),
            is_correct: trial.correct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTestRequest {
    pub total_time_ms: u64,
    pub total_trials: usize,
    pub correct_trials: usize,
    pub rounds: Vec<TestRound>,
}

impl CompleteTestRequest {
    /// `elapsed` is the wall-clock time between session start and finish.
    pub fn from_summary(summary: &SessionSummary, elapsed: Duration) -> Self {
        Self {
            total_time_ms: elapsed.as_millis() as u64,
            total_trials: summary.trials.len(),
            correct_trials: summary.hits(),
            rounds: summary.trials.iter().map(TestRound::from).collect(),
        }
    }
}

/// Descriptive statistics over the correct, timed trials of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStatistics {
    pub total_trials: usize,
    pub correct_trials: usize,
    pub accuracy_rate: f64,
    pub avg_reaction_time: f64,
    pub median_reaction_time: f64,
    pub std_deviation: f64,
    pub fastest_time: f64,
    pub slowest_time: f64,
}

impl TestStatistics {
    pub fn from_summary(summary: &SessionSummary) -> Self {
        let rts = summary.reaction_times();
        let avg = stats::mean(&rts);
        Self {
            total_trials: summary.trials.len(),
            correct_trials: summary.hits(),
            accuracy_rate: summary.accuracy,
            avg_reaction_time: avg,
            median_reaction_time: stats::median(&rts),
            std_deviation: stats::std_dev(&rts, avg),
            fastest_time: stats::min(&rts),
            slowest_time: stats::max(&rts),
        }
    }
}
