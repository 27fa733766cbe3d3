use crate::stats;
use crate::trial::TrialRecord;
use serde::{Deserialize, Serialize};

/// Final result of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Mean RT over correct, timed trials; 0 when there are none
    #[serde(rename = "avgReactionTime")]
    pub avg_reaction_time_ms: f64,
    /// Percentage of correct trials
    pub accuracy: f64,
    pub trials: Vec<TrialRecord>,
}

impl SessionSummary {
    /// Computes the summary from the authoritative trial log.
    pub fn from_trials(trials: Vec<TrialRecord>) -> Self {
        let rts = scored_reaction_times(&trials);
        let hits = trials.iter().filter(|t| t.correct).count();
        let accuracy = if trials.is_empty() {
            0.0
        } else {
            hits as f64 / trials.len() as f64 * 100.0
        };
        Self {
            avg_reaction_time_ms: stats::mean(&rts),
            accuracy,
            trials,
        }
    }

    pub fn hits(&self) -> usize {
        self.trials.iter().filter(|t| t.correct).count()
    }

    pub fn reaction_times(&self) -> Vec<f64> {
        scored_reaction_times(&self.trials)
    }
}

fn scored_reaction_times(trials: &[TrialRecord]) -> Vec<f64> {
    trials
        .iter()
        .filter_map(TrialRecord::scored_reaction_time)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::TrialMetadata;

    fn record(n: u32, correct: bool, rt: Option<f64>) -> TrialRecord {
        TrialRecord {
            trial_number: n,
            correct,
            reaction_time_ms: rt,
            timestamp_ms: n as f64 * 1000.0,
            metadata: TrialMetadata::default(),
        }
    }

    #[test]
    fn average_ignores_incorrect_and_untimed_trials() {
        let summary = SessionSummary::from_trials(vec![
            record(1, true, Some(300.0)),
            record(2, false, Some(150.0)),
            record(3, true, None),
            record(4, true, Some(500.0)),
        ]);
        assert_eq!(summary.avg_reaction_time_ms, 400.0);
        assert_eq!(summary.accuracy, 75.0);
        assert_eq!(summary.hits(), 3);
    }

    #[test]
    fn all_wrong_yields_zero_average() {
        let summary = SessionSummary::from_trials(vec![
            record(1, false, Some(250.0)),
            record(2, false, None),
        ]);
        assert_eq!(summary.avg_reaction_time_ms, 0.0);
        assert_eq!(summary.accuracy, 0.0);
        assert!(!summary.avg_reaction_time_ms.is_nan());
    }

    #[test]
    fn empty_log_is_all_zero() {
        let summary = SessionSummary::from_trials(Vec::new());
        assert_eq!(summary.avg_reaction_time_ms, 0.0);
        assert_eq!(summary.accuracy, 0.0);
    }
}
