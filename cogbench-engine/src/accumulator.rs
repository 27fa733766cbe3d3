use cogbench_core::{SessionSummary, TrialRecord};

/// Running counts for one session plus the authoritative trial log
#[derive(Debug, Clone, Default)]
pub struct SessionAccumulator {
    count: u32,
    hits: u32,
    reaction_times: Vec<f64>,
    trials: Vec<TrialRecord>,
}

impl SessionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: TrialRecord) {
        assert_eq!(
            record.trial_number,
            self.count + 1,
            "trial records must be numbered consecutively"
        );
        self.count += 1;
        if record.correct {
            self.hits += 1;
        }
        if let Some(rt) = record.scored_reaction_time() {
            self.reaction_times.push(rt);
        }
        self.trials.push(record);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn last(&self) -> Option<&TrialRecord> {
        self.trials.last()
    }

    /// Builds the summary from the log. The running counters must agree with it.
    pub fn finalize(&self) -> SessionSummary {
        let summary = SessionSummary::from_trials(self.trials.clone());
        debug_assert_eq!(summary.hits(), self.hits as usize, "hit counter diverged from log");
        debug_assert_eq!(
            summary.reaction_times(),
            self.reaction_times,
            "reaction times diverged from log"
        );
        summary
    }
}
