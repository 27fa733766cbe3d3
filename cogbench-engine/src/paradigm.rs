use crate::config::ParadigmConfig;
use cogbench_core::{Key, ParadigmKind, Stimulus, TrialMetadata};
use rand::Rng;
use std::fmt;
use std::time::Duration;

/// Outcome of scoring one trial
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub correct: bool,
    pub metadata: TrialMetadata,
}

impl Classification {
    pub fn new(correct: bool, metadata: TrialMetadata) -> Self {
        Self { correct, metadata }
    }
}

/// Stimulus and scoring rules of one task paradigm.
///
/// The engine owns all timing and bookkeeping; a paradigm only decides what
/// to show, which input counts, and whether it was right.
pub trait Paradigm {
    type Stimulus: Stimulus;
    type Response: Clone + PartialEq + fmt::Debug;

    fn kind(&self) -> ParadigmKind;

    fn config(&self) -> &ParadigmConfig;

    /// Picks the next stimulus. Called at onset, once per trial.
    fn generate<R: Rng>(&mut self, rng: &mut R) -> Self::Stimulus;

    /// Maps a raw key to a response; `None` for keys this paradigm ignores.
    fn interpret_key(&self, key: &Key) -> Option<Self::Response>;

    fn classify_response(
        &self,
        stimulus: &Self::Stimulus,
        response: &Self::Response,
    ) -> Classification;

    /// Scoring when the response window closes without input.
    fn classify_timeout(&self, stimulus: &Self::Stimulus) -> Classification;

    /// Scoring for a response before onset. `None` ignores such input.
    fn classify_early(&self, _response: &Self::Response) -> Option<Classification> {
        None
    }

    /// The response a perfect participant gives; `None` means withhold.
    fn correct_response(&self, stimulus: &Self::Stimulus) -> Option<Self::Response>;

    /// Every distinct response the paradigm accepts.
    fn response_options(&self) -> Vec<Self::Response>;

    fn quota(&self) -> u32 {
        self.config().trials
    }

    fn wait_delay<R: Rng>(&self, trial_index: u32, rng: &mut R) -> Duration {
        self.config().wait.sample(trial_index, rng)
    }

    fn response_window(&self) -> Option<Duration> {
        self.config().response_window()
    }

    fn feedback_dwell(&self) -> Duration {
        self.config().feedback()
    }
}
